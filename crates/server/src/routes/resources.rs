//! One set of CRUD handlers shared by every collection. `router::<R>` binds
//! them under `/{R::COLLECTION}`.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use service::{Resource, ResourceStore};
use tracing::info;

use crate::errors::ApiError;

type Store<R> = State<Arc<ResourceStore<R>>>;
type Body<T> = Result<LenientJson<T>, JsonRejection>;

/// JSON body where an absent body, a blank body or a non-JSON content type
/// all read as an empty object (`T::default()`). Only a JSON body that fails
/// to parse or has wrong field types is rejected.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self(T::default()));
        }
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

pub fn router<R: Resource>(store: Arc<ResourceStore<R>>) -> Router {
    let collection = format!("/{}", R::COLLECTION);
    let item = format!("/{}/:id", R::COLLECTION);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(fetch::<R>)
                .put(replace::<R>)
                .patch(merge::<R>)
                .delete(remove::<R>),
        )
        .with_state(store)
}

async fn list<R: Resource>(State(store): Store<R>) -> Json<Vec<R>> {
    Json(store.list().await)
}

async fn fetch<R: Resource>(
    State(store): Store<R>,
    Path(raw): Path<String>,
) -> Result<Json<R>, ApiError> {
    let id = R::resolve_id(&raw)?;
    Ok(Json(store.get(id).await?))
}

async fn create<R: Resource>(
    State(store): Store<R>,
    body: Body<R::Payload>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let LenientJson(payload) = body?;
    let record = store.create(payload).await?;
    info!(resource = R::COLLECTION, id = record.id(), "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn replace<R: Resource>(
    State(store): Store<R>,
    Path(raw): Path<String>,
    body: Body<R::Payload>,
) -> Result<Json<R>, ApiError> {
    let id = R::resolve_id(&raw)?;
    let payload = readable_body(&store, id, body).await?;
    let record = store.replace(id, payload).await?;
    info!(resource = R::COLLECTION, id, "record replaced");
    Ok(Json(record))
}

async fn merge<R: Resource>(
    State(store): Store<R>,
    Path(raw): Path<String>,
    body: Body<R::Patch>,
) -> Result<Json<R>, ApiError> {
    let id = R::resolve_id(&raw)?;
    let patch = readable_body(&store, id, body).await?;
    let record = store.merge(id, patch).await?;
    info!(resource = R::COLLECTION, id, "record merged");
    Ok(Json(record))
}

async fn remove<R: Resource>(
    State(store): Store<R>,
    Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = R::resolve_id(&raw)?;
    let removed = store.delete(id).await?;
    info!(resource = R::COLLECTION, id, "record deleted");

    Ok(Json(json!({ "message": R::MESSAGES.deleted, (R::SINGULAR): removed })))
}

/// Unwrap a JSON body for an item route. A missing record wins over an
/// unreadable body, so the client sees 404 before 400.
async fn readable_body<R: Resource, T>(
    store: &ResourceStore<R>,
    id: i64,
    body: Body<T>,
) -> Result<T, ApiError> {
    match body {
        Ok(LenientJson(value)) => Ok(value),
        Err(rejection) => {
            store.get(id).await?;
            Err(rejection.into())
        }
    }
}
