use utoipa::openapi::path::{
    OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItem, PathItemType,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::server::ServerBuilder;
use utoipa::openapi::{
    Array, Content, ObjectBuilder, Ref, RefOr, Required, Response, ResponseBuilder, Schema,
    SchemaType,
};
use utoipa::OpenApi;
use utoipa::ToSchema;

use service::Resource;

#[derive(ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
}

#[derive(ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Mini API OK")]
    pub message: String,
    #[schema(example = "/docs")]
    pub docs: String,
}

#[derive(ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Amadou Sow")]
    pub name: String,
    #[schema(example = "amadou@example.com")]
    pub email: String,
    #[schema(example = 28)]
    pub age: Option<i64>,
    #[schema(example = "Dakar")]
    pub ville: Option<String>,
}

#[derive(ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ordinateur HP")]
    pub name: String,
    #[schema(example = 350000)]
    pub price: f64,
    #[schema(example = 15)]
    pub stock: i64,
}

#[derive(ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Produit non trouvé")]
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mini API",
        version = "1.0.0",
        description = "CRUD Users & Products + /health. Swagger UI at /docs"
    ),
    paths(
        crate::routes::root,
        crate::routes::health,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeResponse,
            User,
            Product,
            ErrorResponse,
        )
    ),
    tags(
        (name = "System"),
        (name = "Users"),
        (name = "Products")
    )
)]
pub struct ApiDoc;

/// Documentation metadata for a collection.
pub trait Documented: Resource {
    const TAG: &'static str;
    /// Component schema describing one record.
    const SCHEMA: &'static str;
}

impl Documented for service::User {
    const TAG: &'static str = "Users";
    const SCHEMA: &'static str = "User";
}

impl Documented for service::Product {
    const TAG: &'static str = "Products";
    const SCHEMA: &'static str = "Product";
}

/// The complete document: static system routes from `ApiDoc` plus generated
/// CRUD paths for every collection.
pub fn api_doc(server_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(server_url)
        .description(Some("current"))
        .build()]);
    add_collection_paths::<service::User>(&mut doc);
    add_collection_paths::<service::Product>(&mut doc);
    doc
}

fn add_collection_paths<R: Documented>(doc: &mut utoipa::openapi::OpenApi) {
    let record = || schema_ref(R::SCHEMA);

    let mut collection = PathItem::new(
        PathItemType::Get,
        operation::<R>("list", format!("List {}", R::COLLECTION))
            .response("200", json_response("OK", array_of(R::SCHEMA)))
            .build(),
    );
    collection.operations.insert(
        PathItemType::Post,
        operation::<R>("create", format!("Create a {}", R::SINGULAR))
            .request_body(Some(json_body(record())))
            .response("201", json_response("Created", record()))
            .response("400", error_response("Invalid data"))
            .build(),
    );

    let mut item = PathItem::new(
        PathItemType::Get,
        operation::<R>("get", format!("Get a {} by id", R::SINGULAR))
            .parameter(id_param())
            .response("200", json_response("OK", record()))
            .response("404", error_response("Not found"))
            .build(),
    );
    item.operations.insert(
        PathItemType::Put,
        operation::<R>("replace", format!("Replace a {} entirely", R::SINGULAR))
            .parameter(id_param())
            .request_body(Some(json_body(record())))
            .response("200", json_response("OK", record()))
            .response("400", error_response("Invalid data"))
            .response("404", error_response("Not found"))
            .build(),
    );
    item.operations.insert(
        PathItemType::Patch,
        operation::<R>("merge", format!("Partially update a {}", R::SINGULAR))
            .parameter(id_param())
            .request_body(Some(json_body(RefOr::T(Schema::Object(ObjectBuilder::new().build())))))
            .response("200", json_response("OK", record()))
            .response("404", error_response("Not found"))
            .build(),
    );
    item.operations.insert(
        PathItemType::Delete,
        operation::<R>("delete", format!("Delete a {}", R::SINGULAR))
            .parameter(id_param())
            .response("200", ResponseBuilder::new().description("Deleted").build())
            .response("404", error_response("Not found"))
            .build(),
    );

    doc.paths.paths.insert(format!("/{}", R::COLLECTION), collection);
    doc.paths.paths.insert(format!("/{}/{{id}}", R::COLLECTION), item);
}

fn operation<R: Documented>(verb: &str, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tags(Some(vec![R::TAG.to_string()]))
        .operation_id(Some(format!("{}_{}", verb, R::COLLECTION)))
        .summary(Some(summary))
}

fn id_param() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(SchemaType::Integer).build(),
        ))))
        .build()
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn array_of(name: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Array(Array::new(schema_ref(name))))
}

fn json_body(schema: RefOr<Schema>) -> RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", Content::new(schema))
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", Content::new(schema))
        .build()
}

fn error_response(description: &str) -> Response {
    json_response(description, schema_ref("ErrorResponse"))
}
