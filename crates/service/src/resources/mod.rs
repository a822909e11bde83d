//! Record shapes served by the collection engine.
//!
//! A shape decides three things and nothing else: which fields a full payload
//! must carry, which defaults fill the optional ones, and how a partial payload
//! is merged. Identity, ordering and locking belong to
//! [`ResourceStore`](crate::storage::resource_store::ResourceStore).

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::errors::ServiceError;

pub mod product;
pub mod user;

/// Client-facing messages for one collection.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub not_found: &'static str,
    /// Create rejected because a required field is missing.
    pub missing_fields: &'static str,
    /// Replace rejected because a required field is missing.
    pub replace_incomplete: &'static str,
    /// Confirmation returned with the removed record.
    pub deleted: &'static str,
}

pub trait Resource: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static {
    /// Full payload accepted by Create and Replace.
    /// `Default` is the empty object.
    type Payload: DeserializeOwned + Default + Send + 'static;
    /// Partial payload accepted by Merge; `Default` changes nothing.
    type Patch: DeserializeOwned + Default + Send + 'static;

    /// Path segment and collection name, e.g. `users`.
    const COLLECTION: &'static str;
    /// Key of the removed record in a delete confirmation, e.g. `user`.
    const SINGULAR: &'static str;
    const MESSAGES: Messages;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    /// Every required field is present and non-empty.
    fn has_required(payload: &Self::Payload) -> bool;

    /// Build a record from a validated payload, filling defaults for absent
    /// optional fields.
    fn from_payload(id: i64, payload: Self::Payload) -> Self;

    /// Overwrite the fields the patch carries.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn not_found() -> ServiceError {
        ServiceError::not_found(Self::MESSAGES.not_found)
    }

    /// Resolve a caller-supplied identifier; anything without a leading
    /// integer matches no record.
    fn resolve_id(raw: &str) -> Result<i64, ServiceError> {
        parse_id(raw).ok_or_else(Self::not_found)
    }
}

/// Lenient integer parse: leading whitespace, optional sign, then the longest
/// run of ASCII digits. Trailing text is ignored (`"12abc"` is 12).
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let value: i64 = rest[..len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Required text: present and not the empty string.
pub(crate) fn present_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when used with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
