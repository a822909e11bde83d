use serde::{Deserialize, Serialize};

use super::{nullable, present_text, Messages, Resource};

/// A registered person. `age` and `ville` are always serialized, as `null`
/// when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub ville: Option<String>,
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub ville: Option<String>,
}

/// Body of `PATCH /users/{id}`. `age` and `ville` may be cleared with `null`;
/// a `null` name or email leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub ville: Option<Option<String>>,
}

impl Resource for User {
    type Payload = UserPayload;
    type Patch = UserPatch;

    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const MESSAGES: Messages = Messages {
        not_found: "Utilisateur non trouvé",
        missing_fields: "Nom et email requis",
        replace_incomplete: "PUT nécessite toutes les données",
        deleted: "Utilisateur supprimé",
    };

    fn id(&self) -> i64 { self.id }

    fn set_id(&mut self, id: i64) { self.id = id; }

    fn has_required(payload: &UserPayload) -> bool {
        present_text(&payload.name) && present_text(&payload.email)
    }

    fn from_payload(id: i64, payload: UserPayload) -> Self {
        User {
            id,
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            age: payload.age,
            ville: payload.ville,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(email) = patch.email { self.email = email; }
        if let Some(age) = patch.age { self.age = age; }
        if let Some(ville) = patch.ville { self.ville = ville; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn amadou() -> User {
        User {
            id: 1,
            name: "Amadou Sow".into(),
            email: "amadou@example.com".into(),
            age: Some(28),
            ville: Some("Dakar".into()),
        }
    }

    #[test]
    fn optional_fields_serialize_as_null() {
        let u = User::from_payload(104, UserPayload {
            name: Some("A".into()),
            email: Some("a@x.com".into()),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&u).unwrap(),
            json!({"id": 104, "name": "A", "email": "a@x.com", "age": null, "ville": null})
        );
    }

    #[test]
    fn required_fields() {
        let ok: UserPayload = serde_json::from_value(json!({"name": "A", "email": "a@x.com"})).unwrap();
        assert!(User::has_required(&ok));
        let missing: UserPayload = serde_json::from_value(json!({"name": "A"})).unwrap();
        assert!(!User::has_required(&missing));
        let empty: UserPayload = serde_json::from_value(json!({"name": "", "email": "a@x.com"})).unwrap();
        assert!(!User::has_required(&empty));
        let null: UserPayload = serde_json::from_value(json!({"name": "A", "email": null})).unwrap();
        assert!(!User::has_required(&null));
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let mut u = amadou();
        let patch: UserPatch = serde_json::from_value(json!({"ville": null})).unwrap();
        u.apply_patch(patch);
        assert_eq!(u.ville, None);
        assert_eq!(u.age, Some(28));
    }

    #[test]
    fn patch_ignores_null_required_fields() {
        let mut u = amadou();
        let patch: UserPatch = serde_json::from_value(json!({"name": null, "age": 29})).unwrap();
        u.apply_patch(patch);
        assert_eq!(u.name, "Amadou Sow");
        assert_eq!(u.age, Some(29));
    }
}
