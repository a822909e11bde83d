use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{present_text, Messages, Resource};

/// An item for sale. `price` keeps the JSON number exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Number,
    pub stock: i64,
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub price: Option<Number>,
    pub stock: Option<i64>,
}

/// Body of `PATCH /products/{id}`. `null` values leave fields untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Number>,
    pub stock: Option<i64>,
}

impl Resource for Product {
    type Payload = ProductPayload;
    type Patch = ProductPatch;

    const COLLECTION: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const MESSAGES: Messages = Messages {
        not_found: "Produit non trouvé",
        missing_fields: "Nom et prix requis",
        replace_incomplete: "PUT nécessite toutes les données",
        deleted: "Produit supprimé",
    };

    fn id(&self) -> i64 { self.id }

    fn set_id(&mut self, id: i64) { self.id = id; }

    // a zero price is a price
    fn has_required(payload: &ProductPayload) -> bool {
        present_text(&payload.name) && payload.price.is_some()
    }

    fn from_payload(id: i64, payload: ProductPayload) -> Self {
        Product {
            id,
            name: payload.name.unwrap_or_default(),
            price: payload.price.unwrap_or_else(|| Number::from(0)),
            stock: payload.stock.unwrap_or(0),
        }
    }

    fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(price) = patch.price { self.price = price; }
        if let Some(stock) = patch.stock { self.stock = stock; }
    }
}
