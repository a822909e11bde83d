//! Demo records loaded at startup when `store.seed_demo_data` is on.

use serde_json::Number;

use crate::resources::{product::Product, user::User};

fn user(id: i64, name: &str, email: &str, age: i64, ville: &str) -> User {
    User {
        id,
        name: name.into(),
        email: email.into(),
        age: Some(age),
        ville: Some(ville.into()),
    }
}

fn product(id: i64, name: &str, price: i64, stock: i64) -> Product {
    Product { id, name: name.into(), price: Number::from(price), stock }
}

pub fn demo_users() -> Vec<User> {
    vec![
        user(1, "Amadou Sow", "amadou@example.com", 28, "Dakar"),
        user(2, "Fatou Diop", "fatou@example.com", 25, "Thiès"),
        user(3, "Moussa Fall", "moussa@example.com", 30, "Saint-Louis"),
    ]
}

pub fn demo_products() -> Vec<Product> {
    vec![
        product(1, "Ordinateur HP", 350_000, 15),
        product(2, "Téléphone Samsung", 180_000, 30),
        product(3, "Tablette iPad", 450_000, 8),
    ]
}
