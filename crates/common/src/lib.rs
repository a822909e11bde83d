pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "OK");
    }

    #[test]
    fn welcome_points_at_docs() {
        let w = types::Welcome::new("/docs");
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v, serde_json::json!({"message": "Mini API OK", "docs": "/docs"}));
    }
}
