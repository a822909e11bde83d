use serde::Serialize;

/// Liveness payload served by `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "OK" }
    }
}

/// Informational payload served by `GET /`.
#[derive(Serialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
    pub docs: &'static str,
}

impl Welcome {
    pub fn new(docs: &'static str) -> Self {
        Self { message: "Mini API OK", docs }
    }
}
