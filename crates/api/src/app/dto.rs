use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}
