use serde::Serialize;

/// A client company submitting products for approval. Owns applications;
/// cannot be deleted while any remain.
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub company_name: String,
    pub cac_number: String,
}
