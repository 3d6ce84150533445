use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 128))]
    pub company_name: String,
    #[validate(length(min = 1, max = 32))]
    pub cac_number: String,
}
