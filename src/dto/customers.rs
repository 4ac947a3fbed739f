use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_contact_method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerSearchQuery {
    /// Matched against first and last name, case-insensitively.
    pub q: Option<String>,
}
