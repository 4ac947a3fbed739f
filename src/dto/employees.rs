use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub role_id: i32,
    pub employment_type: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub hourly_wage: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub employment_type: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub hourly_wage: Option<Decimal>,
    pub status: Option<String>,
    pub role_id: Option<i32>,
}
