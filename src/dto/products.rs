use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub allergen_info: Option<String>,
    pub dietary_info: Option<String>,
}

/// Partial update; an empty string clears an optional text field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub description: Option<String>,
    pub allergen_info: Option<String>,
    pub dietary_info: Option<String>,
}
