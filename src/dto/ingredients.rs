use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub unit_of_measure: String,
    #[schema(value_type = String, example = "25")]
    pub current_stock: Decimal,
    #[schema(value_type = String, example = "10")]
    pub reorder_threshold: Decimal,
    #[schema(value_type = String, example = "3.75")]
    pub cost_per_unit: Decimal,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    pub unit_of_measure: Option<String>,
    #[schema(value_type = Option<String>)]
    pub current_stock: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub reorder_threshold: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub cost_per_unit: Option<Decimal>,
}
