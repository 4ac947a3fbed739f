use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize)]
pub struct TimetableQuery {
    pub employee_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShiftRequest {
    pub employee_id: i32,
    pub work_date: NaiveDate,
    #[schema(value_type = String, example = "7.5")]
    pub hours_worked: Decimal,
    pub location_id: Option<i32>,
    /// Defaults to the employee's hourly wage.
    #[schema(value_type = Option<String>)]
    pub pay_rate: Option<Decimal>,
}
