use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::Employee,
    reports::{DailyTotal, LocationTotal, ProductTotal, SalesTotals},
};

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Day the rolling windows end on; defaults to today (UTC).
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesSummary {
    pub as_of: NaiveDate,
    pub totals: SalesTotals,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailySales {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DailyTotal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationSales {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub locations: Vec<LocationTotal>,
    pub top_location: Option<LocationTotal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub employee: Employee,
    pub as_of: NaiveDate,
    pub totals: SalesTotals,
    pub top_location: Option<LocationTotal>,
    pub low_stock_ingredients: i64,
    pub best_sellers: Vec<ProductTotal>,
}
