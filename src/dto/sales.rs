use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{Sale, SaleItem},
    routes::params::Pagination,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaleLineRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub location_id: Option<i32>,
    /// Calendar day of the sale; the current time of day is attached.
    pub sale_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub customer_id: Option<i32>,
    pub items: Vec<SaleLineRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaleListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub location_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SaleListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
