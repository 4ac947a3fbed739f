use axum::{Router, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod customers;
pub mod doc;
pub mod employees;
pub mod health;
pub mod ingredients;
pub mod labels;
pub mod locations;
pub mod params;
pub mod products;
pub mod reports;
pub mod sales;
pub mod timetable;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/ingredients", ingredients::router())
        .nest("/sales", sales::router())
        .nest("/reports", reports::router())
        .route("/dashboard", get(reports::dashboard))
        .nest("/timetable", timetable::router())
        .nest("/employees", employees::router())
        .nest("/customers", customers::router())
        .nest("/locations", locations::router())
        .nest("/labels", labels::router())
        .route("/about", get(health::about))
}
