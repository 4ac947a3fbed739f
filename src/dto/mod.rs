pub mod auth;
pub mod customers;
pub mod employees;
pub mod ingredients;
pub mod products;
pub mod reports;
pub mod sales;
pub mod timetable;
