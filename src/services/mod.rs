pub mod auth_service;
pub mod customer_service;
pub mod employee_service;
pub mod ingredient_service;
pub mod inventory_service;
pub mod label_service;
pub mod location_service;
pub mod product_service;
pub mod report_service;
pub mod sale_service;
pub mod timetable_service;
