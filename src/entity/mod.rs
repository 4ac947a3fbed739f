pub mod customers;
pub mod employee_hours;
pub mod employees;
pub mod ingredients;
pub mod locations;
pub mod products;
pub mod sale_items;
pub mod sales;

pub use customers::Entity as Customers;
pub use employee_hours::Entity as EmployeeHours;
pub use employees::Entity as Employees;
pub use ingredients::Entity as Ingredients;
pub use locations::Entity as Locations;
pub use products::Entity as Products;
pub use sale_items::Entity as SaleItems;
pub use sales::Entity as Sales;
