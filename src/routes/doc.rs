use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        customers::CreateCustomerRequest,
        employees::{CreateEmployeeRequest, UpdateEmployeeRequest},
        ingredients::{CreateIngredientRequest, UpdateIngredientRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        reports::{Dashboard, DailySales, LocationSales, SalesSummary},
        sales::{CreateSaleRequest, SaleLineRequest, SaleWithItems},
        timetable::CreateShiftRequest,
    },
    inventory::StockLevel,
    labels::ProductLabel,
    models::{Customer, Employee, Ingredient, Location, Product, Role, Sale, SaleItem, TimetableEntry},
    reports::{DailyTotal, LocationTotal, ProductTotal, SalesTotals},
    response::{ApiResponse, Meta},
    routes::{
        auth, customers, employees, health, ingredients, labels, locations, params, products,
        reports, sales, timetable,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::about,
        auth::login,
        auth::me,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        ingredients::list_ingredients,
        ingredients::list_low_stock,
        ingredients::get_ingredient,
        ingredients::create_ingredient,
        ingredients::update_ingredient,
        ingredients::delete_ingredient,
        sales::list_sales,
        sales::create_sale,
        sales::get_sale,
        reports::summary,
        reports::daily,
        reports::by_location,
        reports::dashboard,
        timetable::list_timetable,
        timetable::create_shift,
        employees::list_employees,
        employees::create_employee,
        employees::update_employee,
        customers::create_customer,
        customers::search_customers,
        customers::get_customer,
        locations::list_locations,
        labels::product_label
    ),
    components(
        schemas(
            Role,
            Product,
            Ingredient,
            StockLevel,
            Sale,
            SaleItem,
            SaleWithItems,
            Employee,
            Customer,
            Location,
            TimetableEntry,
            ProductLabel,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            CreateIngredientRequest,
            UpdateIngredientRequest,
            CreateSaleRequest,
            SaleLineRequest,
            CreateShiftRequest,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            CreateCustomerRequest,
            SalesTotals,
            DailyTotal,
            LocationTotal,
            ProductTotal,
            SalesSummary,
            DailySales,
            LocationSales,
            Dashboard,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<SaleWithItems>,
            ApiResponse<Dashboard>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check and application info"),
        (name = "Auth", description = "Employee login"),
        (name = "Products", description = "Product catalogue"),
        (name = "Ingredients", description = "Kitchen ingredient stock"),
        (name = "Sales", description = "Sales entry"),
        (name = "Reports", description = "Sales tracker, location chart and dashboard"),
        (name = "Timetable", description = "Worked shifts"),
        (name = "Employees", description = "User management"),
        (name = "Customers", description = "Customer records"),
        (name = "Locations", description = "Shops and market stalls"),
        (name = "Labels", description = "Printable product labels"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_area() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/products/{id}",
            "/api/ingredients/low-stock",
            "/api/sales",
            "/api/reports/summary",
            "/api/dashboard",
            "/api/timetable",
            "/api/employees/{id}",
            "/api/customers/search",
            "/api/locations",
            "/api/labels/{product_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
