//! Field-level input rules for the back-office forms.
//!
//! Every validator collects all failures into [`FieldErrors`] instead of stopping at the
//! first one, so a client can mark every bad field at once.

use std::{collections::BTreeMap, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    dto::{
        customers::CreateCustomerRequest,
        employees::{CreateEmployeeRequest, UpdateEmployeeRequest},
        ingredients::{CreateIngredientRequest, UpdateIngredientRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        sales::CreateSaleRequest,
        timetable::CreateShiftRequest,
    },
    error::AppError,
    models::Role,
};

pub const EMPLOYMENT_TYPES: [&str; 3] = ["Full-Time", "Part-Time", "Contract"];
pub const EMPLOYEE_STATUSES: [&str; 3] = ["Active", "On Leave", "Terminated"];
pub const CONTACT_METHODS: [&str; 4] = ["Email", "Phone", "Text", "Mail"];
pub const PAYMENT_METHODS: [&str; 3] = ["Cash", "Card", "Transfer"];

const MAX_STOCK: i64 = 999_999;
/// 99,999,999.99, the largest value a `NUMERIC(10, 2)` wage or pay-rate column holds.
const MAX_WAGE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static CUSTOMER_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("customer phone pattern"));
static EMPLOYEE_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("employee phone pattern"));

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure; the first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// Trims an optional text field and maps blanks to `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `%term%` for ILIKE with the term's own `%`, `_` and `\` matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn required_text(errors: &mut FieldErrors, field: &str, label: &str, value: &str, min: usize, max: usize) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.add(field, format!("{label} is required"));
    } else if len < min {
        errors.add(field, format!("{label} must be at least {min} characters"));
    } else if len > max {
        errors.add(field, format!("{label} must be less than {max} characters"));
    }
}

fn optional_text(errors: &mut FieldErrors, field: &str, label: &str, value: Option<&str>, max: usize) {
    if let Some(value) = value {
        if value.trim().chars().count() > max {
            errors.add(field, format!("{label} must be less than {max} characters"));
        }
    }
}

/// Positive amount of money with at most two decimal places.
fn money(errors: &mut FieldErrors, field: &str, label: &str, value: Decimal) {
    if value <= Decimal::ZERO {
        errors.add(field, format!("{label} must be greater than 0"));
    } else if value > Decimal::new(99_999_999, 2) {
        errors.add(field, format!("{label} must be less than 1,000,000"));
    } else if value.normalize().scale() > 2 {
        errors.add(field, format!("{label} can have at most 2 decimal places"));
    }
}

fn stock_amount(errors: &mut FieldErrors, field: &str, label: &str, value: Decimal) {
    if value < Decimal::ZERO {
        errors.add(field, format!("{label} cannot be negative"));
    } else if value > Decimal::from(MAX_STOCK) {
        errors.add(field, format!("{label} must be less than 1,000,000"));
    } else if value.normalize().scale() > 3 {
        errors.add(field, format!("{label} can have at most 3 decimal places"));
    }
}

fn one_of(errors: &mut FieldErrors, field: &str, label: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.add(field, format!("{label} must be one of: {}", allowed.join(", ")));
    }
}

fn product_stock(errors: &mut FieldErrors, value: i32) {
    if value < 0 {
        errors.add("stock_quantity", "Stock quantity cannot be negative");
    } else if i64::from(value) > MAX_STOCK {
        errors.add("stock_quantity", "Stock quantity must be less than 1,000,000");
    }
}

pub fn validate_new_product(req: &CreateProductRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    required_text(&mut errors, "name", "Product name", &req.name, 2, 100);
    required_text(&mut errors, "category", "Category", &req.category, 1, 50);
    money(&mut errors, "price", "Price", req.price);
    product_stock(&mut errors, req.stock_quantity);
    optional_text(&mut errors, "size", "Size", req.size.as_deref(), 20);
    optional_text(&mut errors, "description", "Description", req.description.as_deref(), 255);
    optional_text(&mut errors, "allergen_info", "Allergen info", req.allergen_info.as_deref(), 255);
    optional_text(&mut errors, "dietary_info", "Dietary info", req.dietary_info.as_deref(), 255);
    errors.into_result()
}

pub fn validate_product_update(req: &UpdateProductRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &req.name {
        required_text(&mut errors, "name", "Product name", name, 2, 100);
    }
    if let Some(category) = &req.category {
        required_text(&mut errors, "category", "Category", category, 1, 50);
    }
    if let Some(price) = req.price {
        money(&mut errors, "price", "Price", price);
    }
    if let Some(stock) = req.stock_quantity {
        product_stock(&mut errors, stock);
    }
    optional_text(&mut errors, "size", "Size", req.size.as_deref(), 20);
    optional_text(&mut errors, "description", "Description", req.description.as_deref(), 255);
    optional_text(&mut errors, "allergen_info", "Allergen info", req.allergen_info.as_deref(), 255);
    optional_text(&mut errors, "dietary_info", "Dietary info", req.dietary_info.as_deref(), 255);
    errors.into_result()
}

pub fn validate_new_ingredient(req: &CreateIngredientRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    required_text(&mut errors, "name", "Ingredient name", &req.name, 2, 100);
    required_text(&mut errors, "unit_of_measure", "Unit of measure", &req.unit_of_measure, 1, 10);
    stock_amount(&mut errors, "current_stock", "Current stock", req.current_stock);
    stock_amount(&mut errors, "reorder_threshold", "Reorder threshold", req.reorder_threshold);
    money(&mut errors, "cost_per_unit", "Cost per unit", req.cost_per_unit);
    errors.into_result()
}

pub fn validate_ingredient_update(req: &UpdateIngredientRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &req.name {
        required_text(&mut errors, "name", "Ingredient name", name, 2, 100);
    }
    if let Some(unit) = &req.unit_of_measure {
        required_text(&mut errors, "unit_of_measure", "Unit of measure", unit, 1, 10);
    }
    if let Some(stock) = req.current_stock {
        stock_amount(&mut errors, "current_stock", "Current stock", stock);
    }
    if let Some(threshold) = req.reorder_threshold {
        stock_amount(&mut errors, "reorder_threshold", "Reorder threshold", threshold);
    }
    if let Some(cost) = req.cost_per_unit {
        money(&mut errors, "cost_per_unit", "Cost per unit", cost);
    }
    errors.into_result()
}

pub fn validate_new_customer(req: &CreateCustomerRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    required_text(&mut errors, "first_name", "First name", &req.first_name, 2, 50);
    required_text(&mut errors, "last_name", "Last name", &req.last_name, 2, 50);

    if let Some(email) = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if !EMAIL_RE.is_match(email) {
            errors.add("email", "Please enter a valid email address");
        }
    }
    if let Some(phone) = req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        if !CUSTOMER_PHONE_RE.is_match(phone) {
            errors.add("phone", "Please enter a valid phone number");
        }
    }
    if let Some(method) = req
        .preferred_contact_method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
    {
        one_of(&mut errors, "preferred_contact_method", "Contact method", method, &CONTACT_METHODS);
    }
    errors.into_result()
}

fn employee_phone(errors: &mut FieldErrors, phone: &str) {
    let phone = phone.trim();
    if !phone.is_empty() && !EMPLOYEE_PHONE_RE.is_match(phone) {
        errors.add("phone", "Phone must look like 905-343-3434");
    }
}

/// Non-negative hourly rate that fits `NUMERIC(10, 2)`.
fn wage_rate(errors: &mut FieldErrors, field: &str, label: &str, rate: Decimal) {
    if rate < Decimal::ZERO {
        errors.add(field, format!("{label} cannot be negative"));
    } else if rate > MAX_WAGE {
        errors.add(field, format!("{label} must be less than 100,000,000"));
    } else if rate.normalize().scale() > 2 {
        errors.add(field, format!("{label} can have at most 2 decimal places"));
    }
}

fn role_id(errors: &mut FieldErrors, id: i32) {
    if Role::from_id(id).is_none() {
        errors.add("role_id", "Role must be 1 (Admin), 2 (Sales Staff) or 3 (Kitchen Staff)");
    }
}

pub fn validate_employee_update(req: &UpdateEmployeeRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(kind) = &req.employment_type {
        one_of(&mut errors, "employment_type", "Employment type", kind, &EMPLOYMENT_TYPES);
    }
    if let Some(phone) = &req.phone {
        employee_phone(&mut errors, phone);
    }
    if let Some(wage) = req.hourly_wage {
        wage_rate(&mut errors, "hourly_wage", "Hourly wage", wage);
    }
    if let Some(status) = &req.status {
        one_of(&mut errors, "status", "Status", status, &EMPLOYEE_STATUSES);
    }
    if let Some(id) = req.role_id {
        role_id(&mut errors, id);
    }
    errors.into_result()
}

pub fn validate_new_employee(req: &CreateEmployeeRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    required_text(&mut errors, "first_name", "First name", &req.first_name, 1, 50);
    required_text(&mut errors, "last_name", "Last name", &req.last_name, 1, 50);
    required_text(&mut errors, "username", "Username", &req.username, 3, 50);
    if req.username.trim().contains(char::is_whitespace) {
        errors.add("username", "Username cannot contain spaces");
    }
    if req.password.chars().count() < 8 {
        errors.add("password", "Password must be at least 8 characters");
    }
    role_id(&mut errors, req.role_id);
    if let Some(kind) = &req.employment_type {
        one_of(&mut errors, "employment_type", "Employment type", kind, &EMPLOYMENT_TYPES);
    }
    if let Some(phone) = &req.phone {
        employee_phone(&mut errors, phone);
    }
    if let Some(wage) = req.hourly_wage {
        wage_rate(&mut errors, "hourly_wage", "Hourly wage", wage);
    }
    errors.into_result()
}

/// Checks the sale form before any database work; `today` bounds the sale date.
pub fn validate_new_sale(req: &CreateSaleRequest, today: NaiveDate) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if req.location_id.is_none() {
        errors.add("location_id", "Please select a location");
    }
    if req.items.is_empty() {
        errors.add("items", "Please add at least one product");
    } else if req
        .items
        .iter()
        .any(|item| item.product_id.is_none() || item.quantity.is_none())
    {
        errors.add("items", "Please complete all product entries");
    } else if req.items.iter().any(|item| item.quantity.unwrap_or(0) < 1) {
        errors.add("items", "Quantity must be at least 1");
    } else {
        let mut seen = Vec::with_capacity(req.items.len());
        for product_id in req.items.iter().filter_map(|item| item.product_id) {
            if seen.contains(&product_id) {
                errors.add("items", format!("Product {product_id} is listed more than once"));
                break;
            }
            seen.push(product_id);
        }
    }
    if let Some(date) = req.sale_date {
        if date > today {
            errors.add("sale_date", "Sale date cannot be in the future");
        }
    }
    if let Some(method) = &req.payment_method {
        one_of(&mut errors, "payment_method", "Payment method", method, &PAYMENT_METHODS);
    }
    errors.into_result()
}

pub fn validate_new_shift(req: &CreateShiftRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if req.hours_worked <= Decimal::ZERO || req.hours_worked > Decimal::from(24) {
        errors.add("hours_worked", "Hours worked must be between 0 and 24");
    } else if req.hours_worked.normalize().scale() > 2 {
        errors.add("hours_worked", "Hours worked can have at most 2 decimal places");
    }
    if let Some(rate) = req.pay_rate {
        wage_rate(&mut errors, "pay_rate", "Pay rate", rate);
    }
    errors.into_result()
}
