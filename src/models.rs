use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity, error::AppError, inventory::StockLevel};

/// Staff role; the numeric id is what `employees.role_id` stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Sales,
    Kitchen,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Sales, Role::Kitchen];

    pub fn id(self) -> i32 {
        match self {
            Role::Admin => 1,
            Role::Sales => 2,
            Role::Kitchen => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Kitchen => "kitchen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub allergen_info: Option<String>,
    pub dietary_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::products::Model> for Product {
    fn from(model: entity::products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            size: model.size,
            price: model.price,
            stock_quantity: model.stock_quantity,
            description: model.description,
            allergen_info: model.allergen_info,
            dietary_info: model.dietary_info,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub unit_of_measure: String,
    #[schema(value_type = String)]
    pub current_stock: Decimal,
    #[schema(value_type = String)]
    pub reorder_threshold: Decimal,
    #[schema(value_type = String)]
    pub cost_per_unit: Decimal,
    pub stock_level: StockLevel,
    pub created_at: DateTime<Utc>,
}

impl From<entity::ingredients::Model> for Ingredient {
    fn from(model: entity::ingredients::Model) -> Self {
        Self {
            stock_level: StockLevel::classify(model.current_stock, model.reorder_threshold),
            id: model.id,
            name: model.name,
            unit_of_measure: model.unit_of_measure,
            current_stock: model.current_stock,
            reorder_threshold: model.reorder_threshold,
            cost_per_unit: model.cost_per_unit,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Sale {
    pub id: i32,
    pub sale_date: DateTime<Utc>,
    pub location_id: i32,
    pub payment_method: Option<String>,
    pub customer_id: Option<i32>,
    pub employee_id: Option<i32>,
    #[schema(value_type = String)]
    pub sale_total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<entity::sales::Model> for Sale {
    fn from(model: entity::sales::Model) -> Self {
        Self {
            id: model.id,
            sale_date: model.sale_date.with_timezone(&Utc),
            location_id: model.location_id,
            payment_method: model.payment_method,
            customer_id: model.customer_id,
            employee_id: model.employee_id,
            sale_total: model.sale_total,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity_sold: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub line_total: Decimal,
}

impl From<entity::sale_items::Model> for SaleItem {
    fn from(model: entity::sale_items::Model) -> Self {
        Self {
            line_total: model.unit_price * Decimal::from(model.quantity_sold),
            id: model.id,
            sale_id: model.sale_id,
            product_id: model.product_id,
            quantity_sold: model.quantity_sold,
            unit_price: model.unit_price,
        }
    }
}

/// Employee as exposed over the API; the password hash never leaves the service layer.
#[derive(Debug, Serialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: Role,
    pub role_id: i32,
    pub employment_type: String,
    pub phone: Option<String>,
    #[schema(value_type = String)]
    pub hourly_wage: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entity::employees::Model> for Employee {
    type Error = AppError;

    fn try_from(model: entity::employees::Model) -> Result<Self, Self::Error> {
        let role = Role::from_id(model.role_id).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "employee {} has unknown role id {}",
                model.id,
                model.role_id
            ))
        })?;
        Ok(Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            username: model.username,
            role,
            role_id: model.role_id,
            employment_type: model.employment_type,
            phone: model.phone,
            hourly_wage: model.hourly_wage,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

impl From<entity::locations::Model> for Location {
    fn from(model: entity::locations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::customers::Model> for Customer {
    fn from(model: entity::customers::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            preferred_contact_method: model.preferred_contact_method,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// One timetable row: a shift joined with the employee and location names.
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct TimetableEntry {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: Option<String>,
    pub work_date: NaiveDate,
    #[schema(value_type = String)]
    pub hours_worked: Decimal,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
    #[schema(value_type = String)]
    pub pay_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_round_trip_through_storage_values() {
        assert_eq!(Role::from_id(1), Some(Role::Admin));
        assert_eq!(Role::from_id(2), Some(Role::Sales));
        assert_eq!(Role::from_id(3), Some(Role::Kitchen));
        assert_eq!(Role::from_id(4), None);
        assert_eq!(Role::parse("kitchen"), Some(Role::Kitchen));
        assert_eq!(Role::parse("Kitchen"), None);
    }
}
