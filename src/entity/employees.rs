use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub role_id: i32,
    pub employment_type: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_wage: Decimal,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_hours::Entity")]
    EmployeeHours,
    #[sea_orm(has_many = "super::sales::Entity")]
    Sales,
}

impl Related<super::employee_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeHours.def()
    }
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
