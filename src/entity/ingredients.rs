use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub unit_of_measure: String,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub current_stock: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub reorder_threshold: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost_per_unit: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
