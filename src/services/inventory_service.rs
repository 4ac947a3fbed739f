use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::{
    entity::products::{Column, Entity as Products},
    error::{AppError, AppResult},
};

/// Takes `quantity` units of a product out of stock.
///
/// The decrement is a single conditional UPDATE, so stock can never go below zero even
/// without a row lock. Run it on the sale's transaction so a failure rolls the sale back.
pub async fn update_product_inventory<C>(conn: &C, product_id: i32, quantity: i32) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }

    let result = Products::update_many()
        .col_expr(
            Column::StockQuantity,
            Expr::col(Column::StockQuantity).sub(quantity),
        )
        .filter(Column::Id.eq(product_id))
        .filter(Column::StockQuantity.gte(quantity))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::BadRequest(format!(
            "Insufficient stock for product {product_id}"
        )));
    }

    tracing::debug!(product_id, quantity, "inventory decremented");
    Ok(())
}
