mod common;

use aunt_rosies_api::{
    dto::{
        products::CreateProductRequest,
        reports::SummaryQuery,
        sales::{CreateSaleRequest, SaleLineRequest},
    },
    entity::sales::ActiveModel as SaleActive,
    error::AppError,
    models::Role,
    services::{
        inventory_service::update_product_inventory, product_service, report_service,
        sale_service,
    },
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

fn sale(location_id: i32, product_id: i32, quantity: i32) -> CreateSaleRequest {
    CreateSaleRequest {
        location_id: Some(location_id),
        sale_date: None,
        payment_method: Some("Card".into()),
        customer_id: None,
        items: vec![SaleLineRequest {
            product_id: Some(product_id),
            quantity: Some(quantity),
        }],
    }
}

// Integration flow: admin adds a product -> sales records a sale -> stock and summary move;
// an oversized sale changes nothing; a sold product can no longer be deleted.
#[tokio::test]
async fn sale_decrements_stock_and_feeds_summary() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let admin = common::create_employee(&state, "admin", "secret-pass", Role::Admin, "Active").await?;
    let clerk = common::create_employee(&state, "clerk", "secret-pass", Role::Sales, "Active").await?;
    let location_id = common::create_location(&state, "Main Street Shop").await?;

    let product = product_service::create_product(
        &state,
        &admin,
        CreateProductRequest {
            name: "Apple Pie".into(),
            category: "Pies".into(),
            size: Some("9 inch".into()),
            price: Decimal::new(450, 2),
            stock_quantity: 5,
            description: None,
            allergen_info: Some("Wheat".into()),
            dietary_info: None,
        },
    )
    .await?
    .data
    .unwrap();

    let recorded = sale_service::create_sale(&state, &clerk, sale(location_id, product.id, 2))
        .await?
        .data
        .unwrap();
    assert_eq!(recorded.sale.sale_total, Decimal::new(900, 2));
    assert_eq!(recorded.sale.employee_id, Some(clerk.employee_id));
    assert_eq!(recorded.items.len(), 1);
    assert_eq!(recorded.items[0].unit_price, Decimal::new(450, 2));

    let after = product_service::find_product(&state, product.id).await?;
    assert_eq!(after.stock_quantity, 3);

    let summary = report_service::summary(
        &state,
        SummaryQuery {
            as_of: Some(Utc::now().date_naive()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(summary.totals.daily, Decimal::new(900, 2));
    assert_eq!(summary.totals.quarterly, Decimal::new(900, 2));

    // Not enough stock: nothing is written.
    let err = sale_service::create_sale(&state, &clerk, sale(location_id, product.id, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let (sales,): (i64,) = sqlx::query_as("SELECT count(*) FROM sales")
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(sales, 1);
    let unchanged = product_service::find_product(&state, product.id).await?;
    assert_eq!(unchanged.stock_quantity, 3);

    // The stock guard itself refuses to oversell or take a non-positive quantity.
    let err = update_product_inventory(&state.orm, product.id, 4).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let err = update_product_inventory(&state.orm, product.id, 0).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(product_service::find_product(&state, product.id).await?.stock_quantity, 3);

    // A failing decrement after the sale row is written rolls the sale back.
    {
        let txn = state.orm.begin().await?;
        SaleActive {
            id: NotSet,
            sale_date: Set(Utc::now().into()),
            location_id: Set(location_id),
            payment_method: Set(Some("Cash".into())),
            customer_id: Set(None),
            employee_id: Set(Some(clerk.employee_id)),
            sale_total: Set(Decimal::new(1800, 2)),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        let err = update_product_inventory(&txn, product.id, 4).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        txn.rollback().await?;
    }
    let (sales,): (i64,) = sqlx::query_as("SELECT count(*) FROM sales")
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(sales, 1);

    // The guard succeeds with enough stock.
    update_product_inventory(&state.orm, product.id, 3).await?;
    assert_eq!(product_service::find_product(&state, product.id).await?.stock_quantity, 0);

    // Unknown location is rejected before anything is written.
    let err = sale_service::create_sale(&state, &clerk, sale(location_id + 100, product.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Products with recorded sales stay.
    let err = product_service::delete_product(&state, &admin, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Clerks may not touch the catalogue.
    let err = product_service::delete_product(&state, &clerk, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}
