mod common;

use aunt_rosies_api::{
    dto::{
        auth::LoginRequest,
        customers::{CreateCustomerRequest, CustomerSearchQuery},
        employees::UpdateEmployeeRequest,
        ingredients::{CreateIngredientRequest, UpdateIngredientRequest},
        timetable::{CreateShiftRequest, TimetableQuery},
    },
    error::AppError,
    inventory::StockLevel,
    middleware::auth::decode_token,
    models::Role,
    services::{
        auth_service, customer_service, employee_service, ingredient_service, report_service,
        timetable_service,
    },
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn ingredient(name: &str, stock: i64, threshold: i64) -> CreateIngredientRequest {
    CreateIngredientRequest {
        name: name.into(),
        unit_of_measure: "kg".into(),
        current_stock: Decimal::from(stock),
        reorder_threshold: Decimal::from(threshold),
        cost_per_unit: Decimal::new(250, 2),
    }
}

// Integration flow: login -> kitchen stock and reorder flags -> shifts -> customers -> dashboard.
#[tokio::test]
async fn kitchen_staff_and_customer_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let admin = common::create_employee(&state, "Rosie", "secret-pass", Role::Admin, "Active").await?;
    let cook = common::create_employee(&state, "cook", "secret-pass", Role::Kitchen, "Active").await?;
    let clerk = common::create_employee(&state, "clerk", "secret-pass", Role::Sales, "Active").await?;
    common::create_employee(&state, "gone", "secret-pass", Role::Sales, "Terminated").await?;
    let location_id = common::create_location(&state, "Farmers Market").await?;

    // Login ignores username case; the token carries the role.
    let login = auth_service::login_employee(
        &state,
        LoginRequest {
            username: "ROSIE".into(),
            password: "secret-pass".into(),
        },
    )
    .await?
    .data
    .unwrap();
    let token = login.token.trim_start_matches("Bearer ");
    let decoded = decode_token(token, &state.auth.jwt_secret)?;
    assert_eq!(decoded.employee_id, admin.employee_id);
    assert_eq!(decoded.role, Role::Admin);

    let err = auth_service::login_employee(
        &state,
        LoginRequest {
            username: "rosie".into(),
            password: "wrong-pass".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = auth_service::login_employee(
        &state,
        LoginRequest {
            username: "gone".into(),
            password: "secret-pass".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Kitchen stock: flour is fine, butter is critical, sugar has no threshold.
    let flour = ingredient_service::create_ingredient(&state, &cook, ingredient("Flour", 25, 10))
        .await?
        .data
        .unwrap();
    let butter = ingredient_service::create_ingredient(&state, &cook, ingredient("Butter", 2, 5))
        .await?
        .data
        .unwrap();
    ingredient_service::create_ingredient(&state, &cook, ingredient("Sugar", 0, 0)).await?;
    assert_eq!(flour.stock_level, StockLevel::Ok);
    assert_eq!(butter.stock_level, StockLevel::Critical);

    let low = ingredient_service::list_low_stock(&state, &cook).await?.data.unwrap();
    let names: Vec<&str> = low.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Butter"]);

    let flour = ingredient_service::update_ingredient(
        &state,
        &cook,
        flour.id,
        UpdateIngredientRequest {
            current_stock: Some(Decimal::from(8)),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(flour.stock_level, StockLevel::Low);
    assert_eq!(ingredient_service::count_low_stock(&state).await?, 2);

    let err = ingredient_service::list_low_stock(&state, &clerk).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Shifts default to the employee's wage and list newest first.
    for day in [3, 5] {
        timetable_service::create_shift(
            &state,
            &admin,
            CreateShiftRequest {
                employee_id: cook.employee_id,
                work_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                hours_worked: Decimal::new(75, 1),
                location_id: Some(location_id),
                pay_rate: None,
            },
        )
        .await?;
    }
    let shifts = timetable_service::list_timetable(
        &state,
        TimetableQuery {
            employee_id: Some(cook.employee_id),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap()
    .items;
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].work_date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    assert_eq!(shifts[0].pay_rate, Decimal::new(1650, 2));
    assert_eq!(shifts[0].location_name.as_deref(), Some("Farmers Market"));

    // Customers: blank optional fields become NULL; search is capped and case-insensitive.
    let customer = customer_service::create_customer(
        &state,
        &clerk,
        CreateCustomerRequest {
            first_name: "  Martha ".into(),
            last_name: "Stewart".into(),
            email: Some("".into()),
            phone: Some("905-343-3434".into()),
            preferred_contact_method: Some("Phone".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(customer.first_name, "Martha");
    assert_eq!(customer.email, None);

    let found = customer_service::search_customers(
        &state,
        &clerk,
        CustomerSearchQuery { q: Some("mart".into()) },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(found.items.len(), 1);

    let none = customer_service::search_customers(&state, &clerk, CustomerSearchQuery::default())
        .await?
        .data
        .unwrap();
    assert!(none.items.is_empty());

    // Dashboard pulls it together for the signed-in employee.
    let dashboard = report_service::dashboard(&state, &cook).await?.data.unwrap();
    assert_eq!(dashboard.employee.id, cook.employee_id);
    assert_eq!(dashboard.low_stock_ingredients, 2);
    assert_eq!(dashboard.totals.quarterly, Decimal::ZERO);
    assert!(dashboard.best_sellers.is_empty());

    // Role and status changes apply to writes before the old tokens expire.
    employee_service::update_employee(
        &state,
        &admin,
        clerk.employee_id,
        UpdateEmployeeRequest {
            role_id: Some(Role::Kitchen.id()),
            ..Default::default()
        },
    )
    .await?;
    let err = customer_service::create_customer(
        &state,
        &clerk,
        CreateCustomerRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            phone: None,
            preferred_contact_method: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    employee_service::update_employee(
        &state,
        &admin,
        cook.employee_id,
        UpdateEmployeeRequest {
            status: Some("Terminated".into()),
            ..Default::default()
        },
    )
    .await?;
    let err = ingredient_service::create_ingredient(&state, &cook, ingredient("Yeast", 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM ingredients")
            .fetch_one(&state.pool)
            .await?,
        3
    );

    Ok(())
}
