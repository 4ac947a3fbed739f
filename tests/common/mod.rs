#![allow(dead_code)]

use aunt_rosies_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    middleware::auth::AuthUser,
    models::Role,
    services::auth_service::hash_password,
    state::AppState,
};
use rust_decimal::Decimal;

/// Database for flow tests; `None` means the caller should skip.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "flow-test-secret".into(),
        jwt_ttl_hours: 1,
        max_connections: 5,
    };
    let pool = create_pool(database_url, config.max_connections).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE sale_items, sales, employee_hours, customers, ingredients, products, \
         employees, locations, audit_logs RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState::new(pool, &config))
}

pub async fn create_employee(
    state: &AppState,
    username: &str,
    password: &str,
    role: Role,
    status: &str,
) -> anyhow::Result<AuthUser> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO employees (first_name, last_name, username, password_hash, role_id, hourly_wage, status)
        VALUES ('Test', $1, $1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(hash_password(password)?)
    .bind(role.id())
    .bind(Decimal::new(1650, 2))
    .bind(status)
    .fetch_one(&state.pool)
    .await?;

    Ok(AuthUser {
        employee_id: id,
        role,
    })
}

pub async fn create_location(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as("INSERT INTO locations (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(&state.pool)
        .await?;
    Ok(id)
}
