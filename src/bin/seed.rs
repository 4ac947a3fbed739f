use aunt_rosies_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    models::Role,
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;

const SEED_PASSWORD: &str = "rosie-kitchen";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    seed_locations(&pool).await?;
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| SEED_PASSWORD.to_string());
    ensure_employee(&pool, "admin", "Rosie", "Admin", Role::Admin, &password).await?;
    ensure_employee(&pool, "sales", "Sam", "Seller", Role::Sales, &password).await?;
    ensure_employee(&pool, "kitchen", "Kit", "Baker", Role::Kitchen, &password).await?;
    seed_products(&pool).await?;
    seed_ingredients(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_locations(pool: &DbPool) -> anyhow::Result<()> {
    let locations = [
        ("Main Street Shop", Some("12 Main Street")),
        ("Farmers Market", Some("Market Square, Saturdays")),
        ("Online", None),
    ];
    for (name, address) in locations {
        sqlx::query("INSERT INTO locations (name, address) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .bind(address)
            .execute(pool)
            .await?;
    }
    println!("Seeded locations");
    Ok(())
}

async fn ensure_employee(
    pool: &DbPool,
    username: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
    password: &str,
) -> anyhow::Result<()> {
    let password_hash = hash_password(password)?;
    let inserted = sqlx::query(
        r#"
        INSERT INTO employees (first_name, last_name, username, password_hash, role_id, hourly_wage)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT ((lower(username))) DO NOTHING
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(username)
    .bind(password_hash)
    .bind(role.id())
    .bind(Decimal::new(1800, 2))
    .execute(pool)
    .await?
    .rows_affected();

    if inserted > 0 {
        println!("Created employee {username} (role={})", role.as_str());
    } else {
        println!("Employee {username} already exists");
    }
    Ok(())
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<()> {
    let products = [
        ("Apple Pie", "Pies", Some("9 inch"), Decimal::new(1899, 2), 12, "Wheat, Milk, Eggs"),
        ("Butter Tart", "Tarts", Some("Single"), Decimal::new(325, 2), 48, "Wheat, Milk, Eggs"),
        ("Strawberry Jam", "Preserves", Some("250 ml"), Decimal::new(799, 2), 30, "None"),
        ("Bread and Butter Pickles", "Pickles", Some("500 ml"), Decimal::new(899, 2), 24, "Mustard"),
        ("Cinnamon Loaf", "Breads", Some("Loaf"), Decimal::new(650, 2), 15, "Wheat, Milk"),
    ];

    for (name, category, size, price, stock, allergens) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, category, size, price, stock_quantity, allergen_info)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(size)
        .bind(price)
        .bind(stock)
        .bind(allergens)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_ingredients(pool: &DbPool) -> anyhow::Result<()> {
    let ingredients = [
        ("All-purpose Flour", "kg", Decimal::new(25, 0), Decimal::new(10, 0), Decimal::new(189, 2)),
        ("Butter", "kg", Decimal::new(4, 0), Decimal::new(5, 0), Decimal::new(1050, 2)),
        ("Granulated Sugar", "kg", Decimal::new(12, 0), Decimal::new(8, 0), Decimal::new(145, 2)),
        ("Strawberries", "kg", Decimal::new(15, 1), Decimal::new(6, 0), Decimal::new(720, 2)),
        ("Pickling Vinegar", "l", Decimal::new(20, 0), Decimal::new(5, 0), Decimal::new(230, 2)),
    ];

    for (name, unit, stock, threshold, cost) in ingredients {
        sqlx::query(
            r#"
            INSERT INTO ingredients (name, unit_of_measure, current_stock, reorder_threshold, cost_per_unit)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(unit)
        .bind(stock)
        .bind(threshold)
        .bind(cost)
        .execute(pool)
        .await?;
    }

    println!("Seeded ingredients");
    Ok(())
}
