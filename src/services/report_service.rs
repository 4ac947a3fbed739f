use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    dto::reports::{Dashboard, DailySales, DateRangeQuery, LocationSales, SalesSummary, SummaryQuery},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    reports::{
        self, ItemRecord, MONTHLY_WINDOW, QUARTERLY_WINDOW, SaleRecord, day_bounds, window_start,
    },
    response::{ApiResponse, Meta},
    services::{auth_service, ingredient_service},
    state::AppState,
};

const BEST_SELLER_COUNT: usize = 5;

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    sale_date: DateTime<Utc>,
    sale_total: Decimal,
    location: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    product_id: i32,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
}

pub async fn summary(
    state: &AppState,
    query: SummaryQuery,
) -> AppResult<ApiResponse<SalesSummary>> {
    let as_of = query.as_of.unwrap_or_else(today);
    let records = load_sales(&state.pool, window_start(as_of, QUARTERLY_WINDOW), as_of).await?;
    let totals = reports::rolling_totals(&records, as_of);

    Ok(ApiResponse::success(
        "Sales summary",
        SalesSummary { as_of, totals },
        Some(Meta::count(records.len())),
    ))
}

pub async fn daily(state: &AppState, query: DateRangeQuery) -> AppResult<ApiResponse<DailySales>> {
    let (from, to) = resolve_range(query.from, query.to, today())?;
    let records = load_sales(&state.pool, from, to).await?;
    let days = reports::daily_totals(&records);

    Ok(ApiResponse::success(
        "Daily sales",
        DailySales { from, to, days },
        Some(Meta::count(records.len())),
    ))
}

pub async fn by_location(
    state: &AppState,
    query: DateRangeQuery,
) -> AppResult<ApiResponse<LocationSales>> {
    let (from, to) = resolve_range(query.from, query.to, today())?;
    let records = load_sales(&state.pool, from, to).await?;
    let locations = reports::location_totals(&records);
    let top_location = reports::top_location(&locations).cloned();

    Ok(ApiResponse::success(
        "Sales by location",
        LocationSales {
            from,
            to,
            locations,
            top_location,
        },
        Some(Meta::count(records.len())),
    ))
}

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    let as_of = today();
    let employee = auth_service::current_employee(state, user).await?;

    let records = load_sales(&state.pool, window_start(as_of, QUARTERLY_WINDOW), as_of).await?;
    let totals = reports::rolling_totals(&records, as_of);

    let month_start = window_start(as_of, MONTHLY_WINDOW);
    let recent: Vec<SaleRecord> = records
        .into_iter()
        .filter(|record| record.sale_date >= month_start)
        .collect();
    let top_location = reports::top_location(&reports::location_totals(&recent)).cloned();

    let items = load_items(&state.pool, month_start, as_of).await?;
    let mut best_sellers = reports::product_totals(&items);
    best_sellers.truncate(BEST_SELLER_COUNT);

    let low_stock_ingredients = ingredient_service::count_low_stock(state).await?;

    Ok(ApiResponse::success(
        "Dashboard",
        Dashboard {
            employee,
            as_of,
            totals,
            top_location,
            low_stock_ingredients,
            best_sellers,
        },
        Some(Meta::empty()),
    ))
}

/// Sales dated `from` through `to` inclusive, joined with their location name.
pub async fn load_sales(pool: &DbPool, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<SaleRecord>> {
    let (start, end) = day_bounds(from, to);
    let rows = sqlx::query_as::<_, SaleRow>(
        r#"
        SELECT s.sale_date, s.sale_total, l.name AS location
        FROM sales s
        LEFT JOIN locations l ON l.id = s.location_id
        WHERE s.sale_date >= $1 AND s.sale_date < $2
        ORDER BY s.sale_date, s.id
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SaleRecord {
            sale_date: row.sale_date.date_naive(),
            location: row.location,
            total: row.sale_total,
        })
        .collect())
}

async fn load_items(pool: &DbPool, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<ItemRecord>> {
    let (start, end) = day_bounds(from, to);
    let rows = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT si.product_id, p.name AS product_name, si.quantity_sold AS quantity, si.unit_price
        FROM sale_items si
        JOIN sales s ON s.id = si.sale_id
        JOIN products p ON p.id = si.product_id
        WHERE s.sale_date >= $1 AND s.sale_date < $2
        ORDER BY s.sale_date, si.id
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ItemRecord {
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
        })
        .collect())
}

/// Fills in the default 30-day range ending today and rejects inverted ranges.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let to = to.unwrap_or(today);
    let from = from.unwrap_or_else(|| window_start(to, MONTHLY_WINDOW));
    if from > to {
        return Err(AppError::BadRequest("`from` must not be after `to`".into()));
    }
    Ok((from, to))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn range_defaults_to_last_thirty_days() {
        let (from, to) = resolve_range(None, None, date(3, 31)).unwrap();
        assert_eq!((from, to), (date(3, 2), date(3, 31)));
    }

    #[test]
    fn range_default_start_follows_explicit_end() {
        let (from, to) = resolve_range(None, Some(date(2, 28)), date(3, 31)).unwrap();
        assert_eq!((from, to), (date(1, 30), date(2, 28)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = resolve_range(Some(date(3, 10)), Some(date(3, 9)), date(3, 31)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
