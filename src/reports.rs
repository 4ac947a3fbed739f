//! Sales aggregation behind the sales tracker, location chart and dashboard.
//!
//! Everything here is pure: services load rows, convert them to [`SaleRecord`] /
//! [`ItemRecord`] and hand them over. Windows are counted in whole calendar days ending
//! on `today` inclusive, so a 7-day window on the 14th covers the 8th through the 14th.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

pub const UNKNOWN_LOCATION: &str = "Unknown";

pub const DAILY_WINDOW: u64 = 1;
pub const WEEKLY_WINDOW: u64 = 7;
pub const MONTHLY_WINDOW: u64 = 30;
pub const QUARTERLY_WINDOW: u64 = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sale_date: NaiveDate,
    pub location: Option<String>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SalesTotals {
    #[schema(value_type = String)]
    pub daily: Decimal,
    #[schema(value_type = String)]
    pub weekly: Decimal,
    #[schema(value_type = String)]
    pub monthly: Decimal,
    #[schema(value_type = String)]
    pub quarterly: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyTotal {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub sales: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LocationTotal {
    pub location: String,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub sales: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductTotal {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i64,
    #[schema(value_type = String)]
    pub revenue: Decimal,
}

/// First day covered by a window of `days` days ending on `today`.
pub fn window_start(today: NaiveDate, days: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(NaiveDate::MIN)
}

/// Midnight UTC at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open timestamp range `[from 00:00, to + 1 day 00:00)` covering both days.
pub fn day_bounds(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = to.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    (start_of_day(from), start_of_day(end))
}

/// Sums sales into the daily / 7-day / 30-day / 90-day windows ending on `today`.
/// Sales dated after `today` are not counted.
pub fn rolling_totals(records: &[SaleRecord], today: NaiveDate) -> SalesTotals {
    let weekly_start = window_start(today, WEEKLY_WINDOW);
    let monthly_start = window_start(today, MONTHLY_WINDOW);
    let quarterly_start = window_start(today, QUARTERLY_WINDOW);

    let mut totals = SalesTotals::default();
    for record in records.iter().filter(|r| r.sale_date <= today) {
        let date = record.sale_date;
        if date == today {
            totals.daily += record.total;
        }
        if date >= weekly_start {
            totals.weekly += record.total;
        }
        if date >= monthly_start {
            totals.monthly += record.total;
        }
        if date >= quarterly_start {
            totals.quarterly += record.total;
        }
    }
    totals
}

/// Groups sales by calendar day, oldest first. Days without sales are omitted.
pub fn daily_totals(records: &[SaleRecord]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, u32)> = BTreeMap::new();
    for record in records {
        let entry = by_day.entry(record.sale_date).or_default();
        entry.0 += record.total;
        entry.1 += 1;
    }
    by_day
        .into_iter()
        .map(|(date, (total, sales))| DailyTotal { date, total, sales })
        .collect()
}

/// Sums sales per location in first-seen order; rows without a location count as "Unknown".
pub fn location_totals(records: &[SaleRecord]) -> Vec<LocationTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<LocationTotal> = Vec::new();

    for record in records {
        let name = record.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
        let slot = *index.entry(name).or_insert_with(|| {
            totals.push(LocationTotal {
                location: name.to_string(),
                total: Decimal::ZERO,
                sales: 0,
            });
            totals.len() - 1
        });
        totals[slot].total += record.total;
        totals[slot].sales += 1;
    }
    totals
}

/// Highest-grossing location. On a tie the earlier entry wins.
pub fn top_location(totals: &[LocationTotal]) -> Option<&LocationTotal> {
    totals.iter().fold(None, |best, current| match best {
        Some(best) if current.total <= best.total => Some(best),
        _ => Some(current),
    })
}

/// Quantity and revenue per product, best sellers first (ties keep first-seen order).
pub fn product_totals(items: &[ItemRecord]) -> Vec<ProductTotal> {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut totals: Vec<ProductTotal> = Vec::new();

    for item in items {
        let slot = *index.entry(item.product_id).or_insert_with(|| {
            totals.push(ProductTotal {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: 0,
                revenue: Decimal::ZERO,
            });
            totals.len() - 1
        });
        totals[slot].quantity += i64::from(item.quantity);
        totals[slot].revenue += item.unit_price * Decimal::from(item.quantity);
    }
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn sale(on: NaiveDate, location: Option<&str>, total: &str) -> SaleRecord {
        SaleRecord {
            sale_date: on,
            location: location.map(str::to_string),
            total: d(total),
        }
    }

    fn sample(today: NaiveDate) -> Vec<SaleRecord> {
        let ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap();
        vec![
            sale(today, Some("Market"), "10.00"),
            sale(today, Some("Farm Stand"), "5.50"),
            sale(ago(6), Some("Market"), "20.00"),
            sale(ago(7), None, "7.25"),
            sale(ago(29), Some("Farm Stand"), "30.00"),
            sale(ago(30), Some("Market"), "1.00"),
            sale(ago(89), Some("Market"), "2.00"),
            sale(ago(90), Some("Market"), "100.00"),
            sale(today.succ_opt().unwrap(), Some("Market"), "999.00"),
        ]
    }

    #[test]
    fn rolling_windows_match_hand_totals() {
        let today = date(31);
        let totals = rolling_totals(&sample(today), today);

        assert_eq!(totals.daily, d("15.50"));
        // today + 6 days ago; 7 days ago falls outside a 7-day window
        assert_eq!(totals.weekly, d("35.50"));
        assert_eq!(totals.monthly, d("72.75"));
        assert_eq!(totals.quarterly, d("75.75"));
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        let totals = rolling_totals(&[], date(1));
        assert_eq!(totals, SalesTotals::default());
        assert!(location_totals(&[]).is_empty());
        assert!(top_location(&[]).is_none());
    }

    #[test]
    fn window_start_is_inclusive_of_today() {
        assert_eq!(window_start(date(14), 1), date(14));
        assert_eq!(window_start(date(14), 7), date(8));
    }

    #[test]
    fn daily_totals_group_and_sort_by_day() {
        let records = vec![
            sale(date(3), Some("Market"), "4.00"),
            sale(date(1), Some("Market"), "1.00"),
            sale(date(3), None, "2.50"),
        ];
        let days = daily_totals(&records);
        assert_eq!(
            days,
            vec![
                DailyTotal {
                    date: date(1),
                    total: d("1.00"),
                    sales: 1
                },
                DailyTotal {
                    date: date(3),
                    total: d("6.50"),
                    sales: 2
                },
            ]
        );
    }

    #[test]
    fn location_totals_keep_first_seen_order_and_unknown_bucket() {
        let records = vec![
            sale(date(1), Some("Market"), "10.00"),
            sale(date(1), None, "3.00"),
            sale(date(2), Some("Farm Stand"), "4.00"),
            sale(date(2), Some("Market"), "2.00"),
            sale(date(3), None, "1.00"),
        ];
        let totals = location_totals(&records);
        let names: Vec<&str> = totals.iter().map(|t| t.location.as_str()).collect();
        assert_eq!(names, vec!["Market", UNKNOWN_LOCATION, "Farm Stand"]);
        assert_eq!(totals[0].total, d("12.00"));
        assert_eq!(totals[0].sales, 2);
        assert_eq!(totals[1].total, d("4.00"));

        assert_eq!(top_location(&totals).unwrap().location, "Market");
    }

    #[test]
    fn top_location_tie_keeps_first() {
        let records = vec![
            sale(date(1), Some("Farm Stand"), "8.00"),
            sale(date(1), Some("Market"), "8.00"),
        ];
        let totals = location_totals(&records);
        assert_eq!(top_location(&totals).unwrap().location, "Farm Stand");
    }

    #[test]
    fn product_totals_rank_by_quantity() {
        let item = |id, name: &str, quantity, price: &str| ItemRecord {
            product_id: id,
            product_name: name.to_string(),
            quantity,
            unit_price: d(price),
        };
        let items = vec![
            item(1, "Apple Pie", 1, "12.00"),
            item(2, "Butter Tart", 6, "2.50"),
            item(1, "Apple Pie", 2, "12.00"),
            item(3, "Strawberry Jam", 3, "6.00"),
        ];
        let totals = product_totals(&items);
        assert_eq!(totals[0].product_name, "Butter Tart");
        assert_eq!(totals[0].revenue, d("15.00"));
        assert_eq!(totals[1].product_id, 1);
        assert_eq!(totals[1].quantity, 3);
        assert_eq!(totals[1].revenue, d("36.00"));
        // tie on quantity 3: Apple Pie was seen first
        assert_eq!(totals[2].product_name, "Strawberry Jam");
    }

    #[test]
    fn day_bounds_cover_whole_days() {
        let (start, end) = day_bounds(date(10), date(12));
        assert_eq!(start.to_rfc3339(), "2025-03-10T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-13T00:00:00+00:00");
    }
}
