use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Restock flag shown next to an ingredient, derived from stock and its reorder threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Critical,
    Low,
    Ok,
}

impl StockLevel {
    /// `critical` at or below half the threshold, `low` at or below the threshold.
    /// A zero threshold never flags.
    pub fn classify(current_stock: Decimal, reorder_threshold: Decimal) -> Self {
        if reorder_threshold <= Decimal::ZERO {
            return StockLevel::Ok;
        }
        if current_stock * Decimal::from(2) <= reorder_threshold {
            StockLevel::Critical
        } else if current_stock <= reorder_threshold {
            StockLevel::Low
        } else {
            StockLevel::Ok
        }
    }

    pub fn needs_reorder(self) -> bool {
        !matches!(self, StockLevel::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    #[test]
    fn half_threshold_is_critical() {
        assert_eq!(StockLevel::classify(d("5"), d("10")), StockLevel::Critical);
        assert_eq!(StockLevel::classify(d("0"), d("10")), StockLevel::Critical);
    }

    #[test]
    fn at_threshold_is_low() {
        assert_eq!(StockLevel::classify(d("10"), d("10")), StockLevel::Low);
        assert_eq!(StockLevel::classify(d("5.001"), d("10")), StockLevel::Low);
    }

    #[test]
    fn above_threshold_is_ok() {
        assert_eq!(StockLevel::classify(d("10.5"), d("10")), StockLevel::Ok);
        assert!(!StockLevel::classify(d("11"), d("10")).needs_reorder());
    }

    #[test]
    fn zero_threshold_never_flags() {
        assert_eq!(StockLevel::classify(d("0"), d("0")), StockLevel::Ok);
        assert_eq!(StockLevel::classify(d("3"), d("0")), StockLevel::Ok);
    }
}
