use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

pub const BRAND: &str = "Aunt Rosie's Kitchen";

pub const DISCLAIMER: &str = "Disclaimer: This product is manufactured in compliance with all \
applicable food and health safety regulations. Please consult your healthcare provider if you \
have any concerns regarding allergens or dietary restrictions.";

pub const CONTAINS: &str = "This product contains: Water, Salt, Sugar, Natural Flavors, Spices, \
Preservatives, Antioxidants, Emulsifiers, Stabilizers, and a blend of common food additives.";

/// `$12.50` style price, rounded half away from zero to cents.
pub fn format_price(price: Decimal) -> String {
    let cents = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductLabel {
    pub product_id: i32,
    pub title: String,
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    pub price: String,
    pub description: Option<String>,
    pub allergen_info: Option<String>,
    pub dietary_info: Option<String>,
    pub disclaimer: String,
    pub contains: String,
    pub footer: String,
}

impl ProductLabel {
    pub fn for_product(product: &Product, year: i32) -> Self {
        Self {
            product_id: product.id,
            title: BRAND.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            size: product.size.clone(),
            price: format_price(product.price),
            description: product.description.clone(),
            allergen_info: product.allergen_info.clone(),
            dietary_info: product.dietary_info.clone(),
            disclaimer: DISCLAIMER.to_string(),
            contains: CONTAINS.to_string(),
            footer: format!("\u{a9} {year} {BRAND}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn prices_render_with_two_decimals() {
        assert_eq!(format_price(Decimal::new(125, 1)), "$12.50");
        assert_eq!(format_price(Decimal::new(7, 0)), "$7.00");
        assert_eq!(format_price(Decimal::new(1005, 3)), "$1.01");
    }

    #[test]
    fn label_carries_product_fields_and_footer() {
        let product = Product {
            id: 4,
            name: "Hot Horseradish".into(),
            category: "Preserves".into(),
            size: Some("250ml".into()),
            price: Decimal::new(699, 2),
            stock_quantity: 12,
            description: None,
            allergen_info: Some("Contains: mustard".into()),
            dietary_info: Some("Vegan".into()),
            created_at: Utc::now(),
        };

        let label = ProductLabel::for_product(&product, 2025);
        assert_eq!(label.price, "$6.99");
        assert_eq!(label.name, "Hot Horseradish");
        assert_eq!(label.footer, "\u{a9} 2025 Aunt Rosie's Kitchen");
        assert!(label.disclaimer.starts_with("Disclaimer:"));
    }
}
