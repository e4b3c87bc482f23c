//! Stock status derived from quantity.

use serde::{Deserialize, Serialize};

/// Quantities strictly below this are "low stock".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0 => StockStatus::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// Restocking alert shown on reports, if any.
    pub fn alert(self) -> Option<StockAlert> {
        match self {
            StockStatus::OutOfStock => Some(StockAlert {
                title: "Stock Alert: Out of Stock!",
                detail: "This product is completely out of stock and requires immediate restocking.",
            }),
            StockStatus::LowStock => Some(StockAlert {
                title: "Stock Alert: Low Inventory!",
                detail: "This product has low inventory levels and may need restocking soon.",
            }),
            StockStatus::InStock => None,
        }
    }

    /// CSS modifier used by the printable report.
    pub fn css_class(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "stock-out",
            StockStatus::LowStock => "stock-low",
            StockStatus::InStock => "stock-in",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockAlert {
    pub title: &'static str,
    pub detail: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thresholds() {
        assert_eq!(StockStatus::from_quantity(0).label(), "Out of Stock");
        assert_eq!(StockStatus::from_quantity(1).label(), "Low Stock");
        assert_eq!(StockStatus::from_quantity(9).label(), "Low Stock");
        assert_eq!(StockStatus::from_quantity(10).label(), "In Stock");
        assert_eq!(StockStatus::from_quantity(u32::MAX).label(), "In Stock");
    }

    #[test]
    fn alerts_only_below_threshold() {
        assert!(StockStatus::InStock.alert().is_none());
        assert_eq!(StockStatus::OutOfStock.alert().unwrap().title, "Stock Alert: Out of Stock!");
        assert_eq!(StockStatus::LowStock.alert().unwrap().title, "Stock Alert: Low Inventory!");
    }

    proptest! {
        #[test]
        fn low_stock_band(q in 1u32..LOW_STOCK_THRESHOLD) {
            prop_assert_eq!(StockStatus::from_quantity(q), StockStatus::LowStock);
        }

        #[test]
        fn in_stock_band(q in LOW_STOCK_THRESHOLD..=u32::MAX) {
            prop_assert_eq!(StockStatus::from_quantity(q), StockStatus::InStock);
        }
    }
}
