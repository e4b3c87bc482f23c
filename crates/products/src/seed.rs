//! Synthetic product data for development and tests.
//!
//! Not used while serving requests.

use rand::seq::SliceRandom;
use rand::Rng;

use stockroom_core::DomainResult;

use crate::palette::PALETTE;
use crate::ProductFields;

/// Base names a generated product starts with.
pub const CATALOG: [&str; 15] = [
    "Laptop",
    "Smartphone",
    "Tablet",
    "Monitor",
    "Keyboard",
    "Mouse",
    "Headphones",
    "Speaker",
    "Camera",
    "Printer",
    "Router",
    "Cable",
    "Charger",
    "Battery",
    "Stand",
];

const SUFFIXES: [&str; 16] = [
    "Pro", "Max", "Mini", "Air", "Plus", "Lite", "Ultra", "Neo", "Edge", "Core", "Flex", "Prime", "Go", "One", "Studio",
    "Classic",
];

/// Quantity range a factory draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockProfile {
    /// `0..=100`
    #[default]
    Any,
    /// Always `0`.
    OutOfStock,
    /// `50..=200`
    HighStock,
}

/// Random product generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFactory {
    profile: StockProfile,
}

impl ProductFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_of_stock() -> Self {
        Self {
            profile: StockProfile::OutOfStock,
        }
    }

    pub fn high_stock() -> Self {
        Self {
            profile: StockProfile::HighStock,
        }
    }

    pub fn quantity<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match self.profile {
            StockProfile::Any => rng.gen_range(0..=100),
            StockProfile::OutOfStock => 0,
            StockProfile::HighStock => rng.gen_range(50..=200),
        }
    }

    pub fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let base = CATALOG.choose(rng).copied().unwrap_or(CATALOG[0]);
        let suffix = SUFFIXES.choose(rng).copied().unwrap_or(SUFFIXES[0]);
        format!("{base} {suffix}")
    }

    pub fn color<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        PALETTE.choose(rng).map(|c| c.name).unwrap_or(PALETTE[0].name)
    }

    pub fn make<R: Rng + ?Sized>(&self, rng: &mut R) -> ProductFields {
        // Catalog names, palette colors and the profile ranges are all within
        // the validation limits.
        ProductFields {
            name: self.name(rng),
            quantity: self.quantity(rng),
            color: self.color(rng).to_string(),
        }
    }

    pub fn make_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<ProductFields> {
        (0..count).map(|_| self.make(rng)).collect()
    }

    /// A generated product with some attributes pinned.
    pub fn make_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: Option<&str>,
        quantity: Option<i64>,
        color: Option<&str>,
    ) -> DomainResult<ProductFields> {
        let name = name.map(str::to_string).unwrap_or_else(|| self.name(rng));
        let quantity = quantity.unwrap_or_else(|| i64::from(self.quantity(rng)));
        let color = color.unwrap_or_else(|| self.color(rng));
        ProductFields::new(name, quantity, color)
    }
}

/// Demo inventory: 15 random products followed by three well-known ones.
pub fn demo_catalog<R: Rng + ?Sized>(rng: &mut R) -> DomainResult<Vec<ProductFields>> {
    let factory = ProductFactory::new();
    let mut out = factory.make_many(rng, 15);
    out.push(factory.make_with(rng, Some("MacBook Pro 16\""), Some(8), Some("Silver"))?);
    out.push(factory.make_with(rng, Some("iPhone 15 Pro"), Some(0), Some("Black"))?);
    out.push(ProductFactory::out_of_stock().make_with(rng, Some("AirPods Pro"), None, Some("White"))?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::palette;

    #[test]
    fn default_factory_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for fields in ProductFactory::new().make_many(&mut rng, 200) {
            assert!(fields.quantity() <= 100);
            assert!(palette::lookup(fields.color()).is_some());
            let base = fields.name().split(' ').next().unwrap();
            assert!(CATALOG.contains(&base), "unexpected base name {base}");
        }
    }

    #[test]
    fn out_of_stock_is_always_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ProductFactory::out_of_stock().make_many(&mut rng, 50).iter().all(|p| p.quantity() == 0));
    }

    #[test]
    fn high_stock_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for fields in ProductFactory::high_stock().make_many(&mut rng, 200) {
            assert!((50..=200).contains(&fields.quantity()));
        }
    }

    #[test]
    fn same_seed_same_products() {
        let a = ProductFactory::new().make_many(&mut StdRng::seed_from_u64(99), 10);
        let b = ProductFactory::new().make_many(&mut StdRng::seed_from_u64(99), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn demo_catalog_ends_with_known_products() {
        let catalog = demo_catalog(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(catalog.len(), 18);

        let tail: Vec<_> = catalog[15..].iter().map(|p| (p.name(), p.quantity(), p.color())).collect();
        assert_eq!(
            tail,
            vec![
                ("MacBook Pro 16\"", 8, "Silver"),
                ("iPhone 15 Pro", 0, "Black"),
                ("AirPods Pro", 0, "White"),
            ]
        );
    }
}
