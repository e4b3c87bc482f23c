//! Products domain module.
//!
//! Business rules for product records, implemented as deterministic domain
//! logic (no IO, no HTTP, no storage): input validation, derived stock status,
//! the shared color palette, the printable report and fixture generation.

pub mod palette;
pub mod product;
pub mod report;
pub mod seed;
pub mod stock;

pub use palette::{PaletteColor, Swatch, PALETTE};
pub use product::{Product, ProductFields, ProductInput, MAX_QUANTITY, MAX_TEXT_LEN};
pub use report::{ProductReport, ReportError, ReportRenderer};
pub use seed::{demo_catalog, ProductFactory, StockProfile};
pub use stock::{StockAlert, StockStatus};
