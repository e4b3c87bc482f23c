//! Printable single-product report.
//!
//! `render` derives everything the report shows from a product and the
//! generation time (pure). `ReportRenderer` turns that into a self-contained
//! HTML page that opens the print dialog on load.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context as TeraContext, Tera};
use thiserror::Error;

use stockroom_core::Timestamped;

use crate::palette::Swatch;
use crate::stock::{StockAlert, StockStatus};
use crate::Product;

const TEMPLATE_NAME: &str = "product_report.html";
const TEMPLATE: &str = include_str!("../templates/product_report.html");

const DATE_FORMAT: &str = "%B %-d, %Y";
const DATE_TIME_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report template error: {0}")]
    Template(#[from] tera::Error),
}

/// Everything a product report displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductReport {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub quantity: u32,
    pub stock_status: StockStatus,
    pub stock_label: &'static str,
    pub stock_class: &'static str,
    pub alert: Option<StockAlert>,
    pub swatch: Swatch,
    pub created_on: String,
    pub updated_on: String,
    pub generated_at: DateTime<Utc>,
    pub generated_on: String,
}

pub fn render(product: &Product, generated_at: DateTime<Utc>) -> ProductReport {
    let status = product.stock_status();
    ProductReport {
        id: product.id_typed().as_i64(),
        name: product.name().to_string(),
        color: product.color().to_string(),
        quantity: product.quantity(),
        stock_status: status,
        stock_label: status.label(),
        stock_class: status.css_class(),
        alert: status.alert(),
        swatch: product.swatch(),
        created_on: product.created_at().format(DATE_FORMAT).to_string(),
        updated_on: product.updated_at().format(DATE_FORMAT).to_string(),
        generated_at,
        generated_on: generated_at.format(DATE_TIME_FORMAT).to_string(),
    }
}

pub fn render_now(product: &Product) -> ProductReport {
    render(product, Utc::now())
}

/// HTML renderer for [`ProductReport`]s (template compiled once).
#[derive(Debug)]
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render_html(&self, report: &ProductReport) -> Result<String, ReportError> {
        let mut context = TeraContext::new();
        context.insert("report", report);
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    pub fn render_product(&self, product: &Product, generated_at: DateTime<Utc>) -> Result<String, ReportError> {
        self.render_html(&render(product, generated_at))
    }
}
