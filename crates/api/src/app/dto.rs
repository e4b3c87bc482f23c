use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockroom_core::{Page, ValidationErrors};
use stockroom_products::product::{must_be_integer, must_be_string, FIELD_COLOR, FIELD_NAME, FIELD_QUANTITY};
use stockroom_products::{Product, ProductInput};

/// Characters left as-is in query string values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /products`.
///
/// Numbers are taken as raw text so a malformed value falls back to the
/// default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListProductsQuery {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn page(&self) -> Option<u32> {
        parse_number(self.page.as_deref())
    }

    pub fn per_page(&self) -> Option<u32> {
        parse_number(self.per_page.as_deref())
    }
}

fn parse_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

/// Decode a create/update body into raw input plus type errors.
///
/// `name` and `color` must be JSON strings. `quantity` may be a JSON integer
/// or a string holding one (HTML form style). Missing or `null` fields are
/// left for validation to report as required.
pub fn product_input_from_json(body: &Value) -> (ProductInput, ValidationErrors) {
    let mut errors = ValidationErrors::new();
    let field = |name: &str| body.get(name).filter(|v| !v.is_null());

    let name = text(field(FIELD_NAME), FIELD_NAME, &mut errors);
    let color = text(field(FIELD_COLOR), FIELD_COLOR, &mut errors);

    let quantity = match field(FIELD_QUANTITY) {
        None => None,
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(q), _, _) => Some(q),
            // Beyond i64: still an integer, just far too large.
            (None, Some(_), _) => Some(i64::MAX),
            // `5.0` is an integer; the cast saturates out-of-range values.
            (None, None, Some(f)) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            _ => {
                errors.add(FIELD_QUANTITY, must_be_integer(FIELD_QUANTITY));
                None
            }
        },
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(q) => Some(q),
            Err(_) => {
                errors.add(FIELD_QUANTITY, must_be_integer(FIELD_QUANTITY));
                None
            }
        },
        Some(_) => {
            errors.add(FIELD_QUANTITY, must_be_integer(FIELD_QUANTITY));
            None
        }
    };

    (ProductInput { name, quantity, color }, errors)
}

fn text(value: Option<&Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, must_be_string(field));
            None
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PageLinkDto {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductPageDto {
    pub data: Vec<Product>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub links: Vec<PageLinkDto>,
}

/// Listing response; link urls keep the caller's search and explicit page size.
pub fn product_page_to_dto(page: Page<Product>, query: &ListProductsQuery) -> ProductPageDto {
    let links = page
        .links()
        .into_iter()
        .map(|link| PageLinkDto {
            url: link.page.map(|n| page_url(n, query)),
            label: link.label.to_string(),
            active: link.active,
        })
        .collect();

    ProductPageDto {
        current_page: page.current_page,
        last_page: page.last_page(),
        per_page: page.per_page,
        total: page.total,
        from: page.from(),
        to: page.to(),
        links,
        data: page.items,
    }
}

pub fn page_url(page: u32, query: &ListProductsQuery) -> String {
    let mut url = format!("/products?page={page}");
    if let Some(search) = query.search() {
        url.push_str("&search=");
        url.extend(utf8_percent_encode(search, QUERY_VALUE));
    }
    if let Some(per_page) = query.per_page() {
        url.push_str(&format!("&per_page={per_page}"));
    }
    url
}
