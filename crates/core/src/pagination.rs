//! Page-number pagination.
//!
//! Listings are addressed by a 1-based page number and a page size. A `Page`
//! carries everything a listing UI needs to draw its controls, including an
//! ordered sequence of [`PageLink`]s (previous, numbered pages with an ellipsis
//! window, next).

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Number of page links shown on each side of the current page once the
/// listing is long enough to need an ellipsis window.
pub const ON_EACH_SIDE: u32 = 3;

/// Pagination parameters (1-based page number + page size).
///
/// Always clamped, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: Option<u32>,
    per_page: Option<u32>,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page, raw.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping the page to `>= 1` and the page size to
    /// `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self::with_default_size(page, per_page, DEFAULT_PER_PAGE)
    }

    /// Like [`PageRequest::new`] but with a caller-chosen default page size.
    pub fn with_default_size(page: Option<u32>, per_page: Option<u32>, default_size: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_size).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// One page of a listing plus the totals needed to navigate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            current_page: request.page(),
            per_page: request.per_page(),
            total,
        }
    }

    /// Last page number; an empty listing still has one (empty) page.
    pub fn last_page(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        let pages = self.total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based position of the first item on this page.
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.offset() + 1)
    }

    /// 1-based position of the last item on this page.
    pub fn to(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.offset() + self.items.len() as u64)
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
        }
    }

    fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Navigation links: previous, numbered pages (with ellipsis gaps), next.
    pub fn links(&self) -> Vec<PageLink> {
        let current = self.current_page;
        let mut links = Vec::new();

        links.push(PageLink {
            label: LinkLabel::Previous,
            page: (current > 1).then(|| current - 1),
            active: false,
        });

        for element in window(current, self.last_page()) {
            match element {
                WindowElement::Page(n) => links.push(PageLink {
                    label: LinkLabel::Page(n),
                    page: Some(n),
                    active: n == current,
                }),
                WindowElement::Gap => links.push(PageLink {
                    label: LinkLabel::Ellipsis,
                    page: None,
                    active: false,
                }),
            }
        }

        links.push(PageLink {
            label: LinkLabel::Next,
            page: self.has_more_pages().then(|| current + 1),
            active: false,
        });

        links
    }
}

/// Label of a pagination link (neutral text, no markup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLabel {
    Previous,
    Next,
    Page(u32),
    Ellipsis,
}

impl core::fmt::Display for LinkLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkLabel::Previous => f.write_str("Previous"),
            LinkLabel::Next => f.write_str("Next"),
            LinkLabel::Page(n) => write!(f, "{n}"),
            LinkLabel::Ellipsis => f.write_str("..."),
        }
    }
}

/// A single pagination control. `page` is `None` for disabled controls
/// (previous on the first page, next on the last page, ellipsis gaps).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub label: LinkLabel,
    pub page: Option<u32>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowElement {
    Page(u32),
    Gap,
}

fn window(current: u32, last: u32) -> Vec<WindowElement> {
    let pages = |from: u32, to: u32| (from..=to).map(WindowElement::Page);
    let window = ON_EACH_SIDE + 4;

    if last < ON_EACH_SIDE * 2 + 8 {
        return pages(1, last).collect();
    }

    let mut out = Vec::new();
    if current <= window {
        out.extend(pages(1, window + ON_EACH_SIDE));
        out.push(WindowElement::Gap);
        out.extend(pages(last - 1, last));
    } else if current > last - window {
        out.extend(pages(1, 2));
        out.push(WindowElement::Gap);
        out.extend(pages(last - (window + ON_EACH_SIDE - 1), last));
    } else {
        out.extend(pages(1, 2));
        out.push(WindowElement::Gap);
        out.extend(pages(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        out.push(WindowElement::Gap);
        out.extend(pages(last - 1, last));
    }
    out
}
