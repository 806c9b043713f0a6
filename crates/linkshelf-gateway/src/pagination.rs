//! Page parameters of the `/api/links` listing and the links pointing at
//! neighbouring pages.

use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_PAGE_NUMBER: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 1000;

pub const PAGE_NUMBER_PARAM: &str = "page[number]";
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Reads `page[number]` and `page[size]` from the query string.
    ///
    /// Values that are missing, unparsable or out of range fall back to the
    /// defaults. A page size of zero is kept and yields an empty page.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let number = params
            .get(PAGE_NUMBER_PARAM)
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|number| *number >= 1)
            .map_or(DEFAULT_PAGE_NUMBER, |number| number as usize);

        let size = params
            .get(PAGE_SIZE_PARAM)
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|size| (0..=MAX_PAGE_SIZE as i32).contains(size))
            .map_or(DEFAULT_PAGE_SIZE, |size| size as usize);

        Self { number, size }
    }

    fn total_pages(self, total: usize) -> usize {
        if self.size == 0 {
            0
        } else {
            total.div_ceil(self.size)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Builds the links for `page` of a listing served at `base` holding
    /// `total` records.
    pub fn new(base: &str, page: Page, total: usize) -> Self {
        let href = |number: usize| {
            format!(
                "{base}?{PAGE_NUMBER_PARAM}={number}&{PAGE_SIZE_PARAM}={}",
                page.size
            )
        };
        let total_pages = page.total_pages(total);

        Self {
            first: href(1),
            prev: (page.number > 1).then(|| href(page.number - 1)),
            next: (page.number < total_pages).then(|| href(page.number + 1)),
            last: (total > page.size.saturating_mul(page.number)).then(|| href(total_pages)),
        }
    }
}
