//! Offset pagination primitives shared by listing endpoints.
//!
//! A listing is described by a [`PageWindow`]: the requested page, the fixed
//! page size and the number of items matching the active filter. The window
//! knows how many pages exist, which slice of the ordered result set the
//! requested page covers and whether the request points past the last page
//! and must be redirected.
//!
//! # Example
//!
//! ```
//! use pagination::{PageNumber, PagePlacement, PageSize, PageWindow};
//!
//! let size = PageSize::new(6).expect("non-zero size");
//! let window = PageWindow::new(PageNumber::new(4).expect("page"), size, 13);
//!
//! assert_eq!(window.total_pages(), 3);
//! assert_eq!(
//!     window.placement(),
//!     PagePlacement::Beyond { last: PageNumber::new(3).expect("page") },
//! );
//! ```

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// Errors raised when parsing pagination input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The value is not a whole number.
    #[error("page must be a whole number, got '{value}'")]
    NotANumber {
        /// The rejected input.
        value: String,
    },
    /// Pages are numbered from one.
    #[error("page numbers start at 1")]
    Zero,
}

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Build a page number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Zero`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PageError> {
        match NonZeroU32::new(value) {
            Some(page) => Ok(Self(page)),
            None => Err(PageError::Zero),
        }
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageNumber {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| PageError::NotANumber {
                value: s.to_owned(),
            })?;
        Self::new(value)
    }
}

/// Number of items shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Build a page size, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Where a requested page falls relative to the available pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePlacement {
    /// The page exists, or there are no results at all and the first page
    /// renders empty.
    InRange,
    /// The page lies past the last page holding results.
    Beyond {
        /// The last page that holds results.
        last: PageNumber,
    },
}

/// A requested page resolved against the size of the filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    page: PageNumber,
    page_size: PageSize,
    total_items: u64,
    total_pages: u32,
}

impl PageWindow {
    /// Resolve `page` against `total_items` matching records.
    ///
    /// An empty result set still reports one (empty) page.
    #[must_use]
    pub fn new(page: PageNumber, page_size: PageSize, total_items: u64) -> Self {
        let pages = total_items.div_ceil(u64::from(page_size.get())).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// The requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of items matching the filter.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Items to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get() - 1) * u64::from(self.page_size.get())
    }

    /// Maximum number of items on the requested page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size.get()
    }

    /// Classify the requested page.
    ///
    /// Requests past the end only redirect when results exist; an empty
    /// result set renders as a single empty page.
    #[must_use]
    pub fn placement(&self) -> PagePlacement {
        if self.total_items > 0 && self.page.get() > self.total_pages {
            match PageNumber::new(self.total_pages) {
                Ok(last) => PagePlacement::Beyond { last },
                Err(_) => PagePlacement::InRange,
            }
        } else {
            PagePlacement::InRange
        }
    }
}

/// Build a relative link to `page` of a listing at `path`, keeping the
/// supplied filter parameters.
///
/// Empty filter values are dropped so links stay canonical.
///
/// # Example
///
/// ```
/// use pagination::{PageNumber, page_href};
///
/// let page = PageNumber::new(2).expect("page");
/// let href = page_href("/api/v1/pets", &[("q", "golden retriever"), ("type", "")], page);
/// assert_eq!(href, "/api/v1/pets?q=golden+retriever&page=2");
/// ```
#[must_use]
pub fn page_href(path: &str, filters: &[(&str, &str)], page: PageNumber) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in filters.iter().filter(|(_, value)| !value.is_empty()) {
        query.append_pair(key, value);
    }
    query.append_pair(PAGE_PARAM, &page.to_string());
    format!("{path}?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn page(value: u32) -> PageNumber {
        PageNumber::new(value).expect("non-zero page")
    }

    fn six() -> PageSize {
        PageSize::new(6).expect("non-zero size")
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(6, 1)]
    #[case(7, 2)]
    #[case(12, 2)]
    #[case(13, 3)]
    fn total_pages_rounds_up_with_floor_of_one(#[case] items: u64, #[case] expected: u32) {
        assert_eq!(PageWindow::new(page(1), six(), items).total_pages(), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 6)]
    #[case(5, 24)]
    fn offset_skips_previous_pages(#[case] requested: u32, #[case] expected: u64) {
        assert_eq!(PageWindow::new(page(requested), six(), 100).offset(), expected);
    }

    #[test]
    fn stale_page_redirects_to_last_page() {
        let window = PageWindow::new(page(3), six(), 12);
        assert_eq!(window.placement(), PagePlacement::Beyond { last: page(2) });
    }

    #[rstest]
    #[case::last_page(2, 12)]
    #[case::empty_result_set(4, 0)]
    #[case::first_page(1, 1)]
    fn pages_within_range_render(#[case] requested: u32, #[case] items: u64) {
        let window = PageWindow::new(page(requested), six(), items);
        assert_eq!(window.placement(), PagePlacement::InRange);
    }

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 12 ", Ok(12))]
    #[case("0", Err(PageError::Zero))]
    #[case("-1", Err(PageError::NotANumber { value: "-1".to_owned() }))]
    #[case("two", Err(PageError::NotANumber { value: "two".to_owned() }))]
    fn parses_page_numbers(#[case] input: &str, #[case] expected: Result<u32, PageError>) {
        let parsed = input.parse::<PageNumber>().map(PageNumber::get);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn page_href_preserves_filters() {
        let href = page_href("/pets", &[("q", "a&b"), ("type", "CAT")], page(3));
        assert_eq!(href, "/pets?q=a%26b&type=CAT&page=3");
    }

    #[test]
    fn window_serialises_in_camel_case() {
        let window = PageWindow::new(page(2), six(), 7);
        let json = serde_json::to_value(window).expect("serialise window");
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "pageSize": 6, "totalItems": 7, "totalPages": 2})
        );
    }
}
