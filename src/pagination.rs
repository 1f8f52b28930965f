//! Page requests and paginated results.
//!
//! [`PageSpec`] normalizes the raw `pageSize`, `page`, `sort` and `sortType`
//! query parameters. Invalid values never fail the request, they fall back to
//! the defaults instead.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;
/// Primary key field used when the request does not name a sort field.
pub const DEFAULT_SORT_FIELD: &str = "id";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact string `desc` selects descending order.
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Ordering token understood by document stores: `1` or `-1`.
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Normalized pagination parameters for a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSpec {
    page_size: u64,
    page: u64,
    sort_field: String,
    sort_type: SortDirection,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_type: SortDirection::Asc,
        }
    }
}

fn parse_positive(raw: Option<&String>, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 1)
        .map_or(default, |value| value.unsigned_abs())
}

impl PageSpec {
    /// Builds a page request, clamping non-positive sizes and numbers to the
    /// defaults.
    pub fn new(
        page_size: i64,
        page: i64,
        sort_field: impl Into<String>,
        sort_type: SortDirection,
    ) -> Self {
        let sort_field = sort_field.into();
        Self {
            page_size: if page_size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size.unsigned_abs()
            },
            page: if page < 1 {
                DEFAULT_PAGE
            } else {
                page.unsigned_abs()
            },
            sort_field: if sort_field.is_empty() {
                DEFAULT_SORT_FIELD.to_string()
            } else {
                sort_field
            },
            sort_type,
        }
    }

    /// Parses the raw query parameters. `default_sort` is the primary key of
    /// the entity being listed.
    pub fn from_params(params: &HashMap<String, String>, default_sort: &str) -> Self {
        let sort_field = params
            .get("sort")
            .filter(|sort| !sort.is_empty())
            .map_or_else(|| default_sort.to_string(), Clone::clone);

        Self {
            page_size: parse_positive(params.get("pageSize"), DEFAULT_PAGE_SIZE),
            page: parse_positive(params.get("page"), DEFAULT_PAGE),
            sort_field,
            sort_type: params
                .get("sortType")
                .map_or(SortDirection::Asc, |raw| SortDirection::parse(raw)),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_type
    }

    /// Cumulative limit: every item up to the end of the requested page.
    ///
    /// Existing consumers depend on this value growing with the page number,
    /// so it is not the size of a single page window.
    pub fn limit(&self) -> u64 {
        self.page_size.saturating_mul(self.page)
    }

    /// Number of items preceding the requested page.
    pub fn skip(&self) -> u64 {
        if self.page == 0 {
            return 0;
        }
        self.page_size.saturating_mul(self.page - 1)
    }

    pub fn sort_direction_value(&self) -> i32 {
        self.sort_type.as_int()
    }
}

/// Pagination metadata attached to every list response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub total: u64,
    pub number: u64,
    pub page_size: u64,
    #[serde(rename = "totalPage")]
    pub total_pages: u64,
}

impl PaginationData {
    pub fn new(total: u64, page_size: u64, number: u64) -> AppResult<Self> {
        if page_size == 0 {
            return Err(AppError::internal_server_error(
                "Page size must be positive when computing total pages",
            ));
        }

        Ok(Self {
            total,
            number,
            page_size,
            total_pages: total.div_ceil(page_size),
        })
    }
}

/// A page of items together with its pagination metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    data: Vec<T>,
    #[serde(rename = "page")]
    pagination: PaginationData,
}

impl<T> PaginatedResult<T> {
    /// Wraps `items` as received from the executor; their order is kept.
    pub fn new(items: Vec<T>, total: u64, page_size: u64, page: u64) -> AppResult<Self> {
        Ok(Self {
            data: items,
            pagination: PaginationData::new(total, page_size, page)?,
        })
    }

    pub fn from_page(items: Vec<T>, total: u64, page: &PageSpec) -> AppResult<Self> {
        Self::new(items, total, page.page_size(), page.page())
    }

    pub fn items(&self) -> &[T] {
        &self.data
    }

    pub fn into_items(self) -> Vec<T> {
        self.data
    }

    pub fn pagination(&self) -> &PaginationData {
        &self.pagination
    }
}
