//! This module defines the common functionality for paging data.

use serde::{Deserialize, Serialize};

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    /// Pages are zero-based.
    pub default_page: u64,
    /// The number of rows per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_page_size: 20,
        }
    }
}

/// Page metadata attached to paginated listing responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// The zero-based page number that was returned.
    pub page: u64,
    /// The requested page size.
    pub size: u64,
    /// The total number of rows across all pages.
    pub total_elements: u64,
    /// The total number of pages at this page size.
    pub total_pages: u64,
}

impl Paging {
    /// Create page metadata for the page `page` of `total_elements` rows
    /// split into pages of `size`.
    pub fn new(page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}
