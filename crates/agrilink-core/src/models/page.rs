//! Server-paginated response envelope

use serde::{Deserialize, Serialize};

/// Pagination metadata returned next to each page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl PageInfo {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of a server-side paginated collection.
///
/// Endpoints name the item array differently (`items`, `notifications`,
/// `locations`, `data`); all of them land in `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "notifications", alias = "locations", alias = "data")]
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// An empty first page, used before anything was fetched.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: PageInfo {
                current_page: 1,
                total_pages: 1,
                total_items: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_accepts_endpoint_specific_item_keys() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"notifications":[1,2],"pagination":{"currentPage":2,"totalPages":3,"totalItems":22}}"#,
        )
        .unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.pagination.has_next());
        assert!(page.pagination.has_previous());
    }

    #[test]
    fn empty_page_has_no_neighbours() {
        let page = Page::<u32>::empty();
        assert!(!page.pagination.has_next());
        assert!(!page.pagination.has_previous());
    }
}
