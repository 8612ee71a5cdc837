//! Server-side pagination with stale-response protection.

use crate::models::{Page, PageInfo};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page, page size and filter set sent with each fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedQuery<F> {
    page: u32,
    limit: u32,
    filters: F,
}

impl<F: Default> Default for PagedQuery<F> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, F::default())
    }
}

impl<F> PagedQuery<F> {
    pub fn new(limit: u32, filters: F) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            filters,
        }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }

    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Replaces the filter set and goes back to the first page.
    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
        self.page = 1;
    }

    /// Edits the filter set in place and goes back to the first page.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) {
        update(&mut self.filters);
        self.page = 1;
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// Identifies one fetch. Only the response for the newest ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<F> {
    generation: u64,
    pub query: PagedQuery<F>,
}

impl<F> FetchTicket<F> {
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// One server-paginated list: the current query, the last applied page and
/// the fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct PagedCollection<T, F> {
    query: PagedQuery<F>,
    items: Vec<T>,
    page_info: PageInfo,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl<T, F: Default + Clone> Default for PagedCollection<T, F> {
    fn default() -> Self {
        Self::new(PagedQuery::default())
    }
}

impl<T, F: Clone> PagedCollection<T, F> {
    pub fn new(query: PagedQuery<F>) -> Self {
        let empty = Page::<T>::empty();
        Self {
            query,
            items: empty.items,
            page_info: empty.pagination,
            generation: 0,
            loading: false,
            error: None,
        }
    }

    pub const fn query(&self) -> &PagedQuery<F> {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub const fn page_info(&self) -> PageInfo {
        self.page_info
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_filters(&mut self, filters: F) {
        self.query.set_filters(filters);
    }

    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) {
        self.query.update_filters(update);
    }

    /// Moves to the next page if the last response reported one.
    pub fn next_page(&mut self) -> bool {
        if self.query.page >= self.page_info.total_pages {
            return false;
        }
        self.query.set_page(self.query.page + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.query.page <= 1 {
            return false;
        }
        self.query.set_page(self.query.page - 1);
        true
    }

    /// Starts a fetch for the current query. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket<F> {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Applies a fetch result unless a newer fetch has started since.
    /// Returns false when the result was discarded as stale.
    pub fn apply<E: ToString>(&mut self, ticket: &FetchTicket<F>, result: Result<Page<T>, E>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale page response (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.page_info = page.pagination;
                self.error = None;
            }
            Err(error) => {
                self.error = Some(error.to_string());
            }
        }
        true
    }

    /// Applies an item change made locally (e.g. marking a notification read)
    /// without a new fetch.
    pub fn update_items(&mut self, update: impl FnOnce(&mut Vec<T>)) {
        update(&mut self.items);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ReadFilter;

    fn page_of(items: Vec<u32>, current_page: u32, total_pages: u32) -> Page<u32> {
        Page {
            items,
            pagination: PageInfo {
                current_page,
                total_pages,
                total_items: u64::from(total_pages) * 10,
            },
        }
    }

    #[test]
    fn filter_change_resets_page() {
        let mut query = PagedQuery::new(10, ReadFilter::All);
        query.set_page(4);
        query.set_filters(ReadFilter::Unread);
        assert_eq!(query.page(), 1);

        query.set_page(3);
        query.update_filters(|filter| *filter = ReadFilter::Read);
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_limit(50);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn default_collection_starts_empty_on_page_one() {
        let collection: PagedCollection<u32, ReadFilter> = PagedCollection::default();
        assert_eq!(collection.query().page(), 1);
        assert_eq!(collection.query().limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(collection.query().filters(), &ReadFilter::All);
        assert!(collection.items().is_empty());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut collection: PagedCollection<u32, ReadFilter> = PagedCollection::default();
        let first = collection.begin_fetch();
        collection.set_filters(ReadFilter::Unread);
        let second = collection.begin_fetch();

        assert!(collection.apply(&second, Ok::<_, String>(page_of(vec![2], 1, 1))));
        assert!(!collection.apply(&first, Ok::<_, String>(page_of(vec![1], 1, 3))));
        assert_eq!(collection.items(), &[2]);
        assert!(!collection.is_loading());
        assert_eq!(second.query.filters(), &ReadFilter::Unread);
    }

    #[test]
    fn navigation_is_bounded_by_total_pages() {
        let mut collection: PagedCollection<u32, ReadFilter> = PagedCollection::default();
        assert!(!collection.previous_page());
        assert!(!collection.next_page());

        let ticket = collection.begin_fetch();
        collection.apply(&ticket, Ok::<_, String>(page_of(vec![1, 2], 1, 2)));
        assert!(collection.next_page());
        assert_eq!(collection.query().page(), 2);
        assert!(!collection.next_page());
        assert!(collection.previous_page());
        assert_eq!(collection.query().page(), 1);
    }

    #[test]
    fn errors_keep_previous_items() {
        let mut collection: PagedCollection<u32, ReadFilter> = PagedCollection::default();
        let ticket = collection.begin_fetch();
        collection.apply(&ticket, Ok::<_, String>(page_of(vec![7], 1, 1)));

        let ticket = collection.begin_fetch();
        collection.apply(&ticket, Err::<Page<u32>, _>("Request failed"));
        assert_eq!(collection.items(), &[7]);
        assert_eq!(collection.error(), Some("Request failed"));
    }
}
