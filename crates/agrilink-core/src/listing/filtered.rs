//! Client-side search and status filtering.

use std::fmt;

use crate::models::Report;

/// A record that can be searched by text and filtered by status.
pub trait Filterable {
    type Status: Copy + PartialEq + fmt::Debug;

    /// Text fields matched by the search term.
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Self::Status;
}

impl Filterable for Report {
    type Status = crate::models::ReportStatus;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.crop.as_str(),
            self.description.as_str(),
            self.region.as_str(),
        ];
        if let Some(farmer) = &self.farmer {
            fields.push(farmer.label());
        }
        fields
    }

    fn status(&self) -> Self::Status {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: Copy + PartialEq> StatusFilter<S> {
    fn admits(self, status: S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Full source collection plus the active search term and status filter.
/// The source is never modified by filtering.
#[derive(Debug, Clone)]
pub struct FilteredView<T: Filterable> {
    source: Vec<T>,
    search: String,
    status: StatusFilter<T::Status>,
}

impl<T: Filterable> Default for FilteredView<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Filterable> FilteredView<T> {
    pub const fn new(source: Vec<T>) -> Self {
        Self {
            source,
            search: String::new(),
            status: StatusFilter::All,
        }
    }

    /// Replaces the source after a re-fetch; filters stay as they are.
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_status(&mut self, status: StatusFilter<T::Status>) {
        self.status = status;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status = StatusFilter::All;
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub const fn status(&self) -> StatusFilter<T::Status> {
        self.status
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All
    }

    /// Records passing both the search term and the status filter, in source
    /// order.
    pub fn visible(&self) -> Vec<&T> {
        let term = self.search.trim().to_lowercase();
        self.source
            .iter()
            .filter(|record| self.status.admits(record.status()))
            .filter(|record| matches_term(*record, &term))
            .collect()
    }
}

fn matches_term<T: Filterable>(record: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}
