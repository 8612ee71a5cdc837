//! List state shared by the front-ends.
//!
//! [`FilteredView`] filters a fully fetched collection in memory.
//! [`PagedCollection`] tracks a server-paginated collection and the query
//! that produced it.

mod filtered;
mod paged;

pub use filtered::{Filterable, FilteredView, StatusFilter};
pub use paged::{FetchTicket, PagedCollection, PagedQuery, DEFAULT_PAGE_SIZE};
