//! UI Components
//!
//! Reusable UI components for the desktop application.

mod alert;
mod button;
mod field;
mod location_row;
mod pagination;
mod report_card;
mod route_guard;
mod search_bar;
mod sidebar;
mod top_bar;

pub use alert::{Alert, AlertKind};
pub use button::{Button, ButtonVariant};
pub use field::Field;
pub use location_row::LocationRow;
pub use pagination::Pagination;
pub use report_card::ReportCard;
pub use route_guard::RouteGuard;
pub use search_bar::SearchBar;
pub use sidebar::Sidebar;
pub use top_bar::TopBar;
