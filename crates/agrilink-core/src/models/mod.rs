//! Data models for AgriLink
//!
//! Plain records exchanged with the backend. The client never owns their
//! persistence; it reads snapshots and re-fetches after mutations.

mod location;
mod notification;
mod page;
mod product;
mod report;
mod stats;
mod user;

pub use location::{DeviceInfo, EmployeeLocation, LocationUpdate, PresenceStatus};
pub use notification::{priority_for_message, Notification, NotificationPriority, ReadFilter};
pub use page::{Page, PageInfo};
pub use product::{Product, ProductDraft, ProductRef};
pub use report::{Diagnosis, NewReport, Report, ReportStatus};
pub use stats::{AiAnalysis, AiReply, EmployeePerformance, RegionStats};
pub use user::{Role, User, UserRef, UserSummary};
