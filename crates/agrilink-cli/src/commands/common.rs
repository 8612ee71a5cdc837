use agrilink_core::api::{ApiClient, ApiResult};
use agrilink_core::config::ClientConfig;
use agrilink_core::guard::{self, GuardDecision};
use agrilink_core::models::{
    EmployeeLocation, EmployeePerformance, Notification, PageInfo, Product, RegionStats, Report,
    Role, User,
};
use agrilink_core::navigation::Route;
use agrilink_core::presence::{format_relative_time, maps_link, ActivityRecency};
use agrilink_core::session::SessionStore;
use agrilink_core::AuthContext;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config_profiles::{session_path, CliProfilesConfig};
use crate::error::CliError;

const SHORT_ID_LEN: usize = 10;

/// Everything a command needs: the resolved profile, the API client and the
/// hydrated auth state for that profile's session file.
pub struct AppContext {
    pub profile_name: String,
    pub api: ApiClient,
    pub auth: AuthContext,
}

impl AppContext {
    pub fn new(
        profile_name: impl Into<String>,
        config: ClientConfig,
        session: SessionStore,
    ) -> Result<Self, CliError> {
        let api = ApiClient::new(config, session.clone())?;
        let mut auth = AuthContext::new(session);
        auth.hydrate();
        Ok(Self {
            profile_name: profile_name.into(),
            api,
            auth,
        })
    }

    pub fn open(global_profile: Option<&str>, api_url: Option<String>) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = config
            .resolve_profile_name(global_profile)
            .map_err(CliError::Config)?;
        let client_config = config.client_config(&profile_name, api_url)?;
        tracing::debug!(
            "Using profile '{}' against {}",
            profile_name,
            client_config.api_base_url
        );
        let session = SessionStore::file(session_path(&profile_name));
        Self::new(profile_name, client_config, session)
    }

    pub fn user(&self) -> Result<&User, CliError> {
        self.auth
            .user()
            .ok_or_else(|| CliError::NotSignedIn(self.profile_name.clone()))
    }

    pub fn role(&self) -> Result<Role, CliError> {
        self.user().map(|user| user.role)
    }

    /// Applies the route guard before a role-specific command runs.
    pub fn require_route(&self, route: Route) -> Result<(), CliError> {
        match guard::evaluate_route(self.auth.snapshot(), route) {
            GuardDecision::Render => Ok(()),
            GuardDecision::RedirectToUnauthorized => Err(CliError::Forbidden(route)),
            GuardDecision::RedirectToLogin | GuardDecision::Loading => {
                Err(CliError::NotSignedIn(self.profile_name.clone()))
            }
        }
    }

    /// Converts an API result, signing the profile out when the backend
    /// rejected its session.
    pub fn checked<T>(&mut self, result: ApiResult<T>) -> Result<T, CliError> {
        result.map_err(|error| {
            if self.auth.handle_api_error(&error) {
                eprintln!(
                    "Session for profile '{}' was rejected and has been cleared.",
                    self.profile_name
                );
            }
            CliError::Api(error)
        })
    }
}

pub const fn reports_route(role: Role) -> Route {
    match role {
        Role::Farmer => Route::FarmerReports,
        Role::Employee => Route::EmployeeReports,
        Role::Admin => Route::AdminReports,
    }
}

pub const fn new_report_route(role: Role) -> Route {
    match role {
        Role::Farmer => Route::FarmerNewReport,
        // Admins have no submission page; the guard rejects them here.
        Role::Employee | Role::Admin => Route::EmployeeNewReport,
    }
}

pub const fn notifications_route(role: Role) -> Route {
    match role {
        Role::Farmer => Route::FarmerNotifications,
        Role::Employee => Route::EmployeeNotifications,
        Role::Admin => Route::AdminNotifications,
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ReportListItem {
    pub id: String,
    pub crop: String,
    pub region: String,
    pub status: String,
    pub urgent: bool,
    pub farmer: Option<String>,
    pub preview: String,
    pub created_at: String,
    pub relative_time: String,
}

pub fn report_to_list_item(report: &Report, now: DateTime<Utc>) -> ReportListItem {
    ReportListItem {
        id: report.id.clone(),
        crop: report.crop.clone(),
        region: report.region.clone(),
        status: report.status.to_string(),
        urgent: report.urgent,
        farmer: report.farmer.as_ref().map(|farmer| farmer.label().to_string()),
        preview: report.title_preview(80),
        created_at: report.created_at.to_rfc3339(),
        relative_time: format_relative_time(report.created_at, now),
    }
}

pub fn format_report_lines(reports: &[&Report], now: DateTime<Utc>) -> Vec<String> {
    reports
        .iter()
        .map(|report| {
            let line = format!(
                "{:<10}  {:<11}  {:<40}  {}",
                short_id(&report.id),
                report.status.as_str(),
                report.title_preview(40),
                format_relative_time(report.created_at, now)
            );
            if report.urgent {
                format!("{line}  [URGENT]")
            } else {
                line
            }
        })
        .collect()
}

pub fn format_report_detail(report: &Report, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        format!("Report {}", report.id),
        format!("  Crop:        {}", report.crop),
        format!("  Region:      {}", report.region),
        format!("  Status:      {}", report.status),
        format!("  Urgent:      {}", if report.urgent { "yes" } else { "no" }),
        format!(
            "  Submitted:   {} ({})",
            report.created_at.format("%Y-%m-%d %H:%M UTC"),
            format_relative_time(report.created_at, now)
        ),
    ];
    if let Some(farmer) = &report.farmer {
        lines.push(format!("  Farmer:      {}", farmer.label()));
    }
    if let Some((latitude, longitude)) = report.coordinates() {
        lines.push(format!("  Location:    {}", maps_link(latitude, longitude)));
    }
    lines.push(format!("  Description: {}", report.description));
    if let Some(diagnosis) = &report.diagnosis {
        lines.push(format!("  Diagnosis:   {diagnosis}"));
    }
    if let Some(solution) = &report.solution {
        lines.push(format!("  Solution:    {solution}"));
    }
    if !report.recommended_products.is_empty() {
        let products = report
            .recommended_products
            .iter()
            .map(|product| product.label().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  Products:    {products}"));
    }
    if !report.images.is_empty() {
        lines.push(format!("  Images:      {}", report.images.len()));
    }
    lines
}

#[derive(Debug, Serialize)]
pub struct NotificationListItem {
    pub id: String,
    pub message: String,
    pub read: bool,
    pub priority: String,
    pub created_at: String,
    pub relative_time: String,
}

pub fn notification_to_list_item(
    notification: &Notification,
    now: DateTime<Utc>,
) -> NotificationListItem {
    NotificationListItem {
        id: notification.id.clone(),
        message: notification.message.clone(),
        read: notification.read,
        priority: notification.priority().label().to_string(),
        created_at: notification.created_at.to_rfc3339(),
        relative_time: format_relative_time(notification.created_at, now),
    }
}

pub fn format_notification_lines(notifications: &[Notification], now: DateTime<Utc>) -> Vec<String> {
    notifications
        .iter()
        .map(|notification| {
            let marker = if notification.read { " " } else { "*" };
            format!(
                "{marker} {:<10}  {:<6}  {:<9}  {}",
                short_id(&notification.id),
                notification.priority().label(),
                format_relative_time(notification.created_at, now),
                notification.message
            )
        })
        .collect()
}

pub fn format_page_footer(info: &PageInfo) -> String {
    format!(
        "Page {}/{} ({} total)",
        info.current_page,
        info.total_pages.max(1),
        info.total_items
    )
}

#[derive(Debug, Serialize)]
pub struct LocationListItem {
    pub employee_id: String,
    pub employee: String,
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub last_activity: String,
    pub relative_time: String,
    pub recency: String,
    pub tint: String,
    pub maps_link: String,
    pub distance_km: Option<f64>,
}

pub fn location_to_list_item(location: &EmployeeLocation, now: DateTime<Utc>) -> LocationListItem {
    let recency = ActivityRecency::classify(location.last_activity, now);
    LocationListItem {
        employee_id: location.employee.id().to_string(),
        employee: location.employee.label().to_string(),
        status: location.status.to_string(),
        latitude: location.latitude,
        longitude: location.longitude,
        address: location.address.clone(),
        last_activity: location.last_activity.to_rfc3339(),
        relative_time: format_relative_time(location.last_activity, now),
        recency: recency.label().to_string(),
        tint: recency.tint().to_string(),
        maps_link: maps_link(location.latitude, location.longitude),
        distance_km: location.distance_km,
    }
}

pub fn format_location_lines(locations: &[EmployeeLocation], now: DateTime<Utc>) -> Vec<String> {
    locations
        .iter()
        .map(|location| {
            let recency = ActivityRecency::classify(location.last_activity, now);
            let distance = location
                .distance_km
                .map(|km| format!("  {km:.1} km"))
                .unwrap_or_default();
            format!(
                "{:<18}  {:<9}  {:<8}  {:<9}  {}{}",
                location.employee.label(),
                location.status.as_str(),
                recency.label(),
                format_relative_time(location.last_activity, now),
                maps_link(location.latitude, location.longitude),
                distance
            )
        })
        .collect()
}

pub fn format_product_lines(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|product| {
            format!(
                "{:<10}  {:<24}  {:<14}  {:>9.2}  {}",
                short_id(&product.id),
                product.name,
                product.category,
                product.price,
                product.manufacturer
            )
        })
        .collect()
}

pub fn format_region_lines(regions: &[RegionStats]) -> Vec<String> {
    regions
        .iter()
        .map(|region| {
            format!(
                "{:<16}  total={:<4} pending={:<4} in_progress={:<4} solved={:<4} ({:.0}% solved)",
                region.region,
                region.total_reports,
                region.pending,
                region.in_progress,
                region.solved,
                region.solved_ratio()
            )
        })
        .collect()
}

pub fn format_performance_lines(rows: &[EmployeePerformance]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let average = row
                .average_resolution_hours
                .map_or_else(|| "-".to_string(), |hours| format!("{hours:.1}h"));
            format!(
                "{:<18}  handled={:<4} solved={:<4} avg_resolution={}",
                row.employee.label(),
                row.reports_handled,
                row.reports_solved,
                average
            )
        })
        .collect()
}

pub fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{empty_message}");
    }
    for line in lines {
        println!("{line}");
    }
}
