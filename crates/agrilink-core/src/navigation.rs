//! Application routes and the per-role navigation menu.

use std::fmt;

use crate::models::Role;

const FARMER_ONLY: &[Role] = &[Role::Farmer];
const EMPLOYEE_ONLY: &[Role] = &[Role::Employee];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Every page the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    ForgotPassword,
    Unauthorized,

    FarmerDashboard,
    FarmerReports,
    FarmerNewReport,
    FarmerNotifications,

    EmployeeDashboard,
    EmployeeReports,
    EmployeeNewReport,
    EmployeeNotifications,
    EmployeeLocation,

    AdminDashboard,
    AdminReports,
    AdminProducts,
    AdminEmployeeLocations,
    AdminNotifications,
    AdminStats,
    AdminAssistant,
}

impl Route {
    pub const ALL: [Self; 20] = [
        Self::Login,
        Self::Signup,
        Self::ForgotPassword,
        Self::Unauthorized,
        Self::FarmerDashboard,
        Self::FarmerReports,
        Self::FarmerNewReport,
        Self::FarmerNotifications,
        Self::EmployeeDashboard,
        Self::EmployeeReports,
        Self::EmployeeNewReport,
        Self::EmployeeNotifications,
        Self::EmployeeLocation,
        Self::AdminDashboard,
        Self::AdminReports,
        Self::AdminProducts,
        Self::AdminEmployeeLocations,
        Self::AdminNotifications,
        Self::AdminStats,
        Self::AdminAssistant,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::Unauthorized => "/unauthorized",
            Self::FarmerDashboard => "/farmer/dashboard",
            Self::FarmerReports => "/farmer/reports",
            Self::FarmerNewReport => "/farmer/reports/new",
            Self::FarmerNotifications => "/farmer/notifications",
            Self::EmployeeDashboard => "/employee/dashboard",
            Self::EmployeeReports => "/employee/reports",
            Self::EmployeeNewReport => "/employee/reports/new",
            Self::EmployeeNotifications => "/employee/notifications",
            Self::EmployeeLocation => "/employee/location",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminReports => "/admin/reports",
            Self::AdminProducts => "/admin/products",
            Self::AdminEmployeeLocations => "/admin/employee-locations",
            Self::AdminNotifications => "/admin/notifications",
            Self::AdminStats => "/admin/stats",
            Self::AdminAssistant => "/admin/ai-assistant",
        }
    }

    /// Resolves a path, ignoring a trailing slash.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }

    /// Roles allowed to open the route; `None` for public pages.
    #[must_use]
    pub const fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Self::Login | Self::Signup | Self::ForgotPassword | Self::Unauthorized => None,
            Self::FarmerDashboard
            | Self::FarmerReports
            | Self::FarmerNewReport
            | Self::FarmerNotifications => Some(FARMER_ONLY),
            Self::EmployeeDashboard
            | Self::EmployeeReports
            | Self::EmployeeNewReport
            | Self::EmployeeNotifications
            | Self::EmployeeLocation => Some(EMPLOYEE_ONLY),
            Self::AdminDashboard
            | Self::AdminReports
            | Self::AdminProducts
            | Self::AdminEmployeeLocations
            | Self::AdminNotifications
            | Self::AdminStats
            | Self::AdminAssistant => Some(ADMIN_ONLY),
        }
    }

    #[must_use]
    pub const fn is_public(self) -> bool {
        self.allowed_roles().is_none()
    }

    /// Landing page after sign-in.
    #[must_use]
    pub const fn home_for(role: Role) -> Self {
        match role {
            Role::Farmer => Self::FarmerDashboard,
            Role::Employee => Self::EmployeeDashboard,
            Role::Admin => Self::AdminDashboard,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Signup => "Create account",
            Self::ForgotPassword => "Reset password",
            Self::Unauthorized => "Access denied",
            Self::FarmerDashboard | Self::EmployeeDashboard | Self::AdminDashboard => "Dashboard",
            Self::FarmerReports | Self::EmployeeReports => "My Reports",
            Self::AdminReports => "All Reports",
            Self::FarmerNewReport | Self::EmployeeNewReport => "New Report",
            Self::FarmerNotifications | Self::EmployeeNotifications | Self::AdminNotifications => {
                "Notifications"
            }
            Self::EmployeeLocation => "My Location",
            Self::AdminProducts => "Products",
            Self::AdminEmployeeLocations => "Employee Locations",
            Self::AdminStats => "Statistics",
            Self::AdminAssistant => "AI Assistant",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    pub icon: &'static str,
}

const fn item(label: &'static str, route: Route, icon: &'static str) -> NavItem {
    NavItem { label, route, icon }
}

const FARMER_MENU: &[NavItem] = &[
    item("Dashboard", Route::FarmerDashboard, "🏠"),
    item("My Reports", Route::FarmerReports, "📋"),
    item("New Report", Route::FarmerNewReport, "➕"),
    item("Notifications", Route::FarmerNotifications, "🔔"),
];

const EMPLOYEE_MENU: &[NavItem] = &[
    item("Dashboard", Route::EmployeeDashboard, "🏠"),
    item("Reports", Route::EmployeeReports, "📋"),
    item("Report for Farmer", Route::EmployeeNewReport, "➕"),
    item("My Location", Route::EmployeeLocation, "📍"),
    item("Notifications", Route::EmployeeNotifications, "🔔"),
];

const ADMIN_MENU: &[NavItem] = &[
    item("Dashboard", Route::AdminDashboard, "🏠"),
    item("Reports", Route::AdminReports, "📋"),
    item("Products", Route::AdminProducts, "🧪"),
    item("Employee Locations", Route::AdminEmployeeLocations, "📍"),
    item("Statistics", Route::AdminStats, "📊"),
    item("AI Assistant", Route::AdminAssistant, "🤖"),
    item("Notifications", Route::AdminNotifications, "🔔"),
];

/// Sidebar entries for `role`.
#[must_use]
pub const fn menu_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Farmer => FARMER_MENU,
        Role::Employee => EMPLOYEE_MENU,
        Role::Admin => ADMIN_MENU,
    }
}

/// Path prefix of a role's dashboard tree.
#[must_use]
pub const fn tree_prefix(role: Role) -> &'static str {
    match role {
        Role::Farmer => "/farmer/",
        Role::Employee => "/employee/",
        Role::Admin => "/admin/",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_menu_is_non_empty_and_stays_in_its_tree() {
        for role in Role::ALL {
            let menu = menu_for(role);
            assert!(!menu.is_empty(), "{role} menu is empty");
            for entry in menu {
                assert!(
                    entry.route.path().starts_with(tree_prefix(role)),
                    "{} escapes the {role} tree",
                    entry.route
                );
                for other in Role::ALL.into_iter().filter(|other| *other != role) {
                    assert!(!entry.route.path().starts_with(tree_prefix(other)));
                }
            }
        }
    }

    #[test]
    fn menu_routes_admit_their_role() {
        for role in Role::ALL {
            for entry in menu_for(role) {
                let allowed = entry.route.allowed_roles().unwrap();
                assert!(allowed.contains(&role));
            }
        }
    }

    #[test]
    fn parse_round_trips_every_path() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
        assert_eq!(Route::parse("/admin/stats/"), Some(Route::AdminStats));
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn home_lives_in_role_tree() {
        for role in Role::ALL {
            let home = Route::home_for(role);
            assert!(home.path().starts_with(tree_prefix(role)));
            assert!(!home.is_public());
        }
    }

    #[test]
    fn public_routes_have_no_role_restriction() {
        for route in [Route::Login, Route::Signup, Route::ForgotPassword, Route::Unauthorized] {
            assert!(route.is_public());
        }
    }
}
