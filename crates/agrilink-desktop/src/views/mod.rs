//! Application views (one per route)

mod assistant;
mod dashboard;
mod employee_locations;
mod forgot_password;
mod login;
mod my_location;
mod new_report;
mod notifications;
mod products;
mod reports;
mod signup;
mod stats;
mod unauthorized;

use dioxus::prelude::*;

pub use assistant::Assistant;
pub use dashboard::Dashboard;
pub use employee_locations::EmployeeLocations;
pub use forgot_password::ForgotPassword;
pub use login::Login;
pub use my_location::MyLocation;
pub use new_report::NewReport;
pub use notifications::Notifications;
pub use products::Products;
pub use reports::Reports;
pub use signup::Signup;
pub use stats::Stats;
pub use unauthorized::Unauthorized;

use crate::state::AppState;

/// Centered card used by the signed-out pages.
#[component]
fn AuthLayout(title: String, children: Element) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            style: "
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
                background: {colors.bg_secondary};
            ",
            div {
                style: "
                    width: 380px;
                    padding: 28px;
                    border: 1px solid {colors.border};
                    border-radius: 10px;
                    background: {colors.bg_primary};
                ",
                h1 { style: "font-size: 20px; margin: 0 0 4px 0; color: {colors.accent};", "AgriLink" }
                h2 { style: "font-size: 15px; margin: 0 0 20px 0; font-weight: 500;", "{title}" }
                {children}
            }
        }
    }
}

/// Text link to another signed-out page.
#[component]
fn RouteLink(label: String, route: agrilink_core::Route) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        a {
            style: "color: {colors.accent}; cursor: pointer; font-size: 13px;",
            onclick: move |_| state.navigate(route),
            "{label}"
        }
    }
}
