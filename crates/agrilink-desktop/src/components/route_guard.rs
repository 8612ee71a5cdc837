//! Renders a page only when the signed-in role may open it

use agrilink_core::guard::{self, GuardDecision};
use agrilink_core::Route;
use dioxus::prelude::*;

use crate::state::AppState;

/// Shows a placeholder while the session loads and redirects viewers who are
/// signed out or hold another role.
#[component]
pub fn RouteGuard(route: Route, children: Element) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let decision = guard::evaluate_route(&state.snapshot(), route);

    use_effect(move || {
        let decision = guard::evaluate_route(state.auth.read().snapshot(), route);
        if let Some(target) = decision.redirect() {
            tracing::debug!("Guard redirects {} to {}", route, target);
            state.navigate(target);
        }
    });

    match decision {
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Loading => rsx! {
            div {
                style: "padding: 40px; text-align: center; color: {colors.text_muted};",
                "Loading..."
            }
        },
        GuardDecision::RedirectToLogin | GuardDecision::RedirectToUnauthorized => rsx! {},
    }
}
