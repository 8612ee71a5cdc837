//! Route guard: decides whether a page may render for the current viewer.

use crate::auth::AuthSnapshot;
use crate::models::Role;
use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not hydrated yet; show a placeholder and do not redirect.
    Loading,
    RedirectToLogin,
    RedirectToUnauthorized,
    Render,
}

impl GuardDecision {
    /// Where to navigate instead of rendering, if anywhere.
    #[must_use]
    pub const fn redirect(self) -> Option<Route> {
        match self {
            Self::RedirectToLogin => Some(Route::Login),
            Self::RedirectToUnauthorized => Some(Route::Unauthorized),
            Self::Loading | Self::Render => None,
        }
    }
}

/// Pure decision for one evaluation. `None` for `allowed_roles` admits any
/// signed-in user.
#[must_use]
pub fn evaluate(snapshot: &AuthSnapshot, allowed_roles: Option<&[Role]>) -> GuardDecision {
    if snapshot.is_loading {
        return GuardDecision::Loading;
    }
    let Some(user) = snapshot.user.as_ref() else {
        return GuardDecision::RedirectToLogin;
    };
    match allowed_roles {
        Some(roles) if !roles.contains(&user.role) => GuardDecision::RedirectToUnauthorized,
        _ => GuardDecision::Render,
    }
}

/// Guard decision for a concrete route. Public routes always render.
#[must_use]
pub fn evaluate_route(snapshot: &AuthSnapshot, route: Route) -> GuardDecision {
    if route.is_public() {
        return GuardDecision::Render;
    }
    evaluate(snapshot, route.allowed_roles())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::User;

    fn snapshot_for(role: Role) -> AuthSnapshot {
        AuthSnapshot::signed_in(User {
            id: "u".to_string(),
            username: "u".to_string(),
            email: "u@farm.io".to_string(),
            role,
            region: None,
        })
    }

    #[test]
    fn loading_wins_over_everything() {
        assert_eq!(
            evaluate(&AuthSnapshot::loading(), Some(&[Role::Admin])),
            GuardDecision::Loading
        );
        assert_eq!(GuardDecision::Loading.redirect(), None);
    }

    #[test]
    fn anonymous_viewer_goes_to_login() {
        let decision = evaluate(&AuthSnapshot::signed_out(), None);
        assert_eq!(decision, GuardDecision::RedirectToLogin);
        assert_eq!(decision.redirect(), Some(Route::Login));
    }

    #[test]
    fn wrong_role_goes_to_unauthorized() {
        let decision = evaluate(&snapshot_for(Role::Farmer), Some(&[Role::Admin]));
        assert_eq!(decision, GuardDecision::RedirectToUnauthorized);
        assert_eq!(decision.redirect(), Some(Route::Unauthorized));
    }

    #[test]
    fn matching_role_or_no_restriction_renders() {
        assert_eq!(
            evaluate(&snapshot_for(Role::Employee), Some(&[Role::Employee, Role::Admin])),
            GuardDecision::Render
        );
        assert_eq!(evaluate(&snapshot_for(Role::Farmer), None), GuardDecision::Render);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let snapshots = [
            AuthSnapshot::loading(),
            AuthSnapshot::signed_out(),
            snapshot_for(Role::Farmer),
            snapshot_for(Role::Admin),
        ];
        for snapshot in &snapshots {
            for route in Route::ALL {
                let first = evaluate_route(snapshot, route);
                for _ in 0..3 {
                    assert_eq!(evaluate_route(snapshot, route), first);
                }
            }
        }
    }

    #[test]
    fn routes_enforce_their_trees() {
        let farmer = snapshot_for(Role::Farmer);
        assert_eq!(
            evaluate_route(&farmer, Route::FarmerReports),
            GuardDecision::Render
        );
        assert_eq!(
            evaluate_route(&farmer, Route::AdminStats),
            GuardDecision::RedirectToUnauthorized
        );
        assert_eq!(
            evaluate_route(&AuthSnapshot::signed_out(), Route::Login),
            GuardDecision::Render
        );
    }
}
