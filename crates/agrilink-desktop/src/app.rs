//! Main application component

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use agrilink_core::preload::RoutePreloader;
use agrilink_core::{ApiClient, AuthContext, Role, Route, SessionStore};
use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::use_wry_event_handler;
use dioxus::prelude::*;

use crate::components::{Alert, RouteGuard, Sidebar, TopBar};
use crate::desktop_config::{load_desktop_config, session_path};
use crate::state::AppState;
use crate::theme::ResolvedTheme;
use crate::views::{
    Assistant, Dashboard, EmployeeLocations, ForgotPassword, Login, MyLocation, NewReport,
    Notifications, Products, Reports, Signup, Stats, Unauthorized,
};
use crate::WINDOW_FOCUSED;

const FOCUS_POLL: Duration = Duration::from_millis(250);

/// Root application component
#[component]
pub fn App() -> Element {
    let session = use_hook(|| SessionStore::file(session_path()));
    let (client, config_error) = use_hook({
        let session = session.clone();
        move || match build_client(session) {
            Ok(client) => (Some(client), None),
            Err(error) => (None, Some(error)),
        }
    });
    let auth = use_signal(move || AuthContext::new(session));
    let api = use_signal(move || client);
    let startup_error = use_signal(move || config_error);
    let route = use_signal(|| Route::Login);
    let preloader = use_signal(|| Arc::new(RoutePreloader::new()));
    let theme = use_signal(ResolvedTheme::detect);
    let flash = use_signal(|| None::<String>);

    let mut state = use_context_provider(|| AppState {
        auth,
        route,
        api,
        preloader,
        theme,
        startup_error,
        flash,
    });

    // Runs after the first frame so the loading state renders.
    use_effect(move || {
        let mut auth = state.auth;
        if !auth.peek().is_loading() {
            return;
        }
        let restored = {
            let mut context = auth.write();
            context.hydrate();
            context.snapshot().role()
        };
        if let Some(role) = restored {
            state.navigate(Route::home_for(role));
        }
    });

    // Warm the admin pages once an admin is signed in.
    use_effect(move || {
        if state.role() != Some(Role::Admin) {
            return;
        }
        let Some(api) = state.api() else {
            return;
        };
        let preloader = state.preloader();
        spawn(async move {
            preloader.preload_critical(&api).await;
        });
    });

    use_wry_event_handler(|event, _| {
        if let Event::WindowEvent {
            event: WindowEvent::Focused(true),
            ..
        } = event
        {
            WINDOW_FOCUSED.store(true, Ordering::SeqCst);
        }
    });

    // Refresh the admin cache when the window regains focus.
    use_future(move || async move {
        loop {
            if WINDOW_FOCUSED.swap(false, Ordering::SeqCst) && state.role() == Some(Role::Admin) {
                if let Some(api) = state.api() {
                    tracing::debug!("Window focused, refreshing admin pages");
                    state.preloader().preload_critical(&api).await;
                }
            }
            tokio::time::sleep(FOCUS_POLL).await;
        }
    });

    let current_theme = theme();
    let colors = current_theme.palette();
    let theme_attr = current_theme.attr();
    let current = route();

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            if let Some(message) = startup_error() {
                Alert { message: "Configuration error: {message}" }
            }
            if current.is_public() {
                PublicPage { route: current }
            } else {
                Shell {
                    RouteGuard { key: "{current}", route: current, Page { route: current } }
                }
            }
        }
    }
}

fn build_client(session: SessionStore) -> Result<ApiClient, String> {
    let config = load_desktop_config()
        .client_config()
        .map_err(|error| error.to_string())?;
    let client = ApiClient::new(config, session).map_err(|error| error.to_string())?;
    tracing::info!("Using backend at {}", client.base_url());
    Ok(client)
}

#[component]
fn PublicPage(route: Route) -> Element {
    match route {
        Route::Signup => rsx! { Signup {} },
        Route::ForgotPassword => rsx! { ForgotPassword {} },
        Route::Unauthorized => rsx! { Unauthorized {} },
        _ => rsx! { Login {} },
    }
}

/// Sidebar and top bar around a signed-in page.
#[component]
fn Shell(children: Element) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let user = state.user();
    let role = user.as_ref().map(|user| user.role);

    rsx! {
        div {
            style: "display: flex; min-height: 100vh;",
            if let Some(role) = role {
                Sidebar { role }
            }
            div {
                style: "flex: 1; display: flex; flex-direction: column; background: {colors.bg_primary};",
                if let Some(user) = user {
                    TopBar { user }
                }
                main {
                    style: "flex: 1; padding: 20px 24px; overflow-y: auto;",
                    {children}
                }
            }
        }
    }
}

/// The view behind a guarded route.
#[component]
fn Page(route: Route) -> Element {
    let state = use_context::<AppState>();
    let Some(role) = state.role() else {
        return rsx! {};
    };

    match route {
        Route::FarmerDashboard | Route::EmployeeDashboard | Route::AdminDashboard => {
            rsx! { Dashboard { role } }
        }
        Route::FarmerReports | Route::EmployeeReports | Route::AdminReports => {
            rsx! { Reports { role } }
        }
        Route::FarmerNewReport | Route::EmployeeNewReport => rsx! { NewReport { role } },
        Route::FarmerNotifications | Route::EmployeeNotifications | Route::AdminNotifications => {
            rsx! { Notifications { role } }
        }
        Route::EmployeeLocation => rsx! { MyLocation {} },
        Route::AdminProducts => rsx! { Products {} },
        Route::AdminEmployeeLocations => rsx! { EmployeeLocations {} },
        Route::AdminStats => rsx! { Stats {} },
        Route::AdminAssistant => rsx! { Assistant {} },
        Route::Login | Route::Signup | Route::ForgotPassword | Route::Unauthorized => rsx! {},
    }
}
