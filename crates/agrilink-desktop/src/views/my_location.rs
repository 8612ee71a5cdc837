//! Employee position and availability update

use agrilink_core::models::{DeviceInfo, EmployeeLocation, LocationUpdate, PresenceStatus};
use agrilink_core::presence::{format_relative_time, maps_link};
use agrilink_core::util::normalize_text_option;
use chrono::Utc;
use dioxus::prelude::*;

use crate::components::{Alert, AlertKind, Button, Field};
use crate::state::AppState;

const CLIENT_NAME: &str = "agrilink-desktop";

#[component]
pub fn MyLocation() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut accuracy = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut status = use_signal(|| PresenceStatus::Available);
    let mut error = use_signal(|| None::<String>);
    let mut saved = use_signal(|| None::<EmployeeLocation>);
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        let update = match build_update(&latitude(), &longitude(), &accuracy(), &address(), status())
        {
            Ok(update) => update,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn(async move {
            match api.employee().update_location(&update).await {
                Ok(location) => {
                    tracing::info!("Location updated ({})", location.status);
                    saved.set(Some(location));
                }
                Err(update_error) => error.set(Some(state.describe_error(&update_error))),
            }
            saving.set(false);
        });
    };

    let status_value = status().as_str();
    let confirmation = saved().map(|location| {
        let when = format_relative_time(location.last_activity, Utc::now());
        (
            format!("Shared as {} {when}", location.status),
            maps_link(location.latitude, location.longitude),
        )
    });

    rsx! {
        div {
            style: "max-width: 480px;",
            if let Some(message) = error() {
                Alert { message }
            }
            if let Some((message, map)) = confirmation {
                Alert { kind: AlertKind::Info, message }
                a {
                    href: "{map}",
                    target: "_blank",
                    style: "display: inline-block; margin-bottom: 16px; color: {colors.accent};",
                    "Open in maps"
                }
            }
            div {
                style: "display: flex; gap: 12px;",
                Field { label: "Latitude", value: latitude(), oninput: move |value| latitude.set(value) }
                Field { label: "Longitude", value: longitude(), oninput: move |value| longitude.set(value) }
            }
            Field {
                label: "Accuracy in meters (optional)",
                value: accuracy(),
                oninput: move |value| accuracy.set(value),
            }
            Field { label: "Address (optional)", value: address(), oninput: move |value| address.set(value) }
            label {
                style: "display: block; margin-bottom: 16px; font-size: 13px; color: {colors.text_secondary};",
                div { style: "margin-bottom: 4px;", "Availability" }
                select {
                    style: "padding: 8px; border-radius: 6px;",
                    value: "{status_value}",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<PresenceStatus>() {
                            status.set(parsed);
                        }
                    },
                    for option_status in PresenceStatus::ALL {
                        {
                            let label = option_status.as_str();
                            rsx! { option { value: "{label}", "{label}" } }
                        }
                    }
                }
            }
            Button {
                disabled: saving(),
                onclick: save,
                if saving() { "Sharing..." } else { "Share location" }
            }
        }
    }
}

fn build_update(
    latitude: &str,
    longitude: &str,
    accuracy: &str,
    address: &str,
    status: PresenceStatus,
) -> Result<LocationUpdate, String> {
    let number = |raw: &str, name: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("{name} must be a number"))
    };
    let accuracy = if accuracy.trim().is_empty() {
        None
    } else {
        Some(number(accuracy, "Accuracy")?)
    };
    let update = LocationUpdate {
        latitude: number(latitude, "Latitude")?,
        longitude: number(longitude, "Longitude")?,
        accuracy,
        address: normalize_text_option(Some(address.to_string())),
        status,
        device_info: Some(DeviceInfo::current(CLIENT_NAME)),
    };
    update.validate()?;
    Ok(update)
}
