//! Colors for the desktop shell

use std::sync::OnceLock;

use agrilink_core::models::{NotificationPriority, PresenceStatus, ReportStatus};

const THEME_ENV: &str = "AGRILINK_THEME";

static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// `AGRILINK_THEME=light|dark` wins; otherwise follow the desktop.
    pub fn detect() -> Self {
        let requested = std::env::var(THEME_ENV).ok();
        Self::from_setting(requested.as_deref(), is_system_dark_mode)
    }

    fn from_setting(requested: Option<&str>, system_dark: impl FnOnce() -> bool) -> Self {
        match requested.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "dark" => Self::Dark,
            Some(value) if value == "light" => Self::Light,
            _ => {
                if system_dark() {
                    Self::Dark
                } else {
                    Self::Light
                }
            }
        }
    }

    pub const fn attr(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

fn is_system_dark_mode() -> bool {
    *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode)
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    match std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(error) => {
            tracing::warn!("Failed to detect system theme: {}", error);
            false
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn detect_system_dark_mode() -> bool {
    std::env::var("GTK_THEME").is_ok_and(|theme| theme.to_lowercase().contains("dark"))
}

#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub error_bg: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
}

pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f5f7f2",
    bg_tertiary: "#e9efe4",
    text_primary: "#1c2418",
    text_secondary: "#4b5a43",
    text_muted: "#8a9683",
    border: "#d5ddcf",
    accent: "#2f7d32",
    accent_text: "#ffffff",
    error: "#dc2626",
    error_bg: "#fdecec",
    warning: "#ca8a04",
    success: "#16a34a",
};

pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#161b14",
    bg_secondary: "#1f261c",
    bg_tertiary: "#2a3326",
    text_primary: "#e7ede3",
    text_secondary: "#a9b5a2",
    text_muted: "#6c7866",
    border: "#364032",
    accent: "#66bb6a",
    accent_text: "#10150e",
    error: "#f87171",
    error_bg: "#3a1d1d",
    warning: "#facc15",
    success: "#4ade80",
};

impl ColorPalette {
    pub const fn report_status(&self, status: ReportStatus) -> &'static str {
        match status {
            ReportStatus::Pending => self.warning,
            ReportStatus::InProgress => self.accent,
            ReportStatus::Solved => self.success,
        }
    }

    pub const fn presence(&self, status: PresenceStatus) -> &'static str {
        match status {
            PresenceStatus::Online | PresenceStatus::Available => self.success,
            PresenceStatus::Busy => self.warning,
            PresenceStatus::Offline => self.text_muted,
        }
    }

    pub const fn priority(&self, priority: NotificationPriority) -> &'static str {
        match priority {
            NotificationPriority::High => self.error,
            NotificationPriority::Medium => self.warning,
            NotificationPriority::Low => self.text_muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_setting_beats_system() {
        assert_eq!(
            ResolvedTheme::from_setting(Some(" Dark "), || false),
            ResolvedTheme::Dark
        );
        assert_eq!(
            ResolvedTheme::from_setting(Some("light"), || true),
            ResolvedTheme::Light
        );
        assert_eq!(
            ResolvedTheme::from_setting(Some("sepia"), || true),
            ResolvedTheme::Dark
        );
        assert_eq!(ResolvedTheme::from_setting(None, || false), ResolvedTheme::Light);
    }
}
