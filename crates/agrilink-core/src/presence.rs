//! Field-staff presence helpers: activity recency, relative timestamps, map
//! links and great-circle distance.

use chrono::{DateTime, Utc};

use crate::models::EmployeeLocation;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

const RECENT_LIMIT_MINUTES: i64 = 5;
const MODERATE_LIMIT_MINUTES: i64 = 30;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// How long ago an employee last reported activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityRecency {
    /// Under 5 minutes.
    Recent,
    /// 5 up to 30 minutes.
    Moderate,
    /// 30 minutes or more.
    Old,
}

impl ActivityRecency {
    /// Buckets `last_activity` relative to `now`. Timestamps in the future
    /// count as zero elapsed time.
    #[must_use]
    pub fn classify(last_activity: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = elapsed_ms(last_activity, now);
        if elapsed < RECENT_LIMIT_MINUTES * MINUTE_MS {
            Self::Recent
        } else if elapsed < MODERATE_LIMIT_MINUTES * MINUTE_MS {
            Self::Moderate
        } else {
            Self::Old
        }
    }

    /// Row tint as a hex color: green, yellow or red.
    #[must_use]
    pub const fn tint(self) -> &'static str {
        match self {
            Self::Recent => "#16a34a",
            Self::Moderate => "#ca8a04",
            Self::Old => "#dc2626",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Moderate => "moderate",
            Self::Old => "old",
        }
    }
}

fn elapsed_ms(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - timestamp).num_milliseconds().max(0)
}

/// Compact "time ago" label used in lists.
#[must_use]
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = elapsed_ms(timestamp, now);
    if diff < MINUTE_MS {
        "Just now".to_string()
    } else if diff < HOUR_MS {
        format!("{}m ago", diff / MINUTE_MS)
    } else if diff < DAY_MS {
        format!("{}h ago", diff / HOUR_MS)
    } else {
        format!("{}d ago", diff / DAY_MS)
    }
}

/// Google Maps deep link for a coordinate.
#[must_use]
pub fn maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}

/// Great-circle distance between two points in kilometres.
#[must_use]
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Fills in missing distances from `(latitude, longitude)` and sorts the
/// locations closest first.
pub fn order_by_distance(locations: &mut [EmployeeLocation], latitude: f64, longitude: f64) {
    for location in locations.iter_mut() {
        if location.distance_km.is_none() {
            location.distance_km = Some(haversine_km(
                (latitude, longitude),
                (location.latitude, location.longitude),
            ));
        }
    }
    locations.sort_by(|left, right| {
        left.distance_km
            .unwrap_or(f64::MAX)
            .total_cmp(&right.distance_km.unwrap_or(f64::MAX))
    });
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{PresenceStatus, UserRef};

    fn ago(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
        now - duration
    }

    #[test]
    fn recency_boundaries() {
        let now = Utc::now();
        let classify = |minutes| ActivityRecency::classify(ago(now, Duration::minutes(minutes)), now);

        assert_eq!(classify(4), ActivityRecency::Recent);
        assert_eq!(classify(5), ActivityRecency::Moderate);
        assert_eq!(classify(29), ActivityRecency::Moderate);
        assert_eq!(classify(30), ActivityRecency::Old);
        assert_eq!(classify(31), ActivityRecency::Old);
    }

    #[test]
    fn future_activity_counts_as_recent() {
        let now = Utc::now();
        let future = now + Duration::minutes(10);
        assert_eq!(ActivityRecency::classify(future, now), ActivityRecency::Recent);
        assert_eq!(format_relative_time(future, now), "Just now");
    }

    #[test]
    fn tints_are_distinct() {
        assert_ne!(ActivityRecency::Recent.tint(), ActivityRecency::Moderate.tint());
        assert_ne!(ActivityRecency::Moderate.tint(), ActivityRecency::Old.tint());
    }

    #[test]
    fn relative_time_labels() {
        let now = Utc::now();
        assert_eq!(format_relative_time(ago(now, Duration::seconds(30)), now), "Just now");
        assert_eq!(format_relative_time(ago(now, Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_relative_time(ago(now, Duration::hours(3)), now), "3h ago");
        assert_eq!(format_relative_time(ago(now, Duration::days(2)), now), "2d ago");
    }

    #[test]
    fn maps_link_embeds_coordinates() {
        assert_eq!(
            maps_link(5.6037, -0.187),
            "https://www.google.com/maps?q=5.6037,-0.187"
        );
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Accra to Kumasi is roughly 200 km.
        let distance = haversine_km((5.6037, -0.1870), (6.6885, -1.6244));
        assert!((195.0..205.0).contains(&distance), "got {distance}");
        assert!(haversine_km((1.0, 1.0), (1.0, 1.0)).abs() < 1e-9);
    }

    #[test]
    fn order_by_distance_sorts_closest_first() {
        let location = |id: &str, latitude: f64| EmployeeLocation {
            id: None,
            employee: UserRef::Id(id.to_string()),
            latitude,
            longitude: 0.0,
            accuracy: None,
            status: PresenceStatus::Online,
            address: None,
            last_activity: Utc::now(),
            device_info: None,
            distance_km: None,
        };
        let mut locations = vec![location("far", 2.0), location("near", 0.1)];
        order_by_distance(&mut locations, 0.0, 0.0);
        assert_eq!(locations[0].employee.id(), "near");
        assert!(locations[1].distance_km.unwrap() > 200.0);
    }
}
