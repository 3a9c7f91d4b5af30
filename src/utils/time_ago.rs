use chrono::{DateTime, Utc};

/// Coarse "how long ago" label, e.g. `5 minutes ago`.
pub fn format_time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let distance = match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        _ if minutes < 45 => format!("{} minutes", (seconds as f64 / 60.0).round() as i64),
        _ if minutes < 90 => "about 1 hour".to_string(),
        _ if hours < 24 => format!("about {} hours", (minutes as f64 / 60.0).round() as i64),
        _ if hours < 42 => "1 day".to_string(),
        _ if days < 30 => format!("{} days", (hours as f64 / 24.0).round() as i64),
        _ if days < 45 => "about 1 month".to_string(),
        _ if days < 365 => format!("{} months", (days as f64 / 30.0).round() as i64),
        _ => match days / 365 {
            1 => "about 1 year".to_string(),
            years => format!("about {} years", years),
        },
    };

    format!("{} ago", distance)
}
