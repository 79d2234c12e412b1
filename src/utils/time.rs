use chrono::{DateTime, Duration, Utc};

pub fn time_now() -> String {
    Utc::now().to_rfc3339()
}

pub fn time_after_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

pub fn time_before_days(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

pub fn parse_rfc3339(val: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(val)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
