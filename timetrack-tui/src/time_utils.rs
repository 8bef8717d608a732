use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Current wall-clock time without an offset, matching how the API stores
/// timestamps.
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc()
        .to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
    PrimitiveDateTime::new(now.date(), now.time())
}

pub fn format_timestamp(value: Option<PrimitiveDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    value
        .and_then(|v| v.format(format).ok())
        .unwrap_or_default()
}

/// Format whole minutes as `HHh:MMm`.
pub fn format_minutes(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    format!("{:02}h:{:02}m", total_minutes / 60, total_minutes % 60)
}

/// Hours as the API rounds them (two decimals).
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}
