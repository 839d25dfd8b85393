use chrono::{DateTime, Utc};
use tera::Tera;

use crate::config::DISPLAY_TIME_FORMAT;
use crate::error::AppError;

const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Initialize the Tera template engine.
///
/// Templates are compiled into the binary so the service has no runtime
/// asset directory to mount.
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
    ])?;

    tera.register_filter("datetime", datetime_filter);

    Ok(tera)
}

/// Format an RFC 3339 timestamp for display (e.g., "2025-10-30 14:05:09 UTC")
///
/// Accepts an optional `format` argument with a strftime pattern.
fn datetime_filter(
    value: &tera::Value,
    args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("datetime filter expects a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or(DISPLAY_TIME_FORMAT);

    match DateTime::parse_from_rfc3339(date_str) {
        Ok(date) => Ok(tera::Value::String(
            date.with_timezone(&Utc).format(format).to_string(),
        )),
        // Unparseable input is shown as-is
        Err(_) => Ok(tera::Value::String(date_str.to_string())),
    }
}
