//! Date and duration helpers
//!
//! Forms exchange dates as ISO strings (`2022-10-01`); pages show them as
//! display strings (`01 October 2022`). Durations are derived once, when a
//! project is created or edited, using a fixed 30-day month.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Layout of dates submitted by and prefilled into forms
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Layout of dates rendered on pages
pub const DISPLAY_FORMAT: &str = "%d %B %Y";

const ISO_HINT: &str = "YYYY-MM-DD";
const DISPLAY_HINT: &str = "DD MonthName YYYY";

/// Days counted as one month when labelling durations
pub const DAYS_PER_MONTH: i64 = 30;

/// Parse a strict `YYYY-MM-DD` date.
///
/// The year must have four digits and month/day must be zero-padded, so
/// `2022-1-5` and `22-01-05` are rejected even though chrono alone would
/// accept some of them.
pub fn parse_iso_date(iso: &str) -> Result<NaiveDate> {
    let bytes = iso.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shaped {
        return Err(Error::InvalidDate(iso.to_string(), ISO_HINT));
    }

    NaiveDate::parse_from_str(iso, ISO_FORMAT)
        .map_err(|_| Error::InvalidDate(iso.to_string(), ISO_HINT))
}

/// Convert an ISO date into its display form, e.g. `2022-10-01` -> `01 October 2022`
pub fn to_display_date(iso: &str) -> Result<String> {
    let date = parse_iso_date(iso)?;
    Ok(date.format(DISPLAY_FORMAT).to_string())
}

/// Convert a display date back into ISO form for prefilling an edit form
pub fn to_editable_date(display: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(display.trim(), DISPLAY_FORMAT)
        .map_err(|_| Error::InvalidDate(display.to_string(), DISPLAY_HINT))?;
    Ok(date.format(ISO_FORMAT).to_string())
}

/// Compute the duration label between two ISO dates.
///
/// Equal or inverted dates are not an error; they label as `1 Day`.
pub fn compute_duration(iso_start: &str, iso_end: &str) -> Result<String> {
    let start = parse_iso_date(iso_start)?;
    let end = parse_iso_date(iso_end)?;
    let margin = end.signed_duration_since(start).num_days();
    Ok(duration_label(margin))
}

/// Label a whole-day span.
///
/// Spans over 30 days are counted in floored 30-day months, so 31..=59 days
/// is `1 Month` and 61 days is `2 Months`. Anything up to a single day is
/// `1 Day`.
pub fn duration_label(margin_days: i64) -> String {
    if margin_days > DAYS_PER_MONTH {
        let months = margin_days / DAYS_PER_MONTH;
        if months <= 1 {
            "1 Month".to_string()
        } else {
            format!("{} Months", months)
        }
    } else if margin_days <= 1 {
        "1 Day".to_string()
    } else {
        format!("{} Days", margin_days)
    }
}
