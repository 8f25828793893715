// SPDX-License-Identifier: Apache-2.0

//! Text and date helpers shared by the core and the CLI.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

/// Truncates text to a maximum length with a custom suffix.
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use commit_connect_core::utils::truncate_with_suffix;
///
/// let text = "This is a very long string that needs truncation";
/// let result = truncate_with_suffix(text, 20, "... [more]");
/// assert!(result.ends_with("... [more]"));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate_with_suffix(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}{suffix}")
}

/// Truncates text with a "..." suffix.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with_suffix(text, max_len, "...")
}

/// Formats a timestamp relative to now ("3 days ago").
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(*dt);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };

    if duration.num_days() > 365 {
        plural(duration.num_days() / 365, "year")
    } else if duration.num_days() > 30 {
        plural(duration.num_days() / 30, "month")
    } else if duration.num_days() > 0 {
        plural(duration.num_days(), "day")
    } else if duration.num_hours() > 0 {
        plural(duration.num_hours(), "hour")
    } else {
        "just now".to_string()
    }
}

/// Today's date in the local timezone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `today - days`, clamped to the earliest representable date.
#[must_use]
pub fn cutoff_date(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Cutoff rendered as a search qualifier value (`YYYY-MM-DD`).
#[must_use]
pub fn cutoff_string(today: NaiveDate, days: u32) -> String {
    cutoff_date(today, days).format("%Y-%m-%d").to_string()
}
