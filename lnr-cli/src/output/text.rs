//! Text primitives shared by every renderer.

use chrono::{DateTime, NaiveDate, Utc};

/// Shorten `s` to at most `max_len` characters, ending in an ellipsis when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Values that can be shown as a calendar date.
pub trait AsDate {
    fn as_date(&self) -> Option<DateTime<Utc>>;
}

impl AsDate for DateTime<Utc> {
    fn as_date(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

impl AsDate for str {
    fn as_date(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(self) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(self, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
    }
}

impl AsDate for String {
    fn as_date(&self) -> Option<DateTime<Utc>> {
        self.as_str().as_date()
    }
}

impl<T: AsDate> AsDate for Option<T> {
    fn as_date(&self) -> Option<DateTime<Utc>> {
        self.as_ref().and_then(AsDate::as_date)
    }
}

/// Render as `YYYY-MM-DD` in UTC, or `-` when absent or unparseable.
pub fn format_date<D: AsDate + ?Sized>(date: &D) -> String {
    match date.as_date() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_owned(),
    }
}

/// Priority label; anything outside 1..=4 renders as `-`.
pub fn format_priority(priority: Option<u8>) -> &'static str {
    match priority {
        Some(1) => "urgent",
        Some(2) => "high",
        Some(3) => "medium",
        Some(4) => "low",
        _ => "-",
    }
}

/// Elapsed time since `then`, e.g. `5m ago`.
pub fn format_relative_time(then: DateTime<Utc>) -> String {
    relative_time_between(then, Utc::now())
}

/// Elapsed time between two instants.
///
/// Months are 30 days and years 365 days. Timestamps in the future render as
/// `just now`.
pub fn relative_time_between(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds();
    let mins = diff_ms.div_euclid(60 * 1000);
    let hours = diff_ms.div_euclid(60 * 60 * 1000);
    let days = diff_ms.div_euclid(24 * 60 * 60 * 1000);
    let weeks = days.div_euclid(7);
    let months = days.div_euclid(30);
    let years = days.div_euclid(365);

    if mins < 1 {
        "just now".to_owned()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else if weeks < 4 {
        format!("{}w ago", weeks)
    } else if months < 12 {
        format!("{}mo ago", months)
    } else {
        format!("{}y ago", years)
    }
}

/// Greedy word wrap.
///
/// Newlines split paragraphs; blank paragraphs become empty lines without
/// `indent`. Words are never broken.
pub fn wrap_text(text: &str, width: usize, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len + word_len + 1 <= width {
                if !current.is_empty() {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
            } else {
                if !current.is_empty() {
                    lines.push(format!("{}{}", indent, current));
                }
                current = word.to_owned();
                current_len = word_len;
            }
        }
        if !current.is_empty() {
            lines.push(format!("{}{}", indent, current));
        }
    }

    lines
}
