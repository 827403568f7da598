//! Date format conversion
//!
//! Callers speak `DD-MM-YYYY`; content files and history keys use
//! `YYYY-MM-DD`. All arithmetic happens on `NaiveDate`.

use crate::types::{AistrologError, Result};
use chrono::NaiveDate;

const DISPLAY_FORMAT: &str = "%d-%m-%Y";
const STORE_FORMAT: &str = "%Y-%m-%d";

/// Parse a caller-supplied `DD-MM-YYYY` date
pub fn parse_display_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if !has_shape(trimmed, &[2, 2, 4]) {
        return Err(AistrologError::InvalidDate(format!(
            "'{}' (expected DD-MM-YYYY)",
            s
        )));
    }
    NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT)
        .map_err(|e| AistrologError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Format as zero-padded `DD-MM-YYYY`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Format as zero-padded `YYYY-MM-DD`
pub fn format_store_key(date: NaiveDate) -> String {
    date.format(STORE_FORMAT).to_string()
}

/// Parse a history date key, accepting `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    if has_shape(key, &[4, 2, 2]) {
        NaiveDate::parse_from_str(key, STORE_FORMAT).ok()
    } else if has_shape(key, &[2, 2, 4]) {
        NaiveDate::parse_from_str(key, DISPLAY_FORMAT).ok()
    } else {
        None
    }
}

/// Check for three dash-separated digit groups of the given widths
fn has_shape(s: &str, widths: &[usize; 3]) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 3
        && parts
            .iter()
            .zip(widths)
            .all(|(p, &w)| p.len() == w && p.bytes().all(|b| b.is_ascii_digit()))
}
