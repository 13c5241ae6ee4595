//! Company name to logo file name.
//!
//! The mapping must stay stable: the portal looks logos up by the same
//! derived name, and re-runs use it to detect files that already exist.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const LOGO_EXTENSION: &str = "png";
pub const SEPARATOR: char = '_';

/// File name stem: lowercase ASCII letters and digits joined by single `_`.
pub fn sanitize_stem(company_name: &str) -> String {
    let lowered = company_name.to_lowercase();

    let mut stem = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !stem.is_empty() {
                stem.push(SEPARATOR);
            }
            stem.push(ch);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    stem
}

pub fn sanitize_filename(company_name: &str) -> String {
    format!("{}.{}", sanitize_stem(company_name), LOGO_EXTENSION)
}
