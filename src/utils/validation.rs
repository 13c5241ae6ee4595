//! Field checks used by [`LogoConfig`](crate::config::LogoConfig) validation.
//!
//! Every check reports the dotted config key it failed on, so a bad value in
//! the TOML file or on the command line can be traced back to its source.

use crate::utils::error::{LogoError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> LogoError {
    LogoError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Logo services and override links are only ever reached over HTTP(S).
pub fn validate_http_url(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, value, "URL cannot be empty"));
    }

    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        "http" | "https" => Err(invalid(field, value, "URL has no host")),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_path(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(invalid(field, value, "Path cannot be empty"))
    } else if value.contains('\0') {
        Err(invalid(field, value, "Path contains null bytes"))
    } else {
        Ok(())
    }
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// An explicit company list must name at least one company, and no name may be blank.
pub fn validate_company_names(field: &str, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(invalid(field, "[]", "List cannot be empty"));
    }
    names.iter().try_for_each(|name| validate_non_blank(field, name))
}

/// Every entry must be one of `allowed`, and no entry may repeat.
pub fn validate_choices(field: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let mut seen = HashSet::new();

    for value in values {
        if !allowed.contains(&value.as_str()) {
            let reason = format!("Unknown value. Allowed values: {}", allowed.join(", "));
            return Err(invalid(field, value, reason));
        }
        if !seen.insert(value.as_str()) {
            return Err(invalid(field, value, "Value is listed more than once"));
        }
    }

    Ok(())
}
