// src/validate.rs
//! Plausibility checks for optional output fields.
//!
//! Everything here answers yes/no; callers drop values that fail instead of
//! raising an error.

use crate::params::{Copyright, Link, Person};
use crate::record::Coords;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Dead Sea shore, meters
pub const MIN_ALTITUDE: f64 = -432.65;
/// Everest summit, meters
pub const MAX_ALTITUDE: f64 = 8849.0;

/// 2015-03-26T00:00:00Z
pub const MIN_METADATA_TIME_MS: i64 = 1_427_328_000_000;
/// 3000-01-01T00:00:00Z
pub const MAX_METADATA_TIME_MS: i64 = 32_503_680_000_000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static HTTP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("valid url pattern")
});

/// Altitude to report as elevation, if the fix has a usable one.
///
/// The altitude accuracy widens the accepted range on both ends. A fix
/// without a vertical accuracy (missing or zero) has no usable altitude.
pub fn valid_altitude(coords: &Coords) -> Option<f64> {
    let altitude = coords.altitude?;
    let accuracy = coords.altitude_accuracy.filter(|a| *a > 0.0)?;

    if altitude + accuracy >= MIN_ALTITUDE && altitude - accuracy <= MAX_ALTITUDE {
        Some(altitude)
    } else {
        None
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL_RE.is_match(value)
}

pub fn is_valid_link(link: &Link) -> bool {
    is_http_url(&link.href)
}

/// A person is valid when every field it carries is well formed
pub fn is_valid_person(person: &Person) -> bool {
    let email_ok = person.email.as_deref().map_or(true, is_email);
    let link_ok = person.link.as_ref().map_or(true, is_valid_link);
    let has_content = person.name.is_some() || person.email.is_some() || person.link.is_some();

    has_content && email_ok && link_ok
}

pub fn is_valid_copyright(copyright: &Copyright) -> bool {
    copyright.license.as_deref().map_or(true, is_http_url)
}

/// Copyright year, falling back to the current year
pub fn copyright_year(copyright: &Copyright) -> i32 {
    copyright
        .year
        .filter(|year| (1..=9999).contains(year))
        .unwrap_or_else(|| Utc::now().year())
}

pub fn is_valid_metadata_time(millis: i64) -> bool {
    (MIN_METADATA_TIME_MS..=MAX_METADATA_TIME_MS).contains(&millis)
}
