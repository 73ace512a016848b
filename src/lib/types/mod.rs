//! Shared data types for post metadata.
//! Implemented as newtypes to enforce invariants.

use std::fmt;

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// A post's publish or modification instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Accepts RFC 3339 date-times, offset-less `YYYY-MM-DD[T ]HH:MM:SS`
    /// date-times and bare `YYYY-MM-DD` dates. Missing offsets mean UTC.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            return Some(Self(dt));
        }
        let local = PrimitiveDateTime::parse(
            s,
            &format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                s,
                &format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
                ),
            )
        });
        if let Ok(dt) = local {
            return Some(Self(dt.assume_utc()));
        }
        let date = Date::parse(s, &format_description!("[year]-[month]-[day]")).ok()?;
        Some(Self(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc()))
    }

    /// ISO 8601 rendering used in `article:*_time` tags.
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_default()
    }

    /// `YYYY-MM-DD`, used as the file name prefix.
    pub fn date_str(&self) -> String {
        self.0
            .date()
            .format(&format_description!("[year]-[month]-[day]"))
            .unwrap_or_default()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// URL path segment identifying a post.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_matches('/');
        if raw.is_empty() {
            return None;
        }
        let valid = raw
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_');
        if valid { Some(Self(raw.to_string())) } else { None }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Site-relative path of the post, e.g. `/purpose-of-community/`.
    pub fn canonical_path(&self) -> String {
        format!("/{}/", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags and categories. Spaces are allowed, blank values are not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
