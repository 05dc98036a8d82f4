//! Path patterns
//!
//! Pattern syntax:
//! - `/about`: static segments, compared case-insensitively
//! - `/docs/:docId`: a parameter matches any one non-empty segment
//! - `*`: matches every path

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::RoutingError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Segments(Vec<Segment>),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    shape: Shape,
}

/// Parameters bound by a parametric match, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let invalid = |reason: &str| RoutingError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw == "*" {
            return Ok(Self {
                raw: raw.to_string(),
                shape: Shape::Wildcard,
            });
        }
        if raw.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in raw.split('/').filter(|s| !s.is_empty()) {
            if part.contains('*') {
                return Err(invalid("'*' is only allowed as the whole pattern"));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter name is empty")),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            shape: Shape::Segments(segments),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.shape, Shape::Wildcard)
    }

    /// True when the pattern has no parameters and is not the wildcard
    pub fn is_static(&self) -> bool {
        match &self.shape {
            Shape::Segments(segments) => segments.iter().all(|s| matches!(s, Segment::Static(_))),
            Shape::Wildcard => false,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        match &self.shape {
            Shape::Segments(segments) => segments,
            Shape::Wildcard => &[],
        }
    }

    /// Match a normalized path, returning bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let segments = match &self.shape {
            Shape::Wildcard => return Some(PathParams::default()),
            Shape::Segments(segments) => segments,
        };

        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }

        Some(PathParams(params))
    }
}

/// Percent-decode a bound segment. Invalid UTF-8 is kept as sent.
fn decode_segment(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(segment = part, error = %e, "Keeping undecodable segment");
            part.to_string()
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
