//! Location parsing
//!
//! Hrefs are resolved against the application origin, so `docs/intro`,
//! `/docs/intro/` and `http://localhost/docs/intro` all name the same location.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RoutingError;
use crate::Result;

const APP_ORIGIN: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Normalized path: leading `/`, no trailing `/`, no empty segments
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Location {
    /// Parse an in-app href
    pub fn parse(href: &str) -> Result<Self> {
        let base = Url::parse(APP_ORIGIN)
            .map_err(|e| RoutingError::InvalidPath(format!("bad origin: {}", e)))?;
        let url = base
            .join(href.trim())
            .map_err(|e| RoutingError::InvalidPath(format!("{}: {}", href, e)))?;

        if url.origin() != base.origin() {
            return Err(RoutingError::InvalidPath(format!(
                "{} leaves the application",
                href
            )));
        }

        Ok(Self {
            path: normalize_path(url.path()),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
            fragment: url.fragment().filter(|f| !f.is_empty()).map(str::to_string),
        })
    }

    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            fragment: None,
        }
    }

    /// Render back to an href
    pub fn href(&self) -> String {
        let mut href = self.path.clone();
        if let Some(query) = &self.query {
            href.push('?');
            href.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.href())
    }
}

fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", parts.join("/"))
}
