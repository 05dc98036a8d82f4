//! Router
//!
//! Drives the history stack from navigation requests and settles each one on
//! a page unit, following redirects as it goes.

use serde::Serialize;
use std::sync::Arc;

use crate::error::RoutingError;
use crate::history::History;
use crate::location::Location;
use crate::page::PageId;
use crate::pattern::PathParams;
use crate::table::{Resolution, RouteTable};
use crate::Result;

const DEFAULT_MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    Push,
    Replace,
    Pop,
}

/// A settled navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub location: Location,
    pub page: PageId,
    pub params: PathParams,
    pub pattern: String,
    pub kind: NavigationKind,
    /// Location originally requested when a redirect was followed
    pub redirected_from: Option<Location>,
}

pub struct Router {
    table: Arc<RouteTable>,
    history: History,
    max_redirects: usize,
}

impl Router {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            history: History::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> &Location {
        &self.history.current().location
    }

    /// Settle the initial location of the session (replaces the seed entry)
    pub fn start(&mut self, href: &str) -> Result<Navigation> {
        let location = Location::parse(href)?;
        self.settle(location, NavigationKind::Replace)
    }

    /// Navigate to an href, adding a history entry
    pub fn navigate(&mut self, href: &str) -> Result<Navigation> {
        let location = Location::parse(href)?;
        self.settle(location, NavigationKind::Push)
    }

    /// Navigate to an href, overwriting the current history entry
    pub fn replace(&mut self, href: &str) -> Result<Navigation> {
        let location = Location::parse(href)?;
        self.settle(location, NavigationKind::Replace)
    }

    pub fn back(&mut self) -> Result<Option<Navigation>> {
        let location = match self.history.back() {
            Some(entry) => entry.location.clone(),
            None => return Ok(None),
        };
        self.settle(location, NavigationKind::Pop).map(Some)
    }

    pub fn forward(&mut self) -> Result<Option<Navigation>> {
        let location = match self.history.forward() {
            Some(entry) => entry.location.clone(),
            None => return Ok(None),
        };
        self.settle(location, NavigationKind::Pop).map(Some)
    }

    /// Resolve `requested`, recording it per `kind`. A failed navigation
    /// leaves the history as it was.
    fn settle(&mut self, requested: Location, kind: NavigationKind) -> Result<Navigation> {
        let snapshot = self.history.clone();
        let result = self.follow(requested, kind);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Navigation failed, history restored");
            self.history = snapshot;
        }
        result
    }

    fn follow(&mut self, requested: Location, kind: NavigationKind) -> Result<Navigation> {
        match kind {
            NavigationKind::Push => {
                self.history.push(requested.clone());
            }
            NavigationKind::Replace => {
                self.history.replace(requested.clone());
            }
            NavigationKind::Pop => {}
        }

        let mut location = requested.clone();
        let mut kind = kind;
        let mut hops = 0;

        loop {
            match self.table.resolve(&location.path) {
                Resolution::Render {
                    page,
                    params,
                    pattern,
                } => {
                    let redirected_from = (hops > 0).then(|| requested.clone());
                    tracing::debug!(
                        path = %location,
                        page = %page,
                        pattern = %pattern,
                        hops,
                        "Route resolved"
                    );
                    return Ok(Navigation {
                        location,
                        page,
                        params,
                        pattern,
                        kind,
                        redirected_from,
                    });
                }
                Resolution::Redirect { to, replace } => {
                    hops += 1;
                    if hops > self.max_redirects {
                        return Err(RoutingError::RedirectLoop {
                            from: requested.href(),
                            hops,
                        });
                    }

                    tracing::info!(from = %location, to = %to, replace, "Redirecting");

                    location = Location::parse(&to)?;
                    if replace {
                        self.history.replace(location.clone());
                        kind = NavigationKind::Replace;
                    } else {
                        self.history.push(location.clone());
                        kind = NavigationKind::Push;
                    }
                }
            }
        }
    }
}
