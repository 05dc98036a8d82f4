//! Route outlet
//!
//! The region where the routed page renders. While a page unit is still
//! resolving the outlet shows the shared [`Fallback`]. Only the most recent
//! request may commit; a resolution that finishes after the user has moved on
//! is dropped.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use cs_routing::{Location, PageId, PathParams};

use crate::error::LoadError;
use crate::loader::LazyLoader;
use crate::module::PageModule;

/// Loading placeholder shared by every lazy page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    pub text: String,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            text: "Loading application...".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutletState {
    Idle,
    Pending {
        location: Location,
        page: PageId,
    },
    Ready {
        location: Location,
        module: Arc<PageModule>,
        params: PathParams,
    },
    Failed {
        location: Location,
        page: PageId,
        error: LoadError,
    },
}

impl OutletState {
    pub fn location(&self) -> Option<&Location> {
        match self {
            OutletState::Idle => None,
            OutletState::Pending { location, .. }
            | OutletState::Ready { location, .. }
            | OutletState::Failed { location, .. } => Some(location),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OutletState::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    Shown,
    Failed(LoadError),
    /// A newer navigation took over before this one resolved
    Superseded,
}

/// The request currently allowed to commit
#[derive(Debug, Clone)]
struct Request {
    ticket: u64,
    location: Location,
}

pub struct RouteOutlet {
    loader: LazyLoader,
    fallback: Fallback,
    next_ticket: AtomicU64,
    /// Latest request; state changes happen under this lock
    latest: Mutex<Option<Request>>,
    state: watch::Sender<OutletState>,
}

impl RouteOutlet {
    pub fn new(loader: LazyLoader, fallback: Fallback) -> Self {
        let (state, _) = watch::channel(OutletState::Idle);
        Self {
            loader,
            fallback,
            next_ticket: AtomicU64::new(0),
            latest: Mutex::new(None),
            state,
        }
    }

    pub fn loader(&self) -> &LazyLoader {
        &self.loader
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    pub fn state(&self) -> OutletState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OutletState> {
        self.state.subscribe()
    }

    pub fn latest(&self) -> Option<Location> {
        self.latest.lock().as_ref().map(|r| r.location.clone())
    }

    /// Reserve the next position in navigation order. Callers that settle
    /// routes under their own lock take the ticket there, so the outlet
    /// commits in the same order the routes were settled.
    pub fn ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Show `page` for `location`.
    ///
    /// Cached pages commit immediately with no fallback in between. Otherwise
    /// the outlet goes `Pending` until the module resolves, then commits only
    /// if `location` is still the latest request.
    pub async fn show(&self, location: Location, page: PageId, params: PathParams) -> ShowOutcome {
        let ticket = self.ticket();
        self.show_ticketed(ticket, location, page, params).await
    }

    /// [`show`](Self::show) with a ticket from [`ticket`](Self::ticket).
    /// A request older than the latest one is superseded on arrival.
    pub async fn show_ticketed(
        &self,
        ticket: u64,
        location: Location,
        page: PageId,
        params: PathParams,
    ) -> ShowOutcome {
        let pending = {
            let mut latest = self.latest.lock();
            if let Some(current) = latest.as_ref().filter(|r| r.ticket > ticket) {
                tracing::debug!(
                    stale = %location,
                    current = %current.location,
                    "Ignoring out-of-order navigation"
                );
                return ShowOutcome::Superseded;
            }
            *latest = Some(Request {
                ticket,
                location: location.clone(),
            });

            match self.loader.cached(page) {
                Some(module) => {
                    self.publish(OutletState::Ready {
                        location,
                        module,
                        params,
                    });
                    return ShowOutcome::Shown;
                }
                None => {
                    self.publish(OutletState::Pending {
                        location: location.clone(),
                        page,
                    });
                    self.loader.load(page)
                }
            }
        };

        let result = pending.await;

        let latest = self.latest.lock();
        if latest.as_ref().map(|r| r.ticket) != Some(ticket) {
            tracing::debug!(
                stale = %location,
                current = ?latest.as_ref().map(|r| r.location.href()),
                "Discarding stale page resolution"
            );
            return ShowOutcome::Superseded;
        }

        match result {
            Ok(module) => {
                self.publish(OutletState::Ready {
                    location,
                    module,
                    params,
                });
                ShowOutcome::Shown
            }
            Err(error) => {
                self.publish(OutletState::Failed {
                    location,
                    page,
                    error: error.clone(),
                });
                ShowOutcome::Failed(error)
            }
        }
    }

    fn publish(&self, state: OutletState) {
        self.state.send_replace(state);
    }
}
