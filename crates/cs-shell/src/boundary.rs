//! Error boundaries
//!
//! ```text
//! Healthy ──render fault──▶ Failed   (terminal until remount)
//! ```
//! A boundary renders its subtree through [`ErrorBoundary::render`]. Both a
//! returned [`RenderFault`] and a panic count as a fault. Once failed, the
//! subtree is never rendered again by this instance; the generic fallback is
//! shown instead.

use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::RenderFault;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BoundaryState {
    Healthy,
    Failed { message: String },
}

/// Generic recovery UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackUi {
    pub title: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Rendered(T),
    Fallback(FallbackUi),
}

impl<T> Guarded<T> {
    pub fn rendered(self) -> Option<T> {
        match self {
            Guarded::Rendered(value) => Some(value),
            Guarded::Fallback(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorBoundary {
    name: &'static str,
    state: BoundaryState,
}

impl ErrorBoundary {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: BoundaryState::Healthy,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed { .. })
    }

    /// Render the wrapped subtree, or the fallback if it has failed.
    pub fn render<T, F>(&mut self, f: F) -> Guarded<T>
    where
        F: FnOnce() -> Result<T, RenderFault>,
    {
        if self.is_failed() {
            return Guarded::Fallback(self.fallback_ui());
        }

        let fault = match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => return Guarded::Rendered(value),
            Ok(Err(fault)) => fault,
            Err(payload) => RenderFault(panic_message(payload.as_ref())),
        };

        self.fail(fault);
        Guarded::Fallback(self.fallback_ui())
    }

    /// Record a fault raised outside `render`. No effect once failed.
    pub fn fail(&mut self, fault: RenderFault) {
        if self.is_failed() {
            return;
        }

        tracing::error!(boundary = self.name, error = %fault, "Render failure caught");
        self.state = BoundaryState::Failed { message: fault.0 };
    }

    /// Replace this instance with a fresh one, as a full reload does
    pub fn remount(&mut self) {
        tracing::info!(boundary = self.name, "Boundary remounted");
        *self = Self::new(self.name);
    }

    pub fn fallback_ui(&self) -> FallbackUi {
        let message = match &self.state {
            BoundaryState::Failed { message } => message.clone(),
            BoundaryState::Healthy => String::new(),
        };

        FallbackUi {
            title: "Something went wrong".to_string(),
            message,
            action: "Reload the page to try again".to_string(),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "render panicked".to_string()
    }
}
