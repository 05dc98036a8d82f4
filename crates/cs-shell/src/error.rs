//! Shell error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Routing error: {0}")]
    Routing(#[from] cs_routing::RoutingError),

    #[error("Navigation menu error: {0}")]
    Nav(#[from] cs_nav::NavError),

    #[error("Page load error: {0}")]
    Load(#[from] cs_loader::LoadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A failure while rendering part of the view tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RenderFault(pub String);

impl From<cs_loader::LoadError> for RenderFault {
    fn from(err: cs_loader::LoadError) -> Self {
        RenderFault(err.to_string())
    }
}
