//! Navigation menu error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Menu entry not found: {0}")]
    UnknownEntry(String),

    #[error("Menu entry has no children: {0}")]
    NotAGroup(String),

    #[error("Menu group {group} has no child {child}")]
    UnknownChild { group: String, child: String },

    #[error("Menu entry nested too deep: {0}")]
    NestedTooDeep(String),

    #[error("Menu group is empty: {0}")]
    EmptyGroup(String),

    #[error("Duplicate menu entry: {0}")]
    DuplicateName(String),

    #[error("Invalid href for {name}: {href:?}")]
    InvalidHref { name: String, href: String },

    #[error("Routing error: {0}")]
    Routing(#[from] cs_routing::RoutingError),
}
