//! Storefront product discovery.
//!
//! Wires the catalog pipeline (`shopfront-catalog`) to a [`CatalogSource`] through
//! the [`DiscoveryController`] view state machine, plus the admin shell commands
//! and environment configuration used by the `shopfront-browse` binary.

pub mod config;
pub mod controller;
#[cfg(feature = "http")]
pub mod http;
pub mod shell;
pub mod source;

pub use config::{ConfigError, StorefrontConfig};
pub use controller::{
    DiscoveryController, FetchPolicy, FetchTicket, RenderModel, RequestToken, Resolution,
    ViewState, ViewStatus,
};
#[cfg(feature = "http")]
pub use http::HttpCatalog;
pub use shell::{AdminSection, AdminShell, Route, ShellActions, ShellCommand, ShellOutcome};
pub use source::{CatalogQuery, CatalogSource, FetchFailure, InMemoryCatalog};
