//! Route Registry for Permalink Resolution
//!
//! This crate provides the host-side route table consumed by the `permalink`
//! resolver. Routes are declared once at startup (in code or in a TOML file),
//! compiled from Django-style named-group patterns such as
//! `^read-article/(?P<id>\d+)_(?P<slug>[-\w]+).html$`, and frozen into a
//! read-only [`RouteTable`].

pub mod config;
pub mod errors;
pub mod pattern;
pub mod registry;

pub use config::{RouteDeclaration, RoutesConfig, ROUTES_ENV_VAR};
pub use errors::*;
pub use pattern::{CompiledPattern, Segment};
pub use registry::{RouteEntry, RouteTable, RouteTableBuilder};
