//! Permalink Resolution
//!
//! Computes the canonical address of a domain object by looking up the
//! route registered under its permalink name and reverse-generating it from
//! the object's own attributes:
//! - Route name derived from the type (`Article` -> `article_permalink`) or supplied explicitly
//! - Every candidate registered under the name is tried in registry order
//! - Candidates the object cannot satisfy are skipped; the last one that generates wins

pub mod errors;
pub mod extract;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod types;

pub use errors::*;
pub use extract::extract;
pub use naming::{default_route_name, resolve_name, PERMALINK_SUFFIX};
pub use registry::{RouteCandidate, RouteRegistry};
pub use resolver::*;
pub use types::*;
