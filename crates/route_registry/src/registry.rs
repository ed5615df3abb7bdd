//! Route table implementation
//!
//! Routes are collected through a [`RouteTableBuilder`] during startup and
//! frozen into a [`RouteTable`]. Several routes may share one name; lookups
//! return them latest declaration first, so with the resolver's last-success
//! rule the earliest satisfiable declaration provides the permalink.

use crate::errors::*;
use crate::pattern::CompiledPattern;
use permalink::{GenerationError, ParameterValueMap, RouteCandidate, RouteName, RouteRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A compiled route registered under a name
#[derive(Debug, Clone)]
pub struct RouteEntry {
    name: RouteName,
    pattern: CompiledPattern,
    prefix: Arc<str>,
}

impl RouteEntry {
    pub fn name(&self) -> &RouteName {
        &self.name
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl RouteCandidate for RouteEntry {
    fn parameter_names(&self) -> &[String] {
        self.pattern.parameters()
    }

    fn generate(&self, values: &ParameterValueMap) -> std::result::Result<String, GenerationError> {
        self.pattern.reverse(&self.prefix, values)
    }
}

/// Collects route declarations before the table is frozen
#[derive(Debug)]
pub struct RouteTableBuilder {
    prefix: Arc<str>,
    routes: HashMap<RouteName, Vec<RouteEntry>>,
    /// Route names in first-declaration order
    order: Vec<RouteName>,
}

impl RouteTableBuilder {
    /// Create a builder with an empty address prefix
    pub fn new() -> Self {
        Self {
            prefix: Arc::from(""),
            routes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Prefix prepended to every generated address (e.g. `/`)
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Arc::from(prefix.into());
        for entry in self.routes.values_mut().flatten() {
            entry.prefix = self.prefix.clone();
        }
        self
    }

    /// Compile and register a route. Duplicate names add another candidate
    /// ahead of the earlier ones.
    pub fn route(mut self, name: impl Into<String>, pattern: &str) -> Result<Self> {
        self.add_route(name, pattern)?;
        Ok(self)
    }

    /// Non-consuming form of [`route`](Self::route)
    pub fn add_route(&mut self, name: impl Into<String>, pattern: &str) -> Result<()> {
        let name = RouteName::new(name);
        if name.as_str().is_empty() {
            return Err(RegistryError::EmptyRouteName);
        }
        let pattern = CompiledPattern::parse(pattern)?;

        debug!(
            route = %name,
            pattern = pattern.source(),
            parameters = ?pattern.parameters(),
            "registered route"
        );

        let entry = RouteEntry {
            name: name.clone(),
            pattern,
            prefix: self.prefix.clone(),
        };
        match self.routes.get_mut(&name) {
            Some(entries) => entries.insert(0, entry),
            None => {
                self.order.push(name.clone());
                self.routes.insert(name, vec![entry]);
            }
        }
        Ok(())
    }

    /// Freeze the table
    pub fn build(self) -> RouteTable {
        let table = RouteTable {
            routes: self.routes,
            order: self.order,
        };
        info!(
            names = table.order.len(),
            routes = table.len(),
            "route table frozen"
        );
        table
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only route table
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<RouteName, Vec<RouteEntry>>,
    order: Vec<RouteName>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Route names in first-declaration order
    pub fn route_names(&self) -> impl Iterator<Item = &RouteName> {
        self.order.iter()
    }

    /// Candidates registered under `name`, latest declaration first
    pub fn entries(&self, name: &str) -> &[RouteEntry] {
        self.routes
            .get(&RouteName::new(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of registered routes, counting every candidate
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteRegistry for RouteTable {
    type Candidate = RouteEntry;

    fn lookup(&self, name: &RouteName) -> &[RouteEntry] {
        self.routes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
