//! Route registry interface consumed by the resolver
//!
//! The registry is owned by the host application: it is populated once at
//! startup and only read afterwards. The resolver needs nothing beyond a
//! name lookup and per-candidate reverse generation.

use crate::errors::GenerationError;
use crate::types::{ParameterValueMap, RouteName};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One route definition registered under a name
pub trait RouteCandidate {
    /// Parameter names in pattern order
    fn parameter_names(&self) -> &[String];

    /// Reverse-generate an address from a complete value map
    fn generate(&self, values: &ParameterValueMap) -> Result<String, GenerationError>;
}

/// Read-only table of route name -> ordered candidates
pub trait RouteRegistry {
    type Candidate: RouteCandidate;

    /// Candidates registered under `name`, in registration order. Unknown
    /// names yield an empty slice.
    fn lookup(&self, name: &RouteName) -> &[Self::Candidate];
}

impl<T: RouteCandidate + ?Sized> RouteCandidate for Box<T> {
    fn parameter_names(&self) -> &[String] {
        (**self).parameter_names()
    }

    fn generate(&self, values: &ParameterValueMap) -> Result<String, GenerationError> {
        (**self).generate(values)
    }
}

impl<T: RouteCandidate + ?Sized> RouteCandidate for Arc<T> {
    fn parameter_names(&self) -> &[String] {
        (**self).parameter_names()
    }

    fn generate(&self, values: &ParameterValueMap) -> Result<String, GenerationError> {
        (**self).generate(values)
    }
}

impl<R: RouteRegistry + ?Sized> RouteRegistry for &R {
    type Candidate = R::Candidate;

    fn lookup(&self, name: &RouteName) -> &[Self::Candidate] {
        (**self).lookup(name)
    }
}

impl<R: RouteRegistry + ?Sized> RouteRegistry for Arc<R> {
    type Candidate = R::Candidate;

    fn lookup(&self, name: &RouteName) -> &[Self::Candidate] {
        (**self).lookup(name)
    }
}

impl<C: RouteCandidate> RouteRegistry for HashMap<String, Vec<C>> {
    type Candidate = C;

    fn lookup(&self, name: &RouteName) -> &[C] {
        self.get(name.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<C: RouteCandidate> RouteRegistry for BTreeMap<String, Vec<C>> {
    type Candidate = C;

    fn lookup(&self, name: &RouteName) -> &[C] {
        self.get(name.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }
}
