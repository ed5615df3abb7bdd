//! Permalink resolver implementation

use crate::errors::*;
use crate::extract::extract;
use crate::naming::resolve_name;
use crate::registry::{RouteCandidate, RouteRegistry};
use crate::types::*;
use tracing::debug;

/// Permalink resolver
///
/// Resolves an object to its canonical address by trying every candidate
/// registered under the object's route name:
/// 1. Derive the route name (explicit override or `<type>_permalink`)
/// 2. Extract the candidate's parameters from the object
/// 3. Reverse-generate the address
///
/// Candidates that fail step 2 or 3 are skipped. When several succeed, the
/// last one in registry order wins; an empty winning address is not a
/// permalink.
#[derive(Debug, Clone)]
pub struct PermalinkResolver<R> {
    registry: R,
}

impl<R: RouteRegistry> PermalinkResolver<R> {
    /// Create a resolver over a frozen registry
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Access the underlying registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve the canonical address of `object`
    pub fn resolve<O>(&self, object: &O, route_override: Option<&str>) -> Result<ResolvedAddress>
    where
        O: Linkable + ?Sized,
    {
        let name = resolve_name(object, route_override);
        let candidates = self.candidates(&name)?;

        let mut result = None;
        for (index, candidate) in candidates.iter().enumerate() {
            match attempt(candidate, object) {
                AttemptOutcome::Generated(address) => {
                    if result.is_some() {
                        debug!(route = %name, index, "later candidate overrides earlier match");
                    }
                    result = Some(address);
                }
                outcome => {
                    debug!(route = %name, index, reason = %outcome, "candidate skipped");
                }
            }
        }

        // An empty address is never a permalink, even when it is the last success
        result
            .filter(|address| !address.is_empty())
            .map(ResolvedAddress::new)
            .ok_or_else(|| PermalinkError::NoResolvableCandidate {
                name: name.as_str().to_string(),
                type_name: object.type_name().to_string(),
            })
    }

    /// Run the resolution loop and report what happened to each candidate
    pub fn explain<O>(&self, object: &O, route_override: Option<&str>) -> Result<Explanation>
    where
        O: Linkable + ?Sized,
    {
        let name = resolve_name(object, route_override);
        let candidates = self.candidates(&name)?;

        let attempts = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| CandidateAttempt {
                index,
                parameters: candidate.parameter_names().to_vec(),
                outcome: attempt(candidate, object),
            })
            .collect();

        Ok(Explanation {
            route: name,
            type_name: object.type_name().to_string(),
            attempts,
        })
    }

    fn candidates(&self, name: &RouteName) -> Result<&[R::Candidate]> {
        let candidates = self.registry.lookup(name);
        if candidates.is_empty() {
            return Err(PermalinkError::RouteNotFound {
                name: name.as_str().to_string(),
            });
        }
        Ok(candidates)
    }
}

/// Resolve `object` against `registry` without keeping a resolver around
pub fn resolve_permalink<R, O>(
    registry: &R,
    object: &O,
    route_override: Option<&str>,
) -> Result<ResolvedAddress>
where
    R: RouteRegistry + ?Sized,
    O: Linkable + ?Sized,
{
    PermalinkResolver::new(registry).resolve(object, route_override)
}

fn attempt<C, O>(candidate: &C, object: &O) -> AttemptOutcome
where
    C: RouteCandidate + ?Sized,
    O: Linkable + ?Sized,
{
    let values = match extract(object, candidate.parameter_names()) {
        Ok(values) => values,
        Err(missing) => return AttemptOutcome::MissingAttribute(missing),
    };
    match candidate.generate(&values) {
        Ok(address) => AttemptOutcome::Generated(address),
        Err(err) => AttemptOutcome::GenerationFailed(err),
    }
}

/// Outcome of trying a single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Generated(String),
    MissingAttribute(MissingAttribute),
    GenerationFailed(GenerationError),
}

impl AttemptOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, AttemptOutcome::Generated(_))
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Generated(address) => write!(f, "generated {address}"),
            AttemptOutcome::MissingAttribute(err) => write!(f, "{err}"),
            AttemptOutcome::GenerationFailed(err) => write!(f, "{err}"),
        }
    }
}

/// Per-candidate record produced by [`PermalinkResolver::explain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAttempt {
    /// Position in registry order
    pub index: usize,
    pub parameters: Vec<String>,
    pub outcome: AttemptOutcome,
}

/// Full trace of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub route: RouteName,
    pub type_name: String,
    pub attempts: Vec<CandidateAttempt>,
}

impl Explanation {
    /// The attempt the tie-break selects: the last one that generated
    pub fn selected(&self) -> Option<&CandidateAttempt> {
        self.attempts.iter().rev().find(|a| a.outcome.is_generated())
    }

    pub fn address(&self) -> Option<&str> {
        match &self.selected()?.outcome {
            AttemptOutcome::Generated(address) => Some(address.as_str()),
            _ => None,
        }
    }

    /// Collapse into the same result `resolve` would have returned
    pub fn into_result(self) -> Result<ResolvedAddress> {
        if let Some(address) = self.address().filter(|address| !address.is_empty()) {
            return Ok(ResolvedAddress::new(address));
        }
        Err(PermalinkError::NoResolvableCandidate {
            name: self.route.0,
            type_name: self.type_name,
        })
    }
}
