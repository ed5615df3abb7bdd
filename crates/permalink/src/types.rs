//! Types for permalink resolution

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Registry lookup key for a permalink route
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteName(pub String);

impl RouteName {
    /// Create a new route name from string
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the route name as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Parameter name -> attribute value, built fresh for every candidate attempt
pub type ParameterValueMap = BTreeMap<String, String>;

/// Address produced by a candidate's reverse generation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedAddress(String);

impl ResolvedAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ResolvedAddress {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResolvedAddress {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An object whose canonical address can be resolved.
///
/// Implementors expose their attributes by name instead of through
/// reflection; returning `None` marks the attribute as absent, which makes
/// every candidate requiring it inapplicable.
pub trait Linkable {
    /// Type name used to derive the default route name
    fn type_name(&self) -> &str;

    /// Read a named attribute rendered as a route parameter value
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<T: Linkable + ?Sized> Linkable for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

impl<T: Linkable + ?Sized> Linkable for Box<T> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

/// Generic table-backed object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.attributes.insert(name.into(), value.to_string());
    }
}

impl Linkable for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}
