//! Route declarations loaded from TOML
//!
//! ```toml
//! prefix = "/"
//!
//! [[route]]
//! name = "article_permalink"
//! pattern = '^read-article/(?P<id>\d+)_(?P<slug>[-\w]+).html$'
//! ```

use crate::errors::*;
use crate::registry::{RouteTable, RouteTableBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the default route file
pub const ROUTES_ENV_VAR: &str = "PERMALINK_ROUTES";

/// A single `[[route]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDeclaration {
    pub name: String,
    pub pattern: String,
}

/// Route file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Prepended to every generated address
    #[serde(default)]
    pub prefix: String,
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteDeclaration>,
}

impl RoutesConfig {
    /// Load and validate route declarations from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading routes from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        info!(routes = config.routes.len(), "Routes loaded successfully");
        Ok(config)
    }

    /// Parse and validate route declarations
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RoutesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Route file named by `PERMALINK_ROUTES`, if set
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os(ROUTES_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn validate(&self) -> Result<()> {
        for (index, route) in self.routes.iter().enumerate() {
            if route.name.trim().is_empty() {
                return Err(RegistryError::InvalidConfig(format!(
                    "route #{} has an empty name",
                    index + 1
                )));
            }
            if route.pattern.is_empty() {
                return Err(RegistryError::InvalidConfig(format!(
                    "route '{}' has an empty pattern",
                    route.name
                )));
            }
        }
        if self.routes.is_empty() {
            warn!("Route configuration declares no routes");
        }
        Ok(())
    }

    /// Compile every declaration, in file order, into a frozen table
    pub fn into_table(self) -> Result<RouteTable> {
        let mut builder = RouteTableBuilder::new().prefix(self.prefix);
        for route in &self.routes {
            builder.add_route(route.name.as_str(), &route.pattern)?;
        }
        Ok(builder.build())
    }
}
