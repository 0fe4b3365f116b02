//! Named dependency configurations of a build subproject.
//!
//! A [`ConfigurationContainer`] is the dependency graph a vendored subproject
//! exposes to the rest of the build. Importers register coordinates into it
//! through the [`DependencySink`] trait; packagers read isolated
//! configurations back out of it.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Build configuration name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfigurationName {
    Implementation,
    TestImplementation,
    Runtime,
    CompileOnly,
    Custom(String),
}

impl ConfigurationName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Implementation => "implementation",
            Self::TestImplementation => "testImplementation",
            Self::Runtime => "runtime",
            Self::CompileOnly => "compileOnly",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ConfigurationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigurationName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "implementation" => Self::Implementation,
            "testImplementation" => Self::TestImplementation,
            "runtime" => Self::Runtime,
            "compileOnly" => Self::CompileOnly,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for ConfigurationName {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }
}

impl From<ConfigurationName> for String {
    fn from(value: ConfigurationName) -> Self {
        value.as_str().to_string()
    }
}

/// Receiver of dependency registrations.
pub trait DependencySink {
    /// Registers `coordinate` against `configuration`.
    ///
    /// Returns `false` when the exact coordinate was already registered there.
    fn register(&mut self, configuration: &ConfigurationName, coordinate: Coordinate) -> bool;
}

/// A single named configuration and its declared dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: ConfigurationName,
    dependencies: Vec<Coordinate>,
    locking_enabled: bool,
}

impl Configuration {
    pub fn name(&self) -> &ConfigurationName {
        &self.name
    }

    pub fn dependencies(&self) -> &[Coordinate] {
        &self.dependencies
    }

    pub fn is_locking_enabled(&self) -> bool {
        self.locking_enabled
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Ordered set of configurations belonging to one subproject.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationContainer {
    configurations: Vec<Configuration>,
    lock_all: bool,
}

impl ConfigurationContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container where every newly created configuration participates in
    /// dependency locking unless explicitly excluded.
    pub fn with_dependency_locking() -> Self {
        Self {
            configurations: Vec::new(),
            lock_all: true,
        }
    }

    /// Returns the configuration named `name`, creating it if absent.
    pub fn create(&mut self, name: &ConfigurationName) -> &mut Configuration {
        let idx = match self.configurations.iter().position(|c| &c.name == name) {
            Some(idx) => idx,
            None => {
                tracing::debug!("creating configuration '{}'", name);
                self.configurations.push(Configuration {
                    name: name.clone(),
                    dependencies: Vec::new(),
                    locking_enabled: self.lock_all,
                });
                self.configurations.len() - 1
            }
        };
        &mut self.configurations[idx]
    }

    pub fn get(&self, name: &ConfigurationName) -> Option<&Configuration> {
        self.configurations.iter().find(|c| &c.name == name)
    }

    /// Removes `name` from dependency-lock resolution. Creates it if absent.
    pub fn exclude_from_locking(&mut self, name: &ConfigurationName) {
        self.create(name).locking_enabled = false;
    }

    /// Names of all configurations that take part in dependency locking.
    pub fn locked_configurations(&self) -> impl Iterator<Item = &ConfigurationName> {
        self.configurations
            .iter()
            .filter(|c| c.locking_enabled)
            .map(|c| &c.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter()
    }

    /// Total number of registrations across all configurations.
    pub fn registration_count(&self) -> usize {
        self.configurations.iter().map(|c| c.dependencies.len()).sum()
    }
}

impl DependencySink for ConfigurationContainer {
    fn register(&mut self, configuration: &ConfigurationName, coordinate: Coordinate) -> bool {
        let config = self.create(configuration);
        if config.dependencies.contains(&coordinate) {
            tracing::trace!("'{}' already registered in '{}'", coordinate, configuration);
            return false;
        }
        config.dependencies.push(coordinate);
        true
    }
}
