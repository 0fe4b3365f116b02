//! Environment and exclusions for running the vendored library's own tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::process::Command;

/// Variables the vendored test suite reads from its environment.
pub const REQUIRED_ENVIRONMENT: [(&str, &str); 2] = [
    ("EnvironmentKey1", "EnvironmentValue1"),
    ("environmentEmpty", ""),
];

/// Test that cannot pass once the library is relocated.
pub const REQUIRED_EXCLUSION: &str = "org.yaml.snakeyaml.issues.issue318.ContextClassLoaderTest";

pub const EXCLUDE_FLAG: &str = "--exclude-test";

/// Extra entries come from configuration. The required environment and the
/// required exclusion are always applied and cannot be overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestRunSpec {
    pub environment: BTreeMap<String, String>,
    pub excluded_tests: Vec<String>,
}

impl TestRunSpec {
    pub fn environment(&self) -> Vec<(String, String)> {
        let mut env: Vec<(String, String)> = REQUIRED_ENVIRONMENT
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();

        for (key, value) in &self.environment {
            if REQUIRED_ENVIRONMENT.iter().any(|(k, _)| k == key) {
                tracing::warn!("ignoring override of required test variable {}", key);
                continue;
            }
            env.push((key.clone(), value.clone()));
        }
        env
    }

    pub fn excluded_tests(&self) -> Vec<String> {
        let mut excluded = vec![REQUIRED_EXCLUSION.to_string()];
        for selector in &self.excluded_tests {
            if !excluded.contains(selector) {
                excluded.push(selector.clone());
            }
        }
        excluded
    }

    /// Sets the environment on `command` and appends one
    /// `--exclude-test <selector>` pair per exclusion.
    pub fn apply_to(&self, command: &mut Command) {
        for (key, value) in self.environment() {
            command.env(key, value);
        }
        for selector in self.excluded_tests() {
            command.arg(EXCLUDE_FLAG).arg(selector);
        }
    }
}
