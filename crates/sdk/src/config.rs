//! Generator configuration supplied by the host.

use crate::blocks::java_package;
use ftcblocks_core::Identifiers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for code generation, usually passed from JavaScript as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// JavaScript identifier overrides per block family.
    pub identifiers: Identifiers,
    /// Prefix applied to every generated body line.
    pub indent: String,
    /// Extra or overriding type-to-package entries for Java imports.
    pub java_packages: BTreeMap<String, String>,
}

impl GeneratorConfig {
    /// Parses a JSON configuration; missing keys take defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Package of a Java type, configured entries first.
    pub fn java_package(&self, type_name: &str) -> Option<&str> {
        self.java_packages
            .get(type_name)
            .map(String::as_str)
            .or_else(|| java_package(type_name))
    }

    /// `import` line for a type, if its package is known.
    pub fn java_import(&self, type_name: &str) -> Option<String> {
        self.java_package(type_name)
            .map(|package| format!("import {}.{};", package, type_name))
    }
}
