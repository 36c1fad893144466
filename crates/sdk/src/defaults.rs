//! The standard registry holding every built-in FTC SDK kind.
//!
//! Hosts that only need the built-in blocks share [`standard`]; hosts that
//! also install generated kinds start from [`standard_registry`] and extend it.

use crate::blocks::register_all;
use ftcblocks_core::{BlockRegistry, RegistryError};
use once_cell::sync::Lazy;

static STANDARD: Lazy<BlockRegistry> = Lazy::new(|| {
    standard_registry().expect("built-in block kinds have unique names")
});

/// Builds a fresh registry with every built-in kind.
///
/// # Example
///
/// ```
/// use ftcblocks_sdk::defaults::standard_registry;
///
/// let registry = standard_registry().unwrap();
/// assert!(registry.contains("gainControl_setGain"));
/// assert_eq!(registry.describe("pose2D_create").unwrap().output_type(), Some("Pose2D"));
/// ```
pub fn standard_registry() -> Result<BlockRegistry, RegistryError> {
    let mut registry = BlockRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

/// Process-wide built-in registry, initialized on first use.
pub fn standard() -> &'static BlockRegistry {
    &STANDARD
}
