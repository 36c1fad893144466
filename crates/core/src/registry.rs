//! The block registry: unique kind names mapped to descriptors and emitters.

use crate::RegistryError;
use crate::emit::{Emission, Emitter, Emitters, Generated, Imports, Target};
use crate::instance::{BlockView, Shape};
use crate::kind::{BlockKind, Connection, FieldValues};
use crate::template::TemplateEmitter;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Serialized kind definition: a descriptor plus one template per target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSpec {
    /// Shape descriptor.
    #[serde(flatten)]
    pub kind: BlockKind,
    /// JavaScript template.
    pub javascript: TemplateEmitter,
    /// Java template.
    pub java: TemplateEmitter,
}

impl KindSpec {
    fn into_parts(self) -> (BlockKind, Emitters) {
        let emitters = Emitters {
            javascript: Emitter::Template(self.javascript),
            java: Emitter::Template(self.java),
        };
        (self.kind, emitters)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    kind: BlockKind,
    emitters: Emitters,
}

/// Append-only map from kind name to descriptor and emitters.
///
/// Populated at startup, read-only while code is being generated.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    entries: BTreeMap<String, Entry>,
}

impl BlockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind. Fails if the name is taken or the descriptor is invalid;
    /// on failure the registry is unchanged.
    pub fn register(&mut self, kind: BlockKind, emitters: Emitters) -> Result<(), RegistryError> {
        kind.validate()?;
        if self.entries.contains_key(&kind.name) {
            return Err(RegistryError::duplicate_kind(&kind.name));
        }

        for mismatch in kind.lookup_mismatches() {
            log::warn!("block {}: {}", kind.name, mismatch);
        }
        log::debug!("registered block kind {}", kind.name);

        self.entries
            .insert(kind.name.clone(), Entry { kind, emitters });
        Ok(())
    }

    /// Registers data-defined kinds, all or nothing.
    pub fn register_specs(&mut self, specs: Vec<KindSpec>) -> Result<Vec<String>, RegistryError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            spec.kind.validate()?;
            if self.entries.contains_key(&spec.kind.name) || !seen.insert(spec.kind.name.as_str()) {
                return Err(RegistryError::duplicate_kind(&spec.kind.name));
            }
        }

        let mut names = Vec::with_capacity(specs.len());
        for spec in specs {
            let (kind, emitters) = spec.into_parts();
            names.push(kind.name.clone());
            self.register(kind, emitters)?;
        }
        Ok(names)
    }

    /// Parses a JSON array of [`KindSpec`] and registers it, all or nothing.
    pub fn register_json(&mut self, source: &str) -> Result<Vec<String>, RegistryError> {
        let specs: Vec<KindSpec> = serde_json::from_str(source)?;
        self.register_specs(specs)
    }

    /// Returns the descriptor registered under `name`.
    pub fn describe(&self, name: &str) -> Result<&BlockKind, RegistryError> {
        self.entry(name).map(|e| &e.kind)
    }

    /// Whether a kind is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered kind names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tooltip for the given field values.
    pub fn tooltip(&self, name: &str, fields: &FieldValues) -> Result<String, RegistryError> {
        Ok(self.describe(name)?.tooltip.resolve(fields))
    }

    /// Java type of the block's output, if declared.
    pub fn java_output_type(
        &self,
        name: &str,
        fields: &FieldValues,
    ) -> Result<Option<String>, RegistryError> {
        Ok(self
            .describe(name)?
            .java_output_type
            .as_ref()
            .map(|ty| ty.resolve(fields)))
    }

    /// Java type of one socket, if declared.
    pub fn java_input_type(
        &self,
        name: &str,
        socket: &str,
        fields: &FieldValues,
    ) -> Result<Option<String>, RegistryError> {
        Ok(self.describe(name)?.java_input_type(socket, fields))
    }

    /// Emits code for one instance.
    ///
    /// Empty sockets become empty strings; the only failure is an unknown kind.
    pub fn emit(
        &self,
        name: &str,
        view: &BlockView<'_>,
        target: Target,
    ) -> Result<Generated, RegistryError> {
        let entry = self.entry(name)?;
        let shape = effective_shape(&entry.kind, view.shape());

        let mut imports = Imports::new();
        let fragment = entry.emitters.for_target(target).emit(view, &mut imports);
        if target == Target::JavaScript {
            imports = Imports::new();
        }

        Ok(Generated {
            emission: Emission::wrap(fragment, shape),
            imports,
        })
    }

    fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::unknown_kind(name))
    }
}

fn effective_shape(kind: &BlockKind, requested: Shape) -> Shape {
    match kind.connection {
        Connection::Statement => Shape::Statement,
        Connection::Value { .. } if kind.toggleable => requested,
        Connection::Value { .. } => Shape::Expression,
    }
}
