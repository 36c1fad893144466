//! Declarative block shape descriptors.
//!
//! A [`BlockKind`] is pure data: sockets, fields, connection style and the
//! lookup tables that resolve tooltips and Java type names from field values.
//! Emitters live next to it in the registry, not inside it.

use crate::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Current field values of a block instance, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    /// Creates an empty set of field values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the stored value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// How a block connects to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Connection {
    /// Produces a value; `output` is the type check tag, if any.
    Value {
        /// Output type check tag (e.g. "Number").
        #[serde(default)]
        output: Option<String>,
    },
    /// Chains with previous/next statements and produces no value.
    Statement,
}

/// A named input socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Socket {
    /// Socket name referenced by emitters (e.g. "GAIN_CONTROL").
    pub name: String,
    /// Label shown next to the socket.
    #[serde(default)]
    pub label: String,
    /// Accepted value type tag; `None` accepts anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

impl Socket {
    /// Creates a socket with a label and no type check.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            check: None,
        }
    }

    /// Restricts the socket to a value type tag.
    pub fn check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }
}

/// One dropdown choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown in the dropdown.
    pub label: String,
    /// Value stored in the instance and seen by emitters.
    pub value: String,
}

impl Choice {
    /// Creates a choice.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An inline field on the block face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Field {
    /// Plain label text.
    Label {
        /// Label text
        text: String,
    },
    /// Label rendered like a field but not editable (class and method names).
    NonEditable {
        /// Displayed text
        text: String,
    },
    /// Enumerated choices.
    Dropdown {
        /// Field name
        name: String,
        /// Offered choices, first one is the default
        choices: Vec<Choice>,
    },
}

impl Field {
    /// Creates a label field.
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label { text: text.into() }
    }

    /// Creates a non-editable field.
    pub fn non_editable(text: impl Into<String>) -> Self {
        Self::NonEditable { text: text.into() }
    }

    /// Creates a dropdown whose labels equal their stored values.
    pub fn dropdown(name: impl Into<String>, values: &[&str]) -> Self {
        Self::Dropdown {
            name: name.into(),
            choices: values.iter().map(|v| Choice::new(*v, *v)).collect(),
        }
    }

    /// Dropdown name, if this field is a dropdown.
    pub fn name(&self) -> Option<&str> {
        match self {
            Field::Dropdown { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// One row of a [`Lookup`] table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// Stored dropdown value this row matches.
    pub key: String,
    /// Resolved text.
    pub text: String,
}

/// Pure resolver from field values to text.
///
/// Used for tooltips and Java type names. A table lookup with no matching
/// row resolves to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Lookup {
    /// Same text regardless of field values.
    Fixed {
        /// Resolved text
        text: String,
    },
    /// Table keyed by the stored value of one dropdown.
    ByField {
        /// Dropdown field name
        field: String,
        /// Table rows
        entries: Vec<LookupEntry>,
    },
}

impl Lookup {
    /// Fixed text.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::Fixed { text: text.into() }
    }

    /// Table lookup from `(key, text)` pairs.
    pub fn by_field(field: impl Into<String>, entries: &[(&str, &str)]) -> Self {
        Self::ByField {
            field: field.into(),
            entries: entries
                .iter()
                .map(|(key, text)| LookupEntry {
                    key: (*key).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    /// Resolves against the given field values.
    pub fn resolve(&self, fields: &FieldValues) -> String {
        match self {
            Lookup::Fixed { text } => text.clone(),
            Lookup::ByField { field, entries } => {
                let Some(value) = fields.get(field) else {
                    return String::new();
                };
                entries
                    .iter()
                    .find(|entry| entry.key == value)
                    .map(|entry| entry.text.clone())
                    .unwrap_or_default()
            }
        }
    }
}

/// Java type of one socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketType {
    /// Socket name.
    pub socket: String,
    /// Java type resolver.
    #[serde(rename = "type")]
    pub ty: Lookup,
}

fn default_colour() -> u16 {
    289
}

/// Immutable descriptor of one kind of block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockKind {
    /// Unique kind name (e.g. "gainControl_getGain").
    pub name: String,
    /// Toolbox category.
    #[serde(default)]
    pub category: String,
    /// Block hue.
    #[serde(default = "default_colour")]
    pub colour: u16,
    /// Value or statement connection.
    pub connection: Connection,
    /// Whether the user may switch the block between value and statement shape.
    #[serde(default)]
    pub toggleable: bool,
    /// Inline fields in display order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Input sockets in argument order.
    #[serde(default)]
    pub sockets: Vec<Socket>,
    /// Tooltip resolver.
    pub tooltip: Lookup,
    /// Java type of the block's output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_output_type: Option<Lookup>,
    /// Java types of individual sockets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub java_input_types: Vec<SocketType>,
}

impl BlockKind {
    /// Starts a value-producing kind.
    pub fn value(name: impl Into<String>, output: Option<&str>) -> Self {
        Self::with_connection(
            name,
            Connection::Value {
                output: output.map(str::to_string),
            },
        )
    }

    /// Starts a statement kind.
    pub fn statement(name: impl Into<String>) -> Self {
        Self::with_connection(name, Connection::Statement)
    }

    fn with_connection(name: impl Into<String>, connection: Connection) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            colour: default_colour(),
            connection,
            toggleable: false,
            fields: Vec::new(),
            sockets: Vec::new(),
            tooltip: Lookup::fixed(""),
            java_output_type: None,
            java_input_types: Vec::new(),
        }
    }

    /// Sets the toolbox category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the hue.
    pub fn colour(mut self, colour: u16) -> Self {
        self.colour = colour;
        self
    }

    /// Marks the kind as switchable between value and statement shape.
    pub fn toggleable(mut self) -> Self {
        self.toggleable = true;
        self
    }

    /// Appends a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a socket.
    pub fn socket(mut self, socket: Socket) -> Self {
        self.sockets.push(socket);
        self
    }

    /// Sets the tooltip resolver.
    pub fn tooltip(mut self, tooltip: Lookup) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Sets a fixed Java output type.
    pub fn java_output(mut self, ty: impl Into<String>) -> Self {
        self.java_output_type = Some(Lookup::fixed(ty));
        self
    }

    /// Sets a fixed Java type for one socket.
    pub fn java_input(mut self, socket: impl Into<String>, ty: impl Into<String>) -> Self {
        self.java_input_types.push(SocketType {
            socket: socket.into(),
            ty: Lookup::fixed(ty),
        });
        self
    }

    /// Output type tag, `None` for statements and untyped values.
    pub fn output_type(&self) -> Option<&str> {
        match &self.connection {
            Connection::Value { output } => output.as_deref(),
            Connection::Statement => None,
        }
    }

    /// Whether the kind produces a value in its default shape.
    pub fn is_value(&self) -> bool {
        matches!(self.connection, Connection::Value { .. })
    }

    /// Looks up a socket by name.
    pub fn socket_named(&self, name: &str) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.name == name)
    }

    /// Field values of a freshly placed block: every dropdown on its first choice.
    pub fn default_fields(&self) -> FieldValues {
        let mut values = FieldValues::new();
        for field in &self.fields {
            if let Field::Dropdown { name, choices } = field
                && let Some(first) = choices.first()
            {
                values.set(name.clone(), first.value.clone());
            }
        }
        values
    }

    /// Resolves the Java type of a socket.
    pub fn java_input_type(&self, socket: &str, fields: &FieldValues) -> Option<String> {
        self.java_input_types
            .iter()
            .find(|t| t.socket == socket)
            .map(|t| t.ty.resolve(fields))
    }

    /// Checks structural rules the registry enforces at registration.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::invalid_kind(&self.name, "name is empty"));
        }
        if self.toggleable && !self.is_value() {
            return Err(RegistryError::invalid_kind(
                &self.name,
                "only value blocks can toggle to statement shape",
            ));
        }

        let mut sockets = HashSet::new();
        for socket in &self.sockets {
            if !sockets.insert(socket.name.as_str()) {
                return Err(RegistryError::invalid_kind(
                    &self.name,
                    format!("duplicate socket {}", socket.name),
                ));
            }
        }

        let mut fields = HashSet::new();
        for name in self.fields.iter().filter_map(Field::name) {
            if !fields.insert(name) {
                return Err(RegistryError::invalid_kind(
                    &self.name,
                    format!("duplicate field {}", name),
                ));
            }
        }

        Ok(())
    }

    /// Describes lookup rows that can never match the dropdown they read.
    ///
    /// These are not errors: such rows resolve to the empty string.
    pub fn lookup_mismatches(&self) -> Vec<String> {
        let mut lookups = vec![("tooltip", &self.tooltip)];
        if let Some(output) = &self.java_output_type {
            lookups.push(("java output type", output));
        }
        for input in &self.java_input_types {
            lookups.push(("java input type", &input.ty));
        }

        let mut mismatches = Vec::new();
        for (what, lookup) in lookups {
            let Lookup::ByField { field, entries } = lookup else {
                continue;
            };
            let choices = self.fields.iter().find_map(|f| match f {
                Field::Dropdown { name, choices } if name == field => Some(choices),
                _ => None,
            });
            match choices {
                None => mismatches.push(format!("{} reads missing dropdown {}", what, field)),
                Some(choices) => {
                    for entry in entries {
                        if !choices.iter().any(|c| c.value == entry.key) {
                            mismatches.push(format!(
                                "{} key {} is not offered by {}",
                                what, entry.key, field
                            ));
                        }
                    }
                }
            }
        }
        mismatches
    }
}
