//! Read-only view of a host-owned block instance.

use crate::emit::{Identifiers, Precedence, parenthesize};
use crate::kind::FieldValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static NO_OVERRIDES: Identifiers = Identifiers::new();

/// Whether an instance currently acts as a value or as a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Plugged into a socket, yields a value.
    #[default]
    Expression,
    /// Stacked as a statement, value discarded.
    Statement,
}

/// Supplies the code of whatever is plugged into a socket.
///
/// `order` is the precedence the emitter needs at that position; the host
/// decides whether the plugged code must be parenthesized. `None` means the
/// socket is empty.
pub trait SocketResolver {
    /// Resolve the code plugged into `socket`.
    fn resolve(&self, socket: &str, order: Precedence) -> Option<String>;
}

impl<F> SocketResolver for F
where
    F: Fn(&str, Precedence) -> Option<String>,
{
    fn resolve(&self, socket: &str, order: Precedence) -> Option<String> {
        (self)(socket, order)
    }
}

/// Socket resolver over already generated code.
#[derive(Debug, Clone, Default)]
pub struct ResolvedInputs {
    inputs: BTreeMap<String, (String, Precedence)>,
}

impl ResolvedInputs {
    /// Creates an empty resolver (every socket unplugged).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        socket: impl Into<String>,
        code: impl Into<String>,
        precedence: Precedence,
    ) -> Self {
        self.insert(socket, code, precedence);
        self
    }

    /// Records the code plugged into a socket.
    pub fn insert(
        &mut self,
        socket: impl Into<String>,
        code: impl Into<String>,
        precedence: Precedence,
    ) {
        self.inputs.insert(socket.into(), (code.into(), precedence));
    }
}

impl SocketResolver for ResolvedInputs {
    fn resolve(&self, socket: &str, order: Precedence) -> Option<String> {
        self.inputs
            .get(socket)
            .map(|(code, inner)| parenthesize(code, *inner, order))
    }
}

/// Everything an emitter may read about one instance.
pub struct BlockView<'a> {
    fields: &'a FieldValues,
    sockets: &'a dyn SocketResolver,
    shape: Shape,
    identifiers: &'a Identifiers,
}

impl<'a> BlockView<'a> {
    /// View over field values and socket contents, in expression shape.
    pub fn new(fields: &'a FieldValues, sockets: &'a dyn SocketResolver) -> Self {
        Self {
            fields,
            sockets,
            shape: Shape::Expression,
            identifiers: &NO_OVERRIDES,
        }
    }

    /// Sets the shape the user toggled the block to.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the JavaScript identifier overrides.
    pub fn with_identifiers(mut self, identifiers: &'a Identifiers) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Current shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// All field values.
    pub fn fields(&self) -> &FieldValues {
        self.fields
    }

    /// Stored value of a field, empty when unset.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).unwrap_or_default()
    }

    /// Code plugged into a socket, empty when nothing is plugged in.
    pub fn value(&self, socket: &str, order: Precedence) -> String {
        match self.sockets.resolve(socket, order) {
            Some(code) => code,
            None => {
                log::trace!("socket {} is empty", socket);
                String::new()
            }
        }
    }

    /// Codes of several sockets, in the given order.
    pub fn values(&self, sockets: &[&str], order: Precedence) -> Vec<String> {
        sockets.iter().map(|s| self.value(s, order)).collect()
    }

    /// JavaScript identifier of a block family's access object.
    pub fn identifier(&self, family: &str) -> String {
        self.identifiers.get(family)
    }
}
