//! Emission types shared by every block kind.

use crate::instance::{BlockView, Shape};
use crate::template::TemplateEmitter;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Output language of an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// JavaScript dialect run by the robot controller.
    JavaScript,
    /// FTC Java.
    Java,
}

impl Target {
    /// Parses `"javascript"`/`"js"` or `"java"`, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Target::JavaScript),
            "java" => Some(Target::Java),
            _ => None,
        }
    }
}

/// Operator precedence class of emitted code, tightest first.
///
/// Only used to decide whether a nested expression needs parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Precedence {
    /// Literals and plain identifiers.
    Atomic,
    /// `new X(...)`.
    New,
    /// `a.b`.
    Member,
    /// `f(...)`, `a.f(...)`.
    FunctionCall,
    /// An argument slot in a call.
    Comma,
    /// No surrounding operator at all.
    None,
}

/// Wraps `code` in parentheses when an `inner` expression placed where
/// `outer` is expected would otherwise bind wrongly.
///
/// ```
/// use ftcblocks_core::{Precedence, parenthesize};
///
/// assert_eq!(parenthesize("a.b", Precedence::Member, Precedence::Comma), "a.b");
/// assert_eq!(parenthesize("f()", Precedence::FunctionCall, Precedence::Member), "f()");
/// assert_eq!(parenthesize("c ? a : b", Precedence::None, Precedence::Member), "(c ? a : b)");
/// assert_eq!(parenthesize("x", Precedence::Atomic, Precedence::Atomic), "x");
/// ```
pub fn parenthesize(code: &str, inner: Precedence, outer: Precedence) -> String {
    if code.is_empty() || outer > inner {
        return code.to_string();
    }
    let same_terminal = outer == inner && matches!(outer, Precedence::Atomic | Precedence::None);
    if same_terminal || is_chain(inner, outer) {
        code.to_string()
    } else {
        format!("({})", code)
    }
}

// `a().b`, `a.b.c`, `a()()` and `a.b()` read the same without parentheses.
fn is_chain(inner: Precedence, outer: Precedence) -> bool {
    let link = |p| matches!(p, Precedence::Member | Precedence::FunctionCall);
    link(inner) && link(outer)
}

/// Expression text produced by an emitter before shape wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Expression code, without terminator.
    pub code: String,
    /// Precedence of the outermost operator in `code`.
    pub precedence: Precedence,
}

impl Fragment {
    /// Creates a fragment.
    pub fn new(code: impl Into<String>, precedence: Precedence) -> Self {
        Self {
            code: code.into(),
            precedence,
        }
    }
}

/// Final emitter output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Emission {
    /// Value-producing code to be nested by the caller.
    Expression {
        /// Expression code
        code: String,
        /// Precedence of the outermost operator
        precedence: Precedence,
    },
    /// Complete statement, terminated with `;` and a line break.
    Statement {
        /// Statement code
        code: String,
    },
}

impl Emission {
    /// Wraps a fragment for the given shape.
    pub fn wrap(fragment: Fragment, shape: Shape) -> Self {
        match shape {
            Shape::Expression => Emission::Expression {
                code: fragment.code,
                precedence: fragment.precedence,
            },
            Shape::Statement => Emission::Statement {
                code: format!("{};\n", fragment.code),
            },
        }
    }

    /// Emitted code as returned to the host.
    pub fn code(&self) -> &str {
        match self {
            Emission::Expression { code, .. } | Emission::Statement { code } => code,
        }
    }

    /// Expression text with any statement terminator removed.
    pub fn expression_code(&self) -> &str {
        match self {
            Emission::Expression { code, .. } => code,
            Emission::Statement { code } => code.strip_suffix(";\n").unwrap_or(code),
        }
    }

    /// Precedence, for expressions.
    pub fn precedence(&self) -> Option<Precedence> {
        match self {
            Emission::Expression { precedence, .. } => Some(*precedence),
            Emission::Statement { .. } => None,
        }
    }

    /// Whether this is a statement.
    pub fn is_statement(&self) -> bool {
        matches!(self, Emission::Statement { .. })
    }
}

/// Java type names an emission needs imported. Adding twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Imports(BTreeSet<String>);

impl Imports {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a type import. Returns `false` if it was already required.
    pub fn require(&mut self, type_name: impl Into<String>) -> bool {
        self.0.insert(type_name.into())
    }

    /// Merges another set into this one.
    pub fn extend(&mut self, other: Imports) {
        self.0.extend(other.0);
    }

    /// Whether a type is required.
    pub fn contains(&self, type_name: &str) -> bool {
        self.0.contains(type_name)
    }

    /// Required type names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct imports.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is required.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Emission plus the imports it declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// Emitted code.
    pub emission: Emission,
    /// Java imports required by the code (empty for JavaScript).
    pub imports: Imports,
}

/// JavaScript-side identifiers of the SDK access objects, per block family.
///
/// Families without an override map to `<family>Access`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifiers(BTreeMap<String, String>);

impl Identifiers {
    /// No overrides.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style override.
    pub fn with(mut self, family: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.0.insert(family.into(), identifier.into());
        self
    }

    /// Merges overrides from `other`, which win on conflict.
    pub fn merge(&mut self, other: &Identifiers) {
        for (family, identifier) in &other.0 {
            self.0.insert(family.clone(), identifier.clone());
        }
    }

    /// Identifier for a family.
    pub fn get(&self, family: &str) -> String {
        self.0
            .get(family)
            .cloned()
            .unwrap_or_else(|| format!("{}Access", family))
    }
}

/// Hand-written emitter for one kind and target.
pub type EmitFn = fn(&BlockView<'_>, &mut Imports) -> Fragment;

/// Emitter for one target.
#[derive(Debug, Clone)]
pub enum Emitter {
    /// Compiled-in function.
    Native(EmitFn),
    /// Data-defined template, used for kinds loaded at runtime.
    Template(TemplateEmitter),
}

impl Emitter {
    /// Runs the emitter.
    pub fn emit(&self, view: &BlockView<'_>, imports: &mut Imports) -> Fragment {
        match self {
            Emitter::Native(emit) => emit(view, imports),
            Emitter::Template(template) => template.emit(view, imports),
        }
    }
}

/// One emitter per target.
#[derive(Debug, Clone)]
pub struct Emitters {
    /// JavaScript emitter.
    pub javascript: Emitter,
    /// Java emitter.
    pub java: Emitter,
}

impl Emitters {
    /// Pairs two native emitters.
    pub fn native(javascript: EmitFn, java: EmitFn) -> Self {
        Self {
            javascript: Emitter::Native(javascript),
            java: Emitter::Native(java),
        }
    }

    /// Emitter for a target.
    pub fn for_target(&self, target: Target) -> &Emitter {
        match target {
            Target::JavaScript => &self.javascript,
            Target::Java => &self.java,
        }
    }
}

/// `receiver.method(args)`.
pub fn call(receiver: &str, method: &str, args: &[String]) -> String {
    format!("{}.{}({})", receiver, method, args.join(", "))
}

/// `new Class(args)`.
pub fn construct(class: &str, args: &[String]) -> String {
    format!("new {}({})", class, args.join(", "))
}
