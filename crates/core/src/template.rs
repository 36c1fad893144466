//! Data-defined emitters for kinds that arrive at runtime.
//!
//! Compiled-in kinds use function pointers; kinds fetched from the robot
//! controller describe the same handful of call shapes as data instead.

use crate::emit::{Fragment, Imports, Precedence, call, construct};
use crate::instance::BlockView;
use serde::{Deserialize, Serialize};

/// What a call is made on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Receiver {
    /// A literal identifier.
    Identifier(String),
    /// The configured access object of a block family.
    Family(String),
    /// Whatever is plugged into a socket (member-call form).
    Socket(String),
}

/// One call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arg {
    /// Code plugged into a socket.
    Socket(String),
    /// Stored value of a field.
    Field(String),
    /// Literal code.
    Code(String),
}

/// Syntax shape of the emitted expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "camelCase")]
pub enum Template {
    /// `receiver.method(args)`
    Call {
        /// Call receiver
        receiver: Receiver,
        /// Method name
        method: String,
        /// Arguments in order
        #[serde(default)]
        args: Vec<Arg>,
    },
    /// `new Class(args)`
    Construct {
        /// Class name
        class: String,
        /// Arguments in order
        #[serde(default)]
        args: Vec<Arg>,
    },
    /// `Class.VALUE`, with `VALUE` taken from a dropdown.
    EnumValue {
        /// Enum class name
        class: String,
        /// Dropdown field holding the constant
        field: String,
    },
}

/// A template plus the Java imports it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEmitter {
    /// Expression shape.
    #[serde(flatten)]
    pub template: Template,
    /// Type names to import.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
}

impl TemplateEmitter {
    /// Wraps a template with no imports.
    pub fn new(template: Template) -> Self {
        Self {
            template,
            imports: Vec::new(),
        }
    }

    /// Adds an import.
    pub fn import(mut self, type_name: impl Into<String>) -> Self {
        self.imports.push(type_name.into());
        self
    }

    /// Expands the template for one instance.
    pub fn emit(&self, view: &BlockView<'_>, imports: &mut Imports) -> Fragment {
        for name in &self.imports {
            imports.require(name.clone());
        }

        match &self.template {
            Template::Call {
                receiver,
                method,
                args,
            } => {
                let receiver = match receiver {
                    Receiver::Identifier(name) => name.clone(),
                    Receiver::Family(family) => view.identifier(family),
                    Receiver::Socket(socket) => view.value(socket, Precedence::Member),
                };
                let args = expand_args(view, args);
                Fragment::new(call(&receiver, method, &args), Precedence::FunctionCall)
            }
            Template::Construct { class, args } => {
                let args = expand_args(view, args);
                Fragment::new(construct(class, &args), Precedence::New)
            }
            Template::EnumValue { class, field } => Fragment::new(
                format!("{}.{}", class, view.field(field)),
                Precedence::Member,
            ),
        }
    }
}

fn expand_args(view: &BlockView<'_>, args: &[Arg]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg {
            Arg::Socket(socket) => view.value(socket, Precedence::Comma),
            Arg::Field(field) => view.field(field).to_string(),
            Arg::Code(code) => code.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValues, ResolvedInputs};

    #[test]
    fn member_call_uses_socket_receiver() {
        let template = TemplateEmitter::new(Template::Call {
            receiver: Receiver::Socket("SERVO".into()),
            method: "setPosition".into(),
            args: vec![Arg::Socket("POSITION".into())],
        });
        let fields = FieldValues::new();
        let inputs = ResolvedInputs::new()
            .with("SERVO", "hardwareMap.claw", Precedence::Atomic)
            .with("POSITION", "0.5", Precedence::Atomic);
        let view = BlockView::new(&fields, &inputs);
        let mut imports = Imports::new();

        let fragment = template.emit(&view, &mut imports);
        assert_eq!(fragment.code, "hardwareMap.claw.setPosition(0.5)");
        assert_eq!(fragment.precedence, Precedence::FunctionCall);
        assert!(imports.is_empty());
    }

    #[test]
    fn enum_value_reads_field_and_imports() {
        let template = TemplateEmitter::new(Template::EnumValue {
            class: "Direction".into(),
            field: "DIRECTION".into(),
        })
        .import("Direction");
        let fields = FieldValues::new().with("DIRECTION", "REVERSE");
        let inputs = ResolvedInputs::new();
        let mut imports = Imports::new();

        let fragment = template.emit(&BlockView::new(&fields, &inputs), &mut imports);
        assert_eq!(fragment.code, "Direction.REVERSE");
        assert!(imports.contains("Direction"));
    }

    #[test]
    fn deserializes_flattened_form() {
        let json = r#"{
            "form": "call",
            "receiver": {"family": "claw"},
            "method": "open",
            "args": [{"code": "true"}]
        }"#;
        let template: TemplateEmitter = serde_json::from_str(json).unwrap();
        assert_eq!(
            template.template,
            Template::Call {
                receiver: Receiver::Family("claw".into()),
                method: "open".into(),
                args: vec![Arg::Code("true".into())],
            }
        );
        assert!(template.imports.is_empty());
    }
}
