//! Host-side program generation.
//!
//! The editor normally walks its own graph and calls the registry per block.
//! [`Generator`] does the same walk over a serialized [`Program`], so hosts
//! without their own walker (and tests) get whole-program output.

use crate::GeneratorConfig;
use ftcblocks_core::{
    BlockRegistry, BlockView, Emission, FieldValues, Generated, Imports, Precedence,
    RegistryError, ResolvedInputs, Shape, Target,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

/// What is plugged into a socket.
///
/// A bare string is atomic code such as a literal or a variable name.
/// Anything looser must say so, or it is inserted without parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input {
    /// Atomic code resolved by the host, inserted as-is.
    Code(String),
    /// Code resolved by the host, with the precedence of its outermost operator.
    Literal {
        /// Generated code.
        code: String,
        /// Precedence of the code.
        #[serde(default = "atomic")]
        precedence: Precedence,
    },
    /// A nested block.
    Block(Box<BlockNode>),
}

fn atomic() -> Precedence {
    Precedence::Atomic
}

/// One block instance in a serialized program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    /// Kind name.
    pub kind: String,
    /// Field values.
    #[serde(default)]
    pub fields: FieldValues,
    /// Shape chosen by the user (only meaningful for toggleable kinds).
    #[serde(default)]
    pub shape: Shape,
    /// Socket contents by socket name.
    #[serde(default)]
    pub inputs: BTreeMap<String, Input>,
}

impl BlockNode {
    /// Node with no fields or inputs.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: FieldValues::new(),
            shape: Shape::default(),
            inputs: BTreeMap::new(),
        }
    }

    /// Builder-style field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.set(name, value);
        self
    }

    /// Builder-style shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Plugs literal code into a socket.
    pub fn code(mut self, socket: impl Into<String>, code: impl Into<String>) -> Self {
        self.inputs.insert(socket.into(), Input::Code(code.into()));
        self
    }

    /// Plugs non-atomic code into a socket.
    pub fn literal(
        mut self,
        socket: impl Into<String>,
        code: impl Into<String>,
        precedence: Precedence,
    ) -> Self {
        let input = Input::Literal {
            code: code.into(),
            precedence,
        };
        self.inputs.insert(socket.into(), input);
        self
    }

    /// Plugs a nested block into a socket.
    pub fn block(mut self, socket: impl Into<String>, node: BlockNode) -> Self {
        self.inputs
            .insert(socket.into(), Input::Block(Box::new(node)));
        self
    }
}

/// Top-level stack of blocks, generated in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level blocks.
    #[serde(default)]
    pub blocks: Vec<BlockNode>,
}

impl Program {
    /// Parses a JSON program.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

/// Whole-program output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedProgram {
    /// Generated statements.
    pub code: String,
    /// Java `import` lines, sorted (empty for JavaScript).
    pub imports: Vec<String>,
    /// Build warnings for the user (empty sockets and the like).
    pub warnings: Vec<String>,
}

impl GeneratedProgram {
    /// Import lines, a blank line, then the statements.
    pub fn to_source(&self) -> String {
        if self.imports.is_empty() {
            return self.code.clone();
        }
        let mut out = String::new();
        for import in &self.imports {
            let _ = writeln!(out, "{}", import);
        }
        out.push('\n');
        out.push_str(&self.code);
        out
    }
}

/// Walks programs and emits code through a registry.
pub struct Generator<'a> {
    registry: &'a BlockRegistry,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator.
    pub fn new(registry: &'a BlockRegistry, config: &'a GeneratorConfig) -> Self {
        Self { registry, config }
    }

    /// Generates a whole program. Fails only on unknown kinds.
    pub fn generate(
        &self,
        program: &Program,
        target: Target,
    ) -> Result<GeneratedProgram, RegistryError> {
        log::debug!(
            "generating {} top-level blocks for {:?}",
            program.blocks.len(),
            target
        );

        let mut warnings = Vec::new();
        let mut imports = Imports::new();
        let mut body = String::new();

        for node in &program.blocks {
            let generated = self.generate_node(node, target, &mut warnings)?;
            imports.extend(generated.imports);
            let statement = match generated.emission {
                Emission::Statement { code } => code,
                // A value nobody consumes still runs for its side effects.
                Emission::Expression { code, .. } => format!("{};\n", code),
            };
            for line in statement.lines() {
                let _ = writeln!(body, "{}{}", self.config.indent, line);
            }
        }

        let imports = match target {
            Target::JavaScript => Vec::new(),
            Target::Java => self.import_lines(&imports, &mut warnings),
        };

        Ok(GeneratedProgram {
            code: body,
            imports,
            warnings,
        })
    }

    /// Generates one block and everything plugged into it.
    pub fn generate_node(
        &self,
        node: &BlockNode,
        target: Target,
        warnings: &mut Vec<String>,
    ) -> Result<Generated, RegistryError> {
        let kind = self.registry.describe(&node.kind)?;
        let mut inputs = ResolvedInputs::new();
        let mut imports = Imports::new();

        for socket in &kind.sockets {
            match node.inputs.get(&socket.name) {
                None => warnings.push(format!("{}: socket {} is empty", node.kind, socket.name)),
                Some(Input::Code(code)) => {
                    inputs.insert(socket.name.clone(), code.clone(), Precedence::Atomic)
                }
                Some(Input::Literal { code, precedence }) => {
                    inputs.insert(socket.name.clone(), code.clone(), *precedence)
                }
                Some(Input::Block(child)) => {
                    let generated = self.generate_node(child, target, warnings)?;
                    imports.extend(generated.imports);
                    match generated.emission {
                        Emission::Expression { code, precedence } => {
                            inputs.insert(socket.name.clone(), code, precedence)
                        }
                        statement @ Emission::Statement { .. } => {
                            warnings.push(format!(
                                "{}: statement block {} plugged into socket {}",
                                node.kind, child.kind, socket.name
                            ));
                            inputs.insert(
                                socket.name.clone(),
                                statement.expression_code(),
                                Precedence::None,
                            );
                        }
                    }
                }
            }
        }

        for name in node.inputs.keys() {
            if kind.socket_named(name).is_none() {
                warnings.push(format!("{}: no socket named {}", node.kind, name));
            }
        }

        let view = BlockView::new(&node.fields, &inputs)
            .with_shape(node.shape)
            .with_identifiers(&self.config.identifiers);
        let mut generated = self.registry.emit(&node.kind, &view, target)?;
        generated.imports.extend(imports);
        Ok(generated)
    }

    fn import_lines(&self, imports: &Imports, warnings: &mut Vec<String>) -> Vec<String> {
        let mut lines = Vec::with_capacity(imports.len());
        for type_name in imports.iter() {
            match self.config.java_import(type_name) {
                Some(line) => lines.push(line),
                None => {
                    log::warn!("no Java package known for {}", type_name);
                    warnings.push(format!("no Java package known for {}", type_name));
                }
            }
        }
        lines.sort();
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::standard;

    fn pose(x: &str) -> BlockNode {
        BlockNode::new("pose2D_create")
            .block(
                "DISTANCE_UNIT",
                BlockNode::new("distanceUnit_typedEnum").field("DISTANCE_UNIT", "INCH"),
            )
            .code("X", x)
            .code("Y", "2")
            .block(
                "ANGLE_UNIT",
                BlockNode::new("angleUnit_typedEnum").field("ANGLE_UNIT", "DEGREES"),
            )
            .code("HEADING", "90")
    }

    #[test]
    fn nested_blocks_merge_imports() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(standard(), &config);
        let mut warnings = Vec::new();
        let generated = generator
            .generate_node(&pose("1"), Target::Java, &mut warnings)
            .unwrap();

        assert_eq!(
            generated.emission.code(),
            "new Pose2D(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90)"
        );
        let imports: Vec<_> = generated.imports.iter().collect();
        assert_eq!(imports, vec!["AngleUnit", "DistanceUnit", "Pose2D"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn naked_values_become_statements() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(standard(), &config);
        let program = Program {
            blocks: vec![BlockNode::new("pose2D_toText").block("POSE", pose("1"))],
        };
        let generated = generator.generate(&program, Target::JavaScript).unwrap();
        assert_eq!(
            generated.code,
            "pose2DAccess.toText(pose2DAccess.create(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90));\n"
        );
        assert!(generated.imports.is_empty());
    }

    #[test]
    fn empty_sockets_are_warnings() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(standard(), &config);
        let program = Program {
            blocks: vec![BlockNode::new("gainControl_setGain").shape(Shape::Statement)],
        };
        let generated = generator.generate(&program, Target::JavaScript).unwrap();
        assert_eq!(generated.code, "gainControlAccess.setGain(, );\n");
        assert_eq!(
            generated.warnings,
            vec![
                "gainControl_setGain: socket GAIN_CONTROL is empty",
                "gainControl_setGain: socket GAIN is empty",
            ]
        );
    }

    #[test]
    fn unknown_nested_kind_fails() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(standard(), &config);
        let node = BlockNode::new("pose2D_toText").block("POSE", BlockNode::new("mystery"));
        let err = generator
            .generate_node(&node, Target::Java, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownKind { name } if name == "mystery"));
    }

    #[test]
    fn program_parses_untagged_inputs() {
        let program = Program::from_json(
            r#"{"blocks": [{
                "kind": "gainControl_getGain",
                "inputs": {"GAIN_CONTROL": "camera"}
            }, {
                "kind": "pose2D_toText",
                "inputs": {"POSE": {"kind": "pose2D_create"}}
            }, {
                "kind": "pose2D_getX",
                "inputs": {
                    "POSE": {"code": "flag ? poseA : poseB", "precedence": "none"},
                    "DISTANCE_UNIT": {"code": "unit"}
                }
            }]}"#,
        )
        .unwrap();
        assert_eq!(
            program.blocks[0].inputs["GAIN_CONTROL"],
            Input::Code("camera".into())
        );
        assert!(matches!(program.blocks[1].inputs["POSE"], Input::Block(_)));
        assert_eq!(
            program.blocks[2].inputs["POSE"],
            Input::Literal {
                code: "flag ? poseA : poseB".into(),
                precedence: Precedence::None,
            }
        );
        assert_eq!(
            program.blocks[2].inputs["DISTANCE_UNIT"],
            Input::Literal {
                code: "unit".into(),
                precedence: Precedence::Atomic,
            }
        );
    }

    #[test]
    fn loose_literal_is_parenthesized_as_receiver() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(standard(), &config);
        let node = BlockNode::new("pose2D_getX")
            .literal("POSE", "flag ? poseA : poseB", Precedence::None)
            .code("DISTANCE_UNIT", "DistanceUnit.INCH");

        let mut warnings = Vec::new();
        let java = generator
            .generate_node(&node, Target::Java, &mut warnings)
            .unwrap();
        assert_eq!(
            java.emission.code(),
            "(flag ? poseA : poseB).getX(DistanceUnit.INCH)"
        );

        let js = generator
            .generate_node(&node, Target::JavaScript, &mut warnings)
            .unwrap();
        assert_eq!(
            js.emission.code(),
            "pose2DAccess.getX((flag ? poseA : poseB), DistanceUnit.INCH)"
        );
        assert!(warnings.is_empty());
    }
}
