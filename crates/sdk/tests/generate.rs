use ftcblocks_core::{Shape, StaticSource, Target, load_generated_kinds};
use ftcblocks_sdk::{BlockNode, Generator, GeneratorConfig, Program, standard, standard_registry};

fn gain_and_pose_program() -> Program {
    let pose = BlockNode::new("pose2D_create")
        .block(
            "DISTANCE_UNIT",
            BlockNode::new("distanceUnit_typedEnum").field("DISTANCE_UNIT", "INCH"),
        )
        .code("X", "1")
        .code("Y", "2")
        .block(
            "ANGLE_UNIT",
            BlockNode::new("angleUnit_typedEnum").field("ANGLE_UNIT", "DEGREES"),
        )
        .code("HEADING", "90");

    Program {
        blocks: vec![
            BlockNode::new("gainControl_setGain")
                .shape(Shape::Statement)
                .code("GAIN_CONTROL", "gainControl")
                .code("GAIN", "50"),
            BlockNode::new("gainControl_getGain").code("GAIN_CONTROL", "gainControl"),
            BlockNode::new("pose2D_toText").block("POSE", pose),
        ],
    }
}

#[test]
fn java_program_with_imports() {
    let config = GeneratorConfig::default();
    let generated = Generator::new(standard(), &config)
        .generate(&gain_and_pose_program(), Target::Java)
        .expect("generate should succeed");

    assert!(generated.warnings.is_empty());
    insta::assert_snapshot!(generated.to_source(), @r"
    import org.firstinspires.ftc.robotcore.external.navigation.AngleUnit;
    import org.firstinspires.ftc.robotcore.external.navigation.DistanceUnit;
    import org.firstinspires.ftc.robotcore.external.navigation.Pose2D;

    gainControl.setGain(50);
    gainControl.getGain();
    new Pose2D(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90).toString();
    ");
}

#[test]
fn javascript_program_uses_access_objects() {
    let config = GeneratorConfig::default();
    let generated = Generator::new(standard(), &config)
        .generate(&gain_and_pose_program(), Target::JavaScript)
        .expect("generate should succeed");

    assert!(generated.imports.is_empty());
    insta::assert_snapshot!(generated.to_source(), @r"
    gainControlAccess.setGain(gainControl, 50);
    gainControlAccess.getGain(gainControl);
    pose2DAccess.toText(pose2DAccess.create(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90));
    ");
}

#[test]
fn indent_and_identifier_overrides_apply() {
    let config = GeneratorConfig::from_json(
        r#"{"indent": "  ", "identifiers": {"gainControl": "cameraGain"}}"#,
    )
    .expect("valid config");
    let program = Program {
        blocks: vec![
            BlockNode::new("gainControl_getMaxGain").code("GAIN_CONTROL", "camera"),
        ],
    };
    let generated = Generator::new(standard(), &config)
        .generate(&program, Target::JavaScript)
        .expect("generate should succeed");

    assert_eq!(generated.code, "  cameraGain.getMaxGain(camera);\n");
}

#[test]
fn toggling_shape_keeps_expression_text() {
    let config = GeneratorConfig::default();
    let generator = Generator::new(standard(), &config);
    let node = BlockNode::new("gainControl_setGain")
        .code("GAIN_CONTROL", "gainControl")
        .code("GAIN", "50");

    for target in [Target::JavaScript, Target::Java] {
        let expression = generator
            .generate_node(&node, target, &mut Vec::new())
            .expect("emit expression");
        let statement = generator
            .generate_node(&node.clone().shape(Shape::Statement), target, &mut Vec::new())
            .expect("emit statement");

        assert!(!expression.emission.is_statement());
        assert!(statement.emission.is_statement());
        assert_eq!(
            format!("{};\n", expression.emission.code()),
            statement.emission.code()
        );
    }
}

const CLAW_KINDS: &str = r#"[
    {
        "name": "claw_setOpen",
        "category": "Claw",
        "connection": {"type": "statement"},
        "fields": [{"type": "label", "text": "set claw open"}],
        "sockets": [{"name": "OPEN", "label": "open", "check": "Boolean"}],
        "tooltip": {"kind": "fixed", "text": "Opens or closes the claw."},
        "javascript": {
            "form": "call",
            "receiver": {"family": "claw"},
            "method": "setOpen",
            "args": [{"socket": "OPEN"}]
        },
        "java": {
            "form": "call",
            "receiver": {"identifier": "claw"},
            "method": "setOpen",
            "args": [{"socket": "OPEN"}],
            "imports": ["Claw"]
        }
    }
]"#;

#[test]
fn generated_kinds_extend_the_standard_registry() {
    let mut registry = standard_registry().expect("built-ins register");
    let source = StaticSource::new(CLAW_KINDS, "Competition Bot");
    let names = load_generated_kinds(&mut registry, &source).expect("kinds install");
    assert_eq!(names, vec!["claw_setOpen"]);

    let program = Program::from_json(
        r#"{"blocks": [{"kind": "claw_setOpen", "inputs": {"OPEN": "true"}}]}"#,
    )
    .expect("valid program");

    let config = GeneratorConfig::from_json(r#"{"javaPackages": {"Claw": "org.team.hardware"}}"#)
        .expect("valid config");
    let generator = Generator::new(&registry, &config);

    let js = generator
        .generate(&program, Target::JavaScript)
        .expect("generate js");
    assert_eq!(js.code, "clawAccess.setOpen(true);\n");

    let java = generator
        .generate(&program, Target::Java)
        .expect("generate java");
    assert_eq!(java.code, "claw.setOpen(true);\n");
    assert_eq!(java.imports, vec!["import org.team.hardware.Claw;"]);
}

#[test]
fn unknown_import_package_is_a_warning() {
    let mut registry = standard_registry().expect("built-ins register");
    let source = StaticSource::new(CLAW_KINDS, "Competition Bot");
    load_generated_kinds(&mut registry, &source).expect("kinds install");

    let program = Program {
        blocks: vec![BlockNode::new("claw_setOpen").code("OPEN", "false")],
    };
    let config = GeneratorConfig::default();
    let java = Generator::new(&registry, &config)
        .generate(&program, Target::Java)
        .expect("generate java");

    assert!(java.imports.is_empty());
    assert_eq!(java.warnings, vec!["no Java package known for Claw"]);
}
