//! Pose2D blocks: construction and accessors of a 2D field position.

use super::style::{FUNCTION_COLOUR, POSE_2D};
use ftcblocks_core::{
    BlockKind, BlockRegistry, BlockView, Emitters, Field, Fragment, Imports, Lookup, Precedence,
    RegistryError, Socket, call, construct,
};

const FAMILY: &str = "pose2D";
const CLASS: &str = "Pose2D";
const CREATE_ARGS: [&str; 5] = ["DISTANCE_UNIT", "X", "Y", "ANGLE_UNIT", "HEADING"];

/// Registers every Pose2D kind.
pub fn register(registry: &mut BlockRegistry) -> Result<(), RegistryError> {
    registry.register(create_kind(), Emitters::native(create_js, create_java))?;
    registry.register(
        accessor(
            "getX",
            "DISTANCE_UNIT",
            "DistanceUnit",
            "Returns the X coordinate, in the given distance unit.",
        ),
        Emitters::native(get_x_js, get_x_java),
    )?;
    registry.register(
        accessor(
            "getY",
            "DISTANCE_UNIT",
            "DistanceUnit",
            "Returns the Y coordinate, in the given distance unit.",
        ),
        Emitters::native(get_y_js, get_y_java),
    )?;
    registry.register(
        accessor(
            "getHeading",
            "ANGLE_UNIT",
            "AngleUnit",
            "Returns the heading, in the given angle unit.",
        ),
        Emitters::native(get_heading_js, get_heading_java),
    )?;
    registry.register(to_text_kind(), Emitters::native(to_text_js, to_text_java))?;
    Ok(())
}

fn create_kind() -> BlockKind {
    BlockKind::value("pose2D_create", Some(CLASS))
        .category(POSE_2D)
        .colour(FUNCTION_COLOUR)
        .field(Field::label("new"))
        .field(Field::non_editable(CLASS))
        .socket(Socket::new("DISTANCE_UNIT", "distanceUnit").check("DistanceUnit"))
        .socket(Socket::new("X", "x").check("Number"))
        .socket(Socket::new("Y", "y").check("Number"))
        .socket(Socket::new("ANGLE_UNIT", "angleUnit").check("AngleUnit"))
        .socket(Socket::new("HEADING", "heading").check("Number"))
        .tooltip(Lookup::fixed(
            "Creates a new Pose2D object from a position and a heading.",
        ))
        .java_output(CLASS)
        .java_input("DISTANCE_UNIT", "DistanceUnit")
        .java_input("X", "double")
        .java_input("Y", "double")
        .java_input("ANGLE_UNIT", "AngleUnit")
        .java_input("HEADING", "double")
}

fn accessor(method: &str, unit_socket: &str, unit_class: &str, tooltip: &str) -> BlockKind {
    let unit_label = if unit_class == "AngleUnit" {
        "angleUnit"
    } else {
        "distanceUnit"
    };
    BlockKind::value(format!("{}_{}", FAMILY, method), Some("Number"))
        .category(POSE_2D)
        .colour(FUNCTION_COLOUR)
        .field(Field::label("call"))
        .field(Field::non_editable(CLASS))
        .field(Field::label("."))
        .field(Field::non_editable(method))
        .socket(Socket::new("POSE", "pose").check(CLASS))
        .socket(Socket::new(unit_socket, unit_label).check(unit_class))
        .tooltip(Lookup::fixed(tooltip))
        .java_output("double")
        .java_input("POSE", CLASS)
        .java_input(unit_socket, unit_class)
}

fn to_text_kind() -> BlockKind {
    BlockKind::value("pose2D_toText", Some("String"))
        .category(POSE_2D)
        .colour(FUNCTION_COLOUR)
        .field(Field::label("call"))
        .field(Field::non_editable(CLASS))
        .field(Field::label("."))
        .field(Field::non_editable("toText"))
        .socket(Socket::new("POSE", "pose").check(CLASS))
        .tooltip(Lookup::fixed("Returns a text representation of the pose."))
        .java_output("String")
        .java_input("POSE", CLASS)
}

fn access_call(view: &BlockView<'_>, method: &str, sockets: &[&str]) -> Fragment {
    let args = view.values(sockets, Precedence::Comma);
    Fragment::new(
        call(&view.identifier(FAMILY), method, &args),
        Precedence::FunctionCall,
    )
}

fn pose_call(view: &BlockView<'_>, method: &str, sockets: &[&str]) -> Fragment {
    let pose = view.value("POSE", Precedence::Member);
    let args = view.values(sockets, Precedence::Comma);
    Fragment::new(call(&pose, method, &args), Precedence::FunctionCall)
}

fn create_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "create", &CREATE_ARGS)
}

fn create_java(view: &BlockView<'_>, imports: &mut Imports) -> Fragment {
    imports.require(CLASS);
    let args = view.values(&CREATE_ARGS, Precedence::Comma);
    Fragment::new(construct(CLASS, &args), Precedence::New)
}

fn get_x_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getX", &["POSE", "DISTANCE_UNIT"])
}

fn get_x_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    pose_call(view, "getX", &["DISTANCE_UNIT"])
}

fn get_y_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getY", &["POSE", "DISTANCE_UNIT"])
}

fn get_y_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    pose_call(view, "getY", &["DISTANCE_UNIT"])
}

fn get_heading_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getHeading", &["POSE", "ANGLE_UNIT"])
}

fn get_heading_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    pose_call(view, "getHeading", &["ANGLE_UNIT"])
}

fn to_text_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "toText", &["POSE"])
}

// Java has no toText; Pose2D.toString() produces the same text.
fn to_text_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    pose_call(view, "toString", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftcblocks_core::{FieldValues, Imports as ImportSet, ResolvedInputs, Target};

    fn registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        register(&mut registry).unwrap();
        registry
    }

    fn create_inputs() -> ResolvedInputs {
        ResolvedInputs::new()
            .with("DISTANCE_UNIT", "DistanceUnit.INCH", Precedence::Member)
            .with("X", "1", Precedence::Atomic)
            .with("Y", "2", Precedence::Atomic)
            .with("ANGLE_UNIT", "AngleUnit.DEGREES", Precedence::Member)
            .with("HEADING", "90", Precedence::Atomic)
    }

    #[test]
    fn create_in_java_constructs_and_imports_once() {
        let registry = registry();
        let fields = FieldValues::new();
        let inputs = create_inputs();
        let view = BlockView::new(&fields, &inputs);

        let mut imports = ImportSet::new();
        for _ in 0..2 {
            let generated = registry.emit("pose2D_create", &view, Target::Java).unwrap();
            assert_eq!(
                generated.emission.code(),
                "new Pose2D(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90)"
            );
            assert_eq!(generated.emission.precedence(), Some(Precedence::New));
            imports.extend(generated.imports);
        }
        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["Pose2D"]);
    }

    #[test]
    fn create_in_javascript_calls_access_object() {
        let registry = registry();
        let fields = FieldValues::new();
        let inputs = create_inputs();
        let view = BlockView::new(&fields, &inputs);
        let generated = registry
            .emit("pose2D_create", &view, Target::JavaScript)
            .unwrap();
        assert_eq!(
            generated.emission.code(),
            "pose2DAccess.create(DistanceUnit.INCH, 1, 2, AngleUnit.DEGREES, 90)"
        );
        assert!(generated.imports.is_empty());
    }

    #[test]
    fn empty_sockets_leave_positional_gaps() {
        let registry = registry();
        let fields = FieldValues::new();
        let inputs = ResolvedInputs::new().with("Y", "2", Precedence::Atomic);
        let view = BlockView::new(&fields, &inputs);
        let generated = registry.emit("pose2D_create", &view, Target::Java).unwrap();
        assert_eq!(generated.emission.code(), "new Pose2D(, , 2, , )");
    }

    #[test]
    fn accessor_chains_call_receiver() {
        let registry = registry();
        let fields = FieldValues::new();
        let inputs = ResolvedInputs::new()
            .with("POSE", "odometry.getPose()", Precedence::FunctionCall)
            .with("ANGLE_UNIT", "AngleUnit.RADIANS", Precedence::Member);
        let view = BlockView::new(&fields, &inputs);
        let generated = registry
            .emit("pose2D_getHeading", &view, Target::Java)
            .unwrap();
        assert_eq!(
            generated.emission.code(),
            "odometry.getPose().getHeading(AngleUnit.RADIANS)"
        );
    }

    #[test]
    fn to_text_renames_method_for_java() {
        let registry = registry();
        let fields = FieldValues::new();
        let inputs = ResolvedInputs::new().with("POSE", "pose", Precedence::Atomic);
        let view = BlockView::new(&fields, &inputs);

        let js = registry.emit("pose2D_toText", &view, Target::JavaScript).unwrap();
        let java = registry.emit("pose2D_toText", &view, Target::Java).unwrap();
        assert_eq!(js.emission.code(), "pose2DAccess.toText(pose)");
        assert_eq!(java.emission.code(), "pose.toString()");
    }
}
