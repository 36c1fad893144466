//! Typed enum blocks for distance and angle units.

use super::style::{ENUM_COLOUR, UNITS};
use ftcblocks_core::{
    BlockKind, BlockRegistry, Emitter, Emitters, Field, Lookup, RegistryError, Template,
    TemplateEmitter,
};

const DISTANCE_UNITS: [(&str, &str); 4] = [
    ("INCH", "The DistanceUnit value INCH."),
    ("CM", "The DistanceUnit value CM (centimeters)."),
    ("MM", "The DistanceUnit value MM (millimeters)."),
    ("METER", "The DistanceUnit value METER."),
];

const ANGLE_UNITS: [(&str, &str); 2] = [
    ("DEGREES", "The AngleUnit value DEGREES."),
    ("RADIANS", "The AngleUnit value RADIANS."),
];

/// Registers the unit enum kinds.
pub fn register(registry: &mut BlockRegistry) -> Result<(), RegistryError> {
    register_enum(
        registry,
        "distanceUnit_typedEnum",
        "DistanceUnit",
        "DISTANCE_UNIT",
        &DISTANCE_UNITS,
    )?;
    register_enum(
        registry,
        "angleUnit_typedEnum",
        "AngleUnit",
        "ANGLE_UNIT",
        &ANGLE_UNITS,
    )?;
    Ok(())
}

fn register_enum(
    registry: &mut BlockRegistry,
    name: &str,
    class: &str,
    field: &str,
    values: &[(&str, &str)],
) -> Result<(), RegistryError> {
    let choices: Vec<&str> = values.iter().map(|(value, _)| *value).collect();
    let kind = BlockKind::value(name, Some(class))
        .category(UNITS)
        .colour(ENUM_COLOUR)
        .field(Field::non_editable(class))
        .field(Field::label("."))
        .field(Field::dropdown(field, &choices))
        .tooltip(Lookup::by_field(field, values))
        .java_output(class);

    let constant = Template::EnumValue {
        class: class.to_string(),
        field: field.to_string(),
    };
    let emitters = Emitters {
        javascript: Emitter::Template(TemplateEmitter::new(constant.clone())),
        java: Emitter::Template(TemplateEmitter::new(constant).import(class)),
    };
    registry.register(kind, emitters)
}
