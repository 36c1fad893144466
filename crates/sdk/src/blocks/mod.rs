//! Built-in FTC SDK block kinds.

pub mod gain_control;
pub mod pose2d;
pub mod style;
pub mod units;

use ftcblocks_core::{BlockRegistry, RegistryError};

/// Java packages of the SDK types the built-in blocks import.
pub const JAVA_PACKAGES: &[(&str, &str)] = &[
    ("AngleUnit", "org.firstinspires.ftc.robotcore.external.navigation"),
    ("DistanceUnit", "org.firstinspires.ftc.robotcore.external.navigation"),
    (
        "GainControl",
        "org.firstinspires.ftc.robotcore.external.hardware.camera.controls",
    ),
    ("Pose2D", "org.firstinspires.ftc.robotcore.external.navigation"),
];

/// Registers every built-in kind.
pub fn register_all(registry: &mut BlockRegistry) -> Result<(), RegistryError> {
    gain_control::register(registry)?;
    pose2d::register(registry)?;
    units::register(registry)?;
    Ok(())
}

/// Package of a built-in SDK type.
pub fn java_package(type_name: &str) -> Option<&'static str> {
    JAVA_PACKAGES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, package)| *package)
}
