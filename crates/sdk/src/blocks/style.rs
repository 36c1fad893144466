//! Toolbox categories and hues shared by the built-in blocks.

/// Hue of blocks that call SDK methods.
pub const FUNCTION_COLOUR: u16 = 289;
/// Hue of enum constant blocks.
pub const ENUM_COLOUR: u16 = 147;

/// Gain control category.
pub const GAIN_CONTROL: &str = "Gain Control";
/// Pose2D category.
pub const POSE_2D: &str = "Pose2D";
/// Units category.
pub const UNITS: &str = "Units";
