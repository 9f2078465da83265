//! Gravity and position values.
//!
//! Gravity tells a crop mode which region of the source to keep.

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;
use crate::number::Number;

/// The nine compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompassGravity {
    NorthWest,
    North,
    NorthEast,
    West,
    #[default]
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl CompassGravity {
    pub const ALL: [CompassGravity; 9] = [
        CompassGravity::NorthWest,
        CompassGravity::North,
        CompassGravity::NorthEast,
        CompassGravity::West,
        CompassGravity::Center,
        CompassGravity::East,
        CompassGravity::SouthWest,
        CompassGravity::South,
        CompassGravity::SouthEast,
    ];

    pub fn token(self) -> &'static str {
        match self {
            CompassGravity::NorthWest => "north_west",
            CompassGravity::North => "north",
            CompassGravity::NorthEast => "north_east",
            CompassGravity::West => "west",
            CompassGravity::Center => "center",
            CompassGravity::East => "east",
            CompassGravity::SouthWest => "south_west",
            CompassGravity::South => "south",
            CompassGravity::SouthEast => "south_east",
        }
    }
}

impl fmt::Display for CompassGravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Focal hint for crop modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    Compass(CompassGravity),
    /// Let the delivery service pick the most interesting region.
    Auto,
    Face,
    Faces,
    /// Content-aware (seam carving) rescaling.
    Liquid,
}

impl Gravity {
    pub fn auto() -> Self {
        Gravity::Auto
    }

    pub fn compass(direction: CompassGravity) -> Self {
        Gravity::Compass(direction)
    }

    pub fn is_auto(self) -> bool {
        self == Gravity::Auto
    }

    pub fn token(self) -> &'static str {
        match self {
            Gravity::Compass(direction) => direction.token(),
            Gravity::Auto => "auto",
            Gravity::Face => "face",
            Gravity::Faces => "faces",
            Gravity::Liquid => "liquid",
        }
    }
}

impl From<CompassGravity> for Gravity {
    fn from(direction: CompassGravity) -> Self {
        Gravity::Compass(direction)
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Gravity {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "auto" => Ok(Gravity::Auto),
            "face" => Ok(Gravity::Face),
            "faces" => Ok(Gravity::Faces),
            "liquid" => Ok(Gravity::Liquid),
            _ => CompassGravity::ALL
                .iter()
                .copied()
                .find(|direction| direction.token() == s)
                .map(Gravity::Compass)
                .ok_or_else(|| TransformError::type_error(format!("unknown gravity '{}'", s))),
        }
    }
}

/// A compass anchor plus optional x/y offsets from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassPosition {
    pub gravity: CompassGravity,
    pub x: Option<Number>,
    pub y: Option<Number>,
}

impl CompassPosition {
    pub fn new(gravity: CompassGravity, x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self {
            gravity,
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    /// Anchor only, no offsets.
    pub fn anchor(gravity: CompassGravity) -> Self {
        Self {
            gravity,
            x: None,
            y: None,
        }
    }
}
