//! Quadrant-only 2D transforms.
//!
//! Footprint coordinates follow KiCad's convention: millimeters, +Y down,
//! positive angles rotate clockwise on screen.

use glam::DVec2;

use crate::error::{FootprintError, Result};

/// Standard keycap pitch in millimeters.
pub const UNIT_SIZE: f64 = 19.05;

pub const MM_PER_INCH: f64 = 25.4;

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// A rotation by a whole number of quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalize `angle` and map it to a quadrant.
    pub fn from_degrees(angle: i32) -> Result<Self> {
        match normalize_angle(angle) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(FootprintError::InvalidAngle(angle)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn rotate(self, p: DVec2) -> DVec2 {
        match self {
            Self::Deg0 => p,
            Self::Deg90 => DVec2::new(-p.y, p.x),
            Self::Deg180 => DVec2::new(-p.x, -p.y),
            Self::Deg270 => DVec2::new(p.y, -p.x),
        }
    }

    /// Width and height of an axis-aligned rectangle after rotation.
    pub fn rotate_size(self, size: DVec2) -> DVec2 {
        match self {
            Self::Deg0 | Self::Deg180 => size,
            Self::Deg90 | Self::Deg270 => DVec2::new(size.y, size.x),
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg0,
            Self::Deg90 => Self::Deg270,
            Self::Deg180 => Self::Deg180,
            Self::Deg270 => Self::Deg90,
        }
    }
}

/// Rotate a point around the origin by a multiple of 90 degrees clockwise.
pub fn rotate_point(point: DVec2, angle: i32) -> Result<DVec2> {
    Ok(Rotation::from_degrees(angle)?.rotate(point))
}

/// Rotate the dimensions of a rectangle by a multiple of 90 degrees.
pub fn rotate_rect(size: DVec2, angle: i32) -> Result<DVec2> {
    Ok(Rotation::from_degrees(angle)?.rotate_size(size))
}

/// Scale, then rotate, then translate.
///
/// Transforms are plain values. Derived transforms are built with
/// [`Transform::with_rotation`] and [`Transform::with_scale`]; the original
/// stays usable for sibling shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: DVec2,
    pub rotation: Rotation,
    pub scale: DVec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: DVec2::ZERO,
        rotation: Rotation::Deg0,
        scale: DVec2::ONE,
    };

    pub fn new(translate: DVec2, rotation: Rotation, scale: DVec2) -> Self {
        Self {
            translate,
            rotation,
            scale,
        }
    }

    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: DVec2) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.rotation.rotate(point * self.scale) + self.translate
    }

    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }

    pub fn with_scale(&self, scale: DVec2) -> Self {
        Self { scale, ..*self }
    }
}

/// Round `value` to the nearest multiple of `step`.
pub fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
