//! Target capability: the mutable entity actions read and write.
//!
//! The action system never owns the object it animates. The driver pairs an
//! action tree with a [`Target`] and passes the same target into every
//! lifecycle call; actions only ever touch the target they are driven
//! against.
//!
//! Generic attribute access goes through the closed [`Attribute`] key set
//! rather than reflective field lookup, so every animatable field maps to a
//! typed accessor on the trait.

use serde::{Deserialize, Serialize};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise negation.
    pub fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Keys for generic numeric attribute access.
///
/// Each key maps to a pair of accessors on [`Target`]; there is no
/// open-ended string-keyed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Rotation angle in degrees.
    Rotation,
    /// Opacity, 0–255.
    Opacity,
    /// Uniform scale factor.
    Scale,
}

/// A mutable entity whose attributes actions interpolate.
///
/// Implementors expose position, rotation (degrees), opacity (0–255),
/// uniform scale, and a visibility flag. The default `attribute`/
/// `set_attribute` methods route [`Attribute`] keys to these accessors.
pub trait Target {
    fn x(&self) -> f64;
    fn set_x(&mut self, x: f64);

    fn y(&self) -> f64;
    fn set_y(&mut self, y: f64);

    /// Rotation angle in degrees.
    fn rotation(&self) -> f64;
    fn set_rotation(&mut self, degrees: f64);

    /// Opacity in `[0, 255]`.
    fn opacity(&self) -> u8;
    fn set_opacity(&mut self, opacity: u8);

    /// Uniform scale factor.
    fn scale(&self) -> f64;
    fn set_scale(&mut self, scale: f64);

    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    /// Read a numeric attribute by key.
    fn attribute(&self, key: Attribute) -> f64 {
        match key {
            Attribute::X => self.x(),
            Attribute::Y => self.y(),
            Attribute::Rotation => self.rotation(),
            Attribute::Opacity => f64::from(self.opacity()),
            Attribute::Scale => self.scale(),
        }
    }

    /// Write a numeric attribute by key.
    ///
    /// Opacity writes are rounded and clamped into `[0, 255]`.
    fn set_attribute(&mut self, key: Attribute, value: f64) {
        match key {
            Attribute::X => self.set_x(value),
            Attribute::Y => self.set_y(value),
            Attribute::Rotation => self.set_rotation(value),
            Attribute::Opacity => self.set_opacity(clamp_opacity(value)),
            Attribute::Scale => self.set_scale(value),
        }
    }
}

/// Round and clamp a floating-point opacity into the `u8` range.
pub(crate) fn clamp_opacity(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// A sprite-like sample target.
///
/// Used by the tests, the examples, and the demo driver; real applications
/// implement [`Target`] on their own entities instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub opacity: u8,
    pub scale: f64,
    pub visible: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            opacity: 255,
            scale: 1.0,
            visible: true,
        }
    }
}

impl Node {
    /// Create a node at the given position with default visual attributes.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Current position as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Target for Node {
    fn x(&self) -> f64 {
        self.x
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    fn opacity(&self) -> u8 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_accessors_route_to_fields() {
        let mut node = Node::default();
        node.set_attribute(Attribute::X, 10.0);
        node.set_attribute(Attribute::Y, -4.0);
        node.set_attribute(Attribute::Rotation, 90.0);
        node.set_attribute(Attribute::Scale, 2.0);

        assert_eq!(node.attribute(Attribute::X), 10.0);
        assert_eq!(node.attribute(Attribute::Y), -4.0);
        assert_eq!(node.attribute(Attribute::Rotation), 90.0);
        assert_eq!(node.attribute(Attribute::Scale), 2.0);
    }

    #[test]
    fn test_opacity_attribute_rounds_and_clamps() {
        let mut node = Node::default();

        node.set_attribute(Attribute::Opacity, 127.6);
        assert_eq!(node.opacity, 128);

        node.set_attribute(Attribute::Opacity, -20.0);
        assert_eq!(node.opacity, 0);

        node.set_attribute(Attribute::Opacity, 400.0);
        assert_eq!(node.opacity, 255);
    }

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(b - a, Vec2::new(2.0, -3.0));
        assert_eq!(a.neg(), Vec2::new(-1.0, -2.0));
        assert_eq!(Vec2::from((5.0, 6.0)), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_attribute_serde_names() {
        let json = serde_json::to_string(&Attribute::Rotation).unwrap();
        assert_eq!(json, "\"rotation\"");
    }
}
