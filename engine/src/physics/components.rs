//! Physics components for the entity system

use super::ImpostorParams;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Collision shape of an impostor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Box with half-extents (width/2, height/2, depth/2)
    Box { half_extents: Vec3 },
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Cylinder with radius and half-height along Y
    Cylinder { radius: f32, half_height: f32 },
    /// Capsule with radius and half-height of the cylindrical part along Y
    Capsule { radius: f32, half_height: f32 },
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Box {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl ShapeKind {
    /// Box shape from full edge lengths
    pub fn cuboid(size: Vec3) -> Self {
        ShapeKind::Box {
            half_extents: size * 0.5,
        }
    }

    /// Box enclosing an axis-aligned bounding box
    pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
        Self::cuboid((max - min).abs())
    }

    /// Volume of the shape in world units
    pub fn volume(&self) -> f32 {
        match *self {
            ShapeKind::Box { half_extents } => {
                let size = half_extents * 2.0;
                size.x * size.y * size.z
            }
            ShapeKind::Sphere { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            ShapeKind::Cylinder {
                radius,
                half_height,
            } => PI * radius * radius * half_height * 2.0,
            ShapeKind::Capsule {
                radius,
                half_height,
            } => PI * radius * radius * half_height * 2.0 + 4.0 / 3.0 * PI * radius.powi(3),
        }
    }

    /// The shape with a transform's scale applied
    ///
    /// Round shapes take the largest horizontal axis for their radius.
    /// Mirrored axes keep their magnitude.
    pub fn scaled(&self, scale: Vec3) -> Self {
        let scale = scale.abs();
        match *self {
            ShapeKind::Box { half_extents } => ShapeKind::Box {
                half_extents: half_extents * scale,
            },
            ShapeKind::Sphere { radius } => ShapeKind::Sphere {
                radius: radius * scale.max_element(),
            },
            ShapeKind::Cylinder {
                radius,
                half_height,
            } => ShapeKind::Cylinder {
                radius: radius * scale.x.max(scale.z),
                half_height: half_height * scale.y,
            },
            ShapeKind::Capsule {
                radius,
                half_height,
            } => ShapeKind::Capsule {
                radius: radius * scale.x.max(scale.z),
                half_height: half_height * scale.y,
            },
        }
    }
}

/// Impostor attached to an entity, mirroring what the host was given
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impostor {
    pub shape: ShapeKind,
    pub params: ImpostorParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_volume() {
        let shape = ShapeKind::cuboid(Vec3::new(1.0, 2.0, 3.0));
        assert!((shape.volume() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_volume() {
        let shape = ShapeKind::Sphere { radius: 1.0 };
        assert!((shape.volume() - 4.18879).abs() < 1e-4);
    }

    #[test]
    fn test_capsule_is_cylinder_plus_sphere() {
        let capsule = ShapeKind::Capsule {
            radius: 0.5,
            half_height: 1.0,
        };
        let cylinder = ShapeKind::Cylinder {
            radius: 0.5,
            half_height: 1.0,
        };
        let sphere = ShapeKind::Sphere { radius: 0.5 };
        assert!((capsule.volume() - (cylinder.volume() + sphere.volume())).abs() < 1e-5);
    }

    #[test]
    fn test_mirrored_scale_keeps_positive_volume() {
        let mirrored = ShapeKind::cuboid(Vec3::ONE).scaled(Vec3::new(-1.0, 2.0, 1.0));
        assert!((mirrored.volume() - 2.0).abs() < 1e-5);

        let sphere = ShapeKind::Sphere { radius: 0.5 }.scaled(Vec3::splat(-2.0));
        assert_eq!(sphere, ShapeKind::Sphere { radius: 1.0 });
    }

    #[test]
    fn test_from_bounds() {
        let shape = ShapeKind::from_bounds(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(
            shape,
            ShapeKind::Box {
                half_extents: Vec3::new(1.0, 0.5, 1.0)
            }
        );
    }

    #[test]
    fn test_scaled_box() {
        let shape = ShapeKind::default().scaled(Vec3::new(2.0, 4.0, 6.0));
        assert!((shape.volume() - 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_shape_json() {
        let json = r#"{"type":"sphere","radius":2.0}"#;
        let shape: ShapeKind = serde_json::from_str(json).unwrap();
        assert_eq!(shape, ShapeKind::Sphere { radius: 2.0 });
    }
}
