//! Camera projection parameters

use serde::{Deserialize, Serialize};

/// Perspective projection parameters of a scene camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    /// Field of view in radians
    pub fov_y_radians: f32,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Near clipping plane distance
    pub z_near: f32,
    /// Far clipping plane distance
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl Projection {
    /// Create a perspective projection
    ///
    /// # Arguments
    /// * `fov_y_degrees` - Vertical field of view in degrees
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance
    /// * `z_far` - Far clipping plane distance
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_radians: fov_y_degrees.to_radians(),
            aspect_ratio,
            z_near,
            z_far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_stores_radians() {
        let projection = Projection::perspective(90.0, 4.0 / 3.0, 0.1, 500.0);
        assert!((projection.fov_y_radians - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(projection.aspect_ratio, 4.0 / 3.0);
        assert_eq!(projection.z_far, 500.0);
    }
}
