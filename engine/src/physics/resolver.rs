//! Preset + volume → impostor parameters

use super::{Impostor, PhysicsPreset, PhysicsState, ShapeKind};
use crate::core::context::EngineContext;
use crate::graphics::RenderHost;
use hecs::Entity;
use tracing::{debug, trace};

/// Concrete simulation parameters handed to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpostorParams {
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Invalid preset or shape detected while resolving
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsConfigError {
    #[error("movable preset requires a positive density, got {0}")]
    NonPositiveDensity(f32),

    #[error("movable body requires a positive volume, got {0}")]
    NonPositiveVolume(f32),

    #[error("movable body mass must be finite and positive, got {0}")]
    InvalidMass(f32),

    #[error("friction must be finite and non-negative, got {0}")]
    InvalidFriction(f32),

    #[error("restitution must be finite and non-negative, got {0}")]
    InvalidRestitution(f32),
}

/// Resolve a preset against a shape volume with the default resolver
pub fn resolve(
    preset: &PhysicsPreset,
    volume: f32,
) -> Result<Option<ImpostorParams>, PhysicsConfigError> {
    PhysicsPropertyResolver.resolve(preset, volume)
}

/// Maps physics presets to impostor parameters
///
/// Masses are `volume × density` with density a relative scale, so they only
/// compare meaningfully against other bodies resolved the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsPropertyResolver;

impl PhysicsPropertyResolver {
    /// Compute impostor parameters; `Ok(None)` means no impostor
    ///
    /// Static presets are massless whatever the volume. A movable preset
    /// needs a positive density and volume: a zero or negative mass would be
    /// simulated as a static body.
    pub fn resolve(
        &self,
        preset: &PhysicsPreset,
        volume: f32,
    ) -> Result<Option<ImpostorParams>, PhysicsConfigError> {
        let mass = match preset.state {
            PhysicsState::None => return Ok(None),
            PhysicsState::Static => 0.0,
            PhysicsState::Movable { density } => {
                if !(density.is_finite() && density > 0.0) {
                    return Err(PhysicsConfigError::NonPositiveDensity(density));
                }
                if !(volume.is_finite() && volume > 0.0) {
                    return Err(PhysicsConfigError::NonPositiveVolume(volume));
                }
                let mass = volume * density;
                if !(mass.is_finite() && mass > 0.0) {
                    return Err(PhysicsConfigError::InvalidMass(mass));
                }
                mass
            }
        };

        if !(preset.friction.is_finite() && preset.friction >= 0.0) {
            return Err(PhysicsConfigError::InvalidFriction(preset.friction));
        }
        if !(preset.restitution.is_finite() && preset.restitution >= 0.0) {
            return Err(PhysicsConfigError::InvalidRestitution(preset.restitution));
        }

        trace!(mass = mass, volume = volume, "Resolved impostor parameters");
        Ok(Some(ImpostorParams {
            mass,
            friction: preset.friction,
            restitution: preset.restitution,
        }))
    }

    /// Resolve a preset for an entity's shape and hand the impostor to the host
    ///
    /// The entity also receives an [`Impostor`] component mirroring the
    /// parameters. Returns the parameters, or `None` for presets without an
    /// impostor.
    pub fn attach<H: RenderHost>(
        &self,
        ctx: &mut EngineContext<H>,
        entity: Entity,
        shape: ShapeKind,
        preset: &PhysicsPreset,
    ) -> Result<Option<ImpostorParams>, PhysicsConfigError> {
        let Some(params) = self.resolve(preset, shape.volume())? else {
            debug!(entity = ?entity, "Preset has no impostor");
            return Ok(None);
        };

        ctx.host.create_impostor(entity, shape, params);
        if ctx.world.insert_one(entity, Impostor { shape, params }).is_err() {
            debug!(entity = ?entity, "Entity vanished before its impostor was recorded");
        }
        Ok(Some(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Transform;
    use crate::graphics::HeadlessHost;
    use crate::physics::presets;

    #[test]
    fn test_static_is_massless_for_any_volume() {
        for volume in [0.0, 0.5, 3.0, 1.0e6] {
            let params = resolve(&presets::WALL, volume).unwrap().unwrap();
            assert_eq!(params.mass, 0.0);
            assert_eq!(params.friction, presets::WALL.friction);
            assert_eq!(params.restitution, presets::WALL.restitution);
        }
    }

    #[test]
    fn test_movable_mass_is_volume_times_density() {
        let preset = PhysicsPreset::movable(2.0, 0.4, 0.2);
        let params = resolve(&preset, 3.0).unwrap().unwrap();
        assert_eq!(params.mass, 6.0);
        assert_eq!(params.friction, 0.4);
        assert_eq!(params.restitution, 0.2);
    }

    #[test]
    fn test_negative_density_is_rejected() {
        let preset = PhysicsPreset::movable(-1.0, 0.4, 0.2);
        assert_eq!(
            resolve(&preset, 3.0),
            Err(PhysicsConfigError::NonPositiveDensity(-1.0))
        );
    }

    #[test]
    fn test_zero_density_is_rejected() {
        let preset = PhysicsPreset::movable(0.0, 0.4, 0.2);
        assert!(matches!(
            resolve(&preset, 3.0),
            Err(PhysicsConfigError::NonPositiveDensity(_))
        ));
    }

    #[test]
    fn test_zero_volume_movable_is_rejected() {
        let preset = PhysicsPreset::movable(2.0, 0.4, 0.2);
        assert_eq!(
            resolve(&preset, 0.0),
            Err(PhysicsConfigError::NonPositiveVolume(0.0))
        );
    }

    #[test]
    fn test_underflowing_mass_is_rejected() {
        let preset = PhysicsPreset::movable(1.0e-30, 0.5, 0.0);
        assert_eq!(
            resolve(&preset, 1.0e-20),
            Err(PhysicsConfigError::InvalidMass(0.0))
        );
    }

    #[test]
    fn test_overflowing_mass_is_rejected() {
        let preset = PhysicsPreset::movable(1.0e30, 0.5, 0.0);
        assert!(matches!(
            resolve(&preset, 1.0e20),
            Err(PhysicsConfigError::InvalidMass(mass)) if mass.is_infinite()
        ));
    }

    #[test]
    fn test_none_produces_no_impostor() {
        assert_eq!(resolve(&presets::DECORATION, 10.0), Ok(None));
    }

    #[test]
    fn test_negative_friction_is_rejected() {
        let preset = PhysicsPreset::fixed(-0.1, 0.0);
        assert!(matches!(
            resolve(&preset, 1.0),
            Err(PhysicsConfigError::InvalidFriction(_))
        ));
    }

    #[test]
    fn test_attach_creates_impostor_and_component() {
        let mut ctx = EngineContext::new(HeadlessHost::new());
        let entity = ctx.world.spawn((Transform::default(),));
        let shape = ShapeKind::cuboid(glam::Vec3::new(1.0, 1.0, 3.0));

        let params = PhysicsPropertyResolver
            .attach(&mut ctx, entity, shape, &PhysicsPreset::movable(2.0, 0.5, 0.0))
            .unwrap()
            .unwrap();

        assert!((params.mass - 6.0).abs() < 1e-5);
        assert_eq!(ctx.host.impostor_for(entity), Some(params));
        let impostor = ctx.world.get::<Impostor>(entity).unwrap();
        assert_eq!(impostor.shape, shape);
    }

    #[test]
    fn test_attach_none_skips_host() {
        let mut ctx = EngineContext::new(HeadlessHost::new());
        let entity = ctx.world.spawn((Transform::default(),));

        let params = PhysicsPropertyResolver
            .attach(&mut ctx, entity, ShapeKind::default(), &presets::DECORATION)
            .unwrap();

        assert_eq!(params, None);
        assert_eq!(ctx.host.impostor_count(), 0);
        assert!(ctx.world.get::<Impostor>(entity).is_err());
    }
}
