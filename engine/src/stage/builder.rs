//! Phase-by-phase stage construction

use super::{HudModel, ImportFailure, PhaseCursor, StageInitError, StagePhase};
use crate::assets::{join, AssetStore, CancellationToken, ImportOutcome, ImportRequest, LoadError};
use crate::config::{LoadFailurePolicy, StageConfig};
use crate::core::camera::{CameraMultiplexer, CameraType};
use crate::core::context::EngineContext;
use crate::core::entity::{
    Entity, EntityKind, Name, ShadowCaster, ShadowReceiver, Transform, Visible,
};
use crate::graphics::RenderHost;
use crate::io::{BodyDef, LevelDefinition, LightKind};
use crate::physics::{PhysicsPreset, PhysicsPropertyResolver, ShapeKind};
use glam::Vec3;
use tracing::{debug, info, warn};

/// Light component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
}

/// Shadow map attached to a light
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowGenerator {
    pub light: Entity,
    pub map_size: u32,
    /// Meshes rendered into the shadow map
    pub casters: Vec<Entity>,
}

/// Entities built by the phases before the import
///
/// Only [`StageBuilder::populate`] produces this, so later phases cannot run
/// without the player phase having run.
#[derive(Debug)]
pub struct Populated {
    pub player: Option<Entity>,
    pub walls: Vec<Entity>,
    pub movables: Vec<Entity>,
    pub items: Vec<Entity>,
    pub bots: Vec<Entity>,
    _sealed: (),
}

/// Entities built from the import outcomes
#[derive(Debug)]
pub struct Imported {
    pub meshes: Vec<Entity>,
    pub placeholders: Vec<Entity>,
    pub failures: Vec<ImportFailure>,
    _sealed: (),
}

/// A fully constructed stage
#[derive(Debug)]
pub struct Stage {
    pub name: String,
    pub player: Option<Entity>,
    pub walls: Vec<Entity>,
    pub movables: Vec<Entity>,
    pub items: Vec<Entity>,
    pub bots: Vec<Entity>,
    pub imported: Vec<Entity>,
    pub placeholders: Vec<Entity>,
    pub import_failures: Vec<ImportFailure>,
    pub skybox: Option<Entity>,
    pub sprites: Vec<Entity>,
    pub lights: Vec<Entity>,
    pub shadow_generators: Vec<ShadowGenerator>,
    pub cameras: CameraMultiplexer,
    pub hud: HudModel,
}

impl Stage {
    /// Per-frame update: camera keys, camera tracking, HUD counts
    pub fn update<H: RenderHost>(&mut self, ctx: &mut EngineContext<H>) {
        self.cameras.handle_input(ctx);
        self.cameras.update(&ctx.world);
        self.hud.refresh(&ctx.world, self.cameras.active_type());
    }

    pub fn switch_camera<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
        camera_type: CameraType,
    ) -> CameraType {
        let active = self.cameras.set_active_scene_camera(ctx, camera_type);
        self.hud.refresh(&ctx.world, active);
        active
    }
}

/// Runs the construction phases of one stage in order
#[derive(Debug)]
pub struct StageBuilder {
    level: LevelDefinition,
    config: StageConfig,
    resolver: PhysicsPropertyResolver,
    cursor: PhaseCursor,
}

impl StageBuilder {
    pub fn new(level: LevelDefinition, config: StageConfig) -> Self {
        Self {
            level,
            config,
            resolver: PhysicsPropertyResolver,
            cursor: PhaseCursor::new(),
        }
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The phase most recently entered
    pub fn phase(&self) -> Option<StagePhase> {
        self.cursor.current()
    }

    /// Run CreatePlayer through CreateBots
    pub fn populate<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
    ) -> Result<Populated, StageInitError> {
        info!(level = %self.level.name, "Building stage");

        self.cursor.enter(StagePhase::CreatePlayer);
        let player = self
            .level
            .player
            .as_ref()
            .map(|def| self.spawn_body(ctx, EntityKind::Player, def, "player".to_string()))
            .transpose()?;

        self.cursor.enter(StagePhase::CreateWalls);
        let walls = self.spawn_bodies(ctx, EntityKind::Wall, &self.level.walls, "wall")?;

        self.cursor.enter(StagePhase::CreateMovables);
        let movables =
            self.spawn_bodies(ctx, EntityKind::Movable, &self.level.movables, "movable")?;

        self.cursor.enter(StagePhase::CreateItems);
        let items = self
            .level
            .items
            .iter()
            .map(|def| {
                ctx.world.spawn((
                    EntityKind::Item,
                    Name::new(def.name.clone()),
                    Transform::from_position(def.position),
                    Visible(true),
                ))
            })
            .collect();

        self.cursor.enter(StagePhase::CreateBots);
        let bots = self.spawn_bodies(ctx, EntityKind::Bot, &self.level.bots, "bot")?;

        Ok(Populated {
            player,
            walls,
            movables,
            items,
            bots,
            _sealed: (),
        })
    }

    fn spawn_bodies<H: RenderHost>(
        &self,
        ctx: &mut EngineContext<H>,
        kind: EntityKind,
        defs: &[BodyDef],
        prefix: &str,
    ) -> Result<Vec<Entity>, StageInitError> {
        defs.iter()
            .enumerate()
            .map(|(index, def)| self.spawn_body(ctx, kind, def, format!("{prefix}-{index}")))
            .collect()
    }

    fn spawn_body<H: RenderHost>(
        &self,
        ctx: &mut EngineContext<H>,
        kind: EntityKind,
        def: &BodyDef,
        fallback_name: String,
    ) -> Result<Entity, StageInitError> {
        let name = def.name.clone().unwrap_or(fallback_name);
        let preset = def.preset.resolve()?;
        let entity = ctx.world.spawn((
            kind,
            Name::new(name.clone()),
            Transform::from_position(def.position),
            Visible(true),
        ));
        self.attach_physics(ctx, entity, def.shape, &preset, name)?;
        Ok(entity)
    }

    fn attach_physics<H: RenderHost>(
        &self,
        ctx: &mut EngineContext<H>,
        entity: Entity,
        shape: ShapeKind,
        preset: &PhysicsPreset,
        name: String,
    ) -> Result<(), StageInitError> {
        self.resolver
            .attach(ctx, entity, shape, preset)
            .map_err(|source| StageInitError::Physics {
                entity: name,
                source,
            })?;
        Ok(())
    }

    /// Enter ImportMeshes and list the models to request
    pub fn import_requests(&mut self) -> Vec<ImportRequest> {
        self.cursor.enter(StagePhase::ImportMeshes);
        let requests: Vec<ImportRequest> = self
            .level
            .imports
            .iter()
            .map(|def| ImportRequest::new(def.path.clone()))
            .collect();
        info!(count = requests.len(), "Issuing model imports");
        requests
    }

    /// Record that every import has reported in
    pub fn mark_imports_settled(&mut self) {
        self.cursor.mark_imports_settled();
    }

    /// Spawn imported meshes, applying the failure policy
    ///
    /// `outcomes` holds one entry per request, in request order.
    ///
    /// # Panics
    /// If the import barrier has not fired or the outcome count does not
    /// match the request count.
    pub fn materialize_imports<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
        outcomes: Vec<ImportOutcome>,
    ) -> Result<Imported, StageInitError> {
        assert!(
            self.cursor.imports_settled(),
            "imports materialized before the import barrier fired"
        );
        assert_eq!(
            outcomes.len(),
            self.level.imports.len(),
            "one outcome is required per import request"
        );

        let mut meshes = Vec::new();
        let mut failures = Vec::new();
        let mut failed = Vec::new();

        for (def, outcome) in self.level.imports.iter().zip(outcomes) {
            let preset = def.preset.resolve()?;
            let outcome = outcome.and_then(|loaded| {
                if loaded.is_empty() {
                    Err(LoadError::Empty(def.path.clone()))
                } else {
                    Ok(loaded)
                }
            });

            match outcome {
                Ok(loaded) => {
                    for mesh in loaded {
                        let entity = ctx.world.spawn((
                            EntityKind::ImportedMesh,
                            Name::new(mesh.name.clone()),
                            Transform::from_position(def.position).with_scale(def.scale),
                            Visible(true),
                        ));
                        let shape = mesh.shape().scaled(def.scale);
                        self.attach_physics(
                            ctx,
                            entity,
                            shape,
                            &preset,
                            format!("{}:{}", def.path, mesh.name),
                        )?;
                        meshes.push(entity);
                    }
                }
                Err(error) => {
                    warn!(path = %def.path, error = %error, "Model import failed");
                    failures.push(ImportFailure {
                        path: def.path.clone(),
                        error,
                    });
                    failed.push((def, preset));
                }
            }
        }

        let mut placeholders = Vec::new();
        if !failures.is_empty() {
            match self.config.failure_policy {
                LoadFailurePolicy::Abort => return Err(StageInitError::Imports(failures)),
                LoadFailurePolicy::Placeholder => {
                    for (def, preset) in failed {
                        let name = format!("placeholder:{}", def.path);
                        let entity = ctx.world.spawn((
                            EntityKind::Placeholder,
                            Name::new(name.clone()),
                            Transform::from_position(def.position).with_scale(def.scale),
                            Visible(true),
                        ));
                        let shape = ShapeKind::default().scaled(def.scale);
                        self.attach_physics(ctx, entity, shape, &preset, name)?;
                        placeholders.push(entity);
                    }
                    debug!(count = placeholders.len(), "Spawned import placeholders");
                }
            }
        }

        Ok(Imported {
            meshes,
            placeholders,
            failures,
            _sealed: (),
        })
    }

    /// Run CreateSkybox through InitComplete
    pub fn finish<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
        populated: Populated,
        imported: Imported,
    ) -> Result<Stage, StageInitError> {
        self.cursor.enter(StagePhase::CreateSkybox);
        let skybox = self.level.skybox.as_ref().map(|def| {
            ctx.world.spawn((
                EntityKind::Skybox,
                Name::new(def.texture.clone()),
                Transform::default().with_scale(Vec3::splat(def.size)),
            ))
        });

        self.cursor.enter(StagePhase::CreateSprites);
        let sprites = self
            .level
            .sprites
            .iter()
            .map(|def| {
                ctx.world.spawn((
                    EntityKind::Sprite,
                    Name::new(def.texture.clone()),
                    Transform::from_position(def.position).with_scale(Vec3::splat(def.size)),
                    Visible(true),
                ))
            })
            .collect();

        self.cursor.enter(StagePhase::CreateLights);
        let lights: Vec<Entity> = self
            .level
            .lights
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let position = match def.kind {
                    LightKind::Point { position } => position,
                    LightKind::Directional { .. } | LightKind::Hemispheric { .. } => Vec3::ZERO,
                };
                ctx.world.spawn((
                    EntityKind::Light,
                    Name::new(format!("light-{index}")),
                    Light {
                        kind: def.kind,
                        intensity: def.intensity,
                    },
                    Transform::from_position(position),
                ))
            })
            .collect();

        self.cursor.enter(StagePhase::CreateShadowGenerators);
        let mut shadow_generators: Vec<ShadowGenerator> = lights
            .iter()
            .zip(&self.level.lights)
            .filter(|(_, def)| def.cast_shadows)
            .map(|(light, _)| ShadowGenerator {
                light: *light,
                map_size: self.config.shadow_map_size,
                casters: Vec::new(),
            })
            .collect();

        self.cursor.enter(StagePhase::AssignShadows);
        let candidates = populated
            .player
            .iter()
            .chain(&populated.walls)
            .chain(&populated.movables)
            .chain(&populated.bots)
            .chain(&imported.meshes)
            .chain(&imported.placeholders)
            .copied();
        for entity in candidates {
            let kind = match ctx.world.get::<EntityKind>(entity) {
                Ok(kind) => *kind,
                Err(_) => continue,
            };
            if kind.casts_shadows() && !shadow_generators.is_empty() {
                for generator in &mut shadow_generators {
                    generator.casters.push(entity);
                }
                if ctx.world.insert_one(entity, ShadowCaster).is_err() {
                    warn!(entity = ?entity, "Shadow caster vanished");
                }
            }
            if kind.receives_shadows() && ctx.world.insert_one(entity, ShadowReceiver).is_err() {
                warn!(entity = ?entity, "Shadow receiver vanished");
            }
        }

        self.cursor.enter(StagePhase::CreateCameraSystem);
        let cameras = CameraMultiplexer::new(
            ctx,
            &self.config.cameras,
            self.config.default_camera,
            populated.player,
            self.config.camera_keys.clone(),
        )?;

        self.cursor.enter(StagePhase::CreateHud);
        let hud = HudModel::new(
            self.level.name.clone(),
            &ctx.world,
            &populated.items,
            &populated.bots,
            cameras.active_type(),
            imported.failures.len(),
        );

        self.cursor.enter(StagePhase::InitComplete);
        info!(
            level = %self.level.name,
            entities = ctx.world.len(),
            placeholders = imported.placeholders.len(),
            "Stage construction complete"
        );

        Ok(Stage {
            name: self.level.name.clone(),
            player: populated.player,
            walls: populated.walls,
            movables: populated.movables,
            items: populated.items,
            bots: populated.bots,
            imported: imported.meshes,
            placeholders: imported.placeholders,
            import_failures: imported.failures,
            skybox,
            sprites,
            lights,
            shadow_generators,
            cameras,
            hud,
        })
    }

    /// Build the whole stage, blocking on the imports
    ///
    /// Uses the futures fan-in in place of the barrier; the store must
    /// complete without the caller's help.
    pub fn build_blocking<H: RenderHost, S: AssetStore + ?Sized>(
        mut self,
        ctx: &mut EngineContext<H>,
        store: &mut S,
    ) -> Result<Stage, StageInitError> {
        let populated = self.populate(ctx)?;
        let requests = self.import_requests();
        let outcomes = join::import_all_blocking(store, requests, CancellationToken::new());
        self.mark_imports_settled();
        let imported = self.materialize_imports(ctx, outcomes)?;
        self.finish(ctx, populated, imported)
    }
}
