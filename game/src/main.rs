//! Headless demo: builds the arena stage and cycles through its cameras

use stage_engine::prelude::*;
use std::path::Path;
use std::process;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "game/config.json";
const FRAME: Duration = Duration::from_millis(16);

fn main() {
    let config = load_config();
    stage_engine::init_logging_with_filter(config.log_filter.as_deref());
    info!("Starting stage demo");

    let level = load_level(&config.assets);
    let mut store = ObjAssetStore::new(config.assets.clone());
    let mut ctx = EngineContext::new(HeadlessHost::new());

    let mut lifecycle = StageLifecycle::new(level, config.stage.clone());
    lifecycle.on_init_complete(|stage| {
        info!(hud = %stage.hud.status_line(), "Stage ready, building HUD");
    });

    let mut status = lifecycle.begin(&mut ctx, &mut store);
    while status == StageStatus::AwaitingImports {
        thread::sleep(FRAME);
        status = lifecycle.pump(&mut ctx);
    }

    let mut stage = match lifecycle.into_result() {
        Ok(stage) => stage,
        Err(e) => {
            error!(error = %e, "Failed to build stage");
            process::exit(1);
        }
    };

    run_camera_script(&mut ctx, &mut stage, &config.stage);
    info!(host_calls = ctx.host.calls().len(), "Demo finished");
}

fn load_config() -> EngineConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return EngineConfig {
            assets: AssetConfig::new("game/assets".into(), "models".into(), "levels".into()),
            ..EngineConfig::default()
        };
    }
    match EngineConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid {CONFIG_PATH}: {e}");
            process::exit(1);
        }
    }
}

fn load_level(assets: &AssetConfig) -> LevelDefinition {
    let loaded = assets
        .level_path("arena")
        .map_err(|e| e.to_string())
        .and_then(|path| LevelDefinition::load_from_file(path).map_err(|e| e.to_string()));
    match loaded {
        Ok(level) => level,
        Err(e) => {
            warn!(error = %e, "Arena level unavailable, using built-in layout");
            builtin_arena()
        }
    }
}

/// Small fallback arena without model imports
fn builtin_arena() -> LevelDefinition {
    use stage_engine::io::{BodyDef, ItemDef, LightDef, LightKind, PresetSpec};

    let mut level = LevelDefinition::new("builtin-arena");
    level.player = Some(BodyDef::new(
        Vec3::new(0.0, 1.0, 0.0),
        ShapeKind::Capsule {
            radius: 0.5,
            half_height: 0.5,
        },
        PresetSpec::named("player_body"),
    ));
    level.walls.push(
        BodyDef::new(
            Vec3::new(0.0, -0.5, 0.0),
            ShapeKind::cuboid(Vec3::new(30.0, 1.0, 30.0)),
            PresetSpec::named("ground"),
        )
        .named("ground"),
    );
    level.movables.push(BodyDef::new(
        Vec3::new(3.0, 0.5, 3.0),
        ShapeKind::cuboid(Vec3::ONE),
        presets::WOODEN_CRATE,
    ));
    level.items.push(ItemDef {
        name: "coin".to_string(),
        position: Vec3::new(5.0, 0.5, -5.0),
    });
    level.lights.push(LightDef {
        kind: LightKind::Directional {
            direction: Vec3::new(-0.5, -1.0, 0.3),
        },
        intensity: 0.9,
        cast_shadows: true,
    });
    level
}

/// Press each bound camera key for one frame, then return to the default
fn run_camera_script(
    ctx: &mut EngineContext<HeadlessHost>,
    stage: &mut Stage,
    config: &StageConfig,
) {
    for binding in &config.camera_keys {
        ctx.input.press(binding.key);
        stage.update(ctx);
        ctx.input.release(binding.key);

        info!(
            key = ?binding.key,
            camera = ?stage.cameras.active_type(),
            first_person = stage.cameras.is_first_person_active(),
            hud = %stage.hud.status_line(),
            "Camera switched"
        );
        stage.update(ctx);
        thread::sleep(FRAME);
    }

    stage.switch_camera(ctx, config.default_camera);
    if let Some(camera) = stage.cameras.active_camera() {
        info!(eye = ?camera.eye, look_at = ?camera.look_at, "Back on default camera");
    }
}
