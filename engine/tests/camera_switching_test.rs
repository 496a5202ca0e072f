//! Integration tests for camera switching on a constructed stage

use glam::Vec3;
use stage_engine::assets::MemoryAssetStore;
use stage_engine::config::StageConfig;
use stage_engine::core::camera::CameraType;
use stage_engine::core::context::EngineContext;
use stage_engine::graphics::{HeadlessHost, HostCall};
use stage_engine::io::{BodyDef, LevelDefinition, PresetSpec};
use stage_engine::physics::ShapeKind;
use stage_engine::stage::{Stage, StageBuilder};
use winit::keyboard::KeyCode;

fn build() -> (EngineContext<HeadlessHost>, Stage) {
    let mut level = LevelDefinition::new("cameras");
    level.player = Some(BodyDef::new(
        Vec3::new(0.0, 1.0, 0.0),
        ShapeKind::Sphere { radius: 0.5 },
        PresetSpec::named("player_body"),
    ));
    level.bots.push(BodyDef::new(
        Vec3::new(6.0, 1.0, 6.0),
        ShapeKind::Sphere { radius: 0.8 },
        PresetSpec::named("bot_body"),
    ));

    let mut ctx = EngineContext::new(HeadlessHost::new());
    let stage = StageBuilder::new(level, StageConfig::default())
        .build_blocking(&mut ctx, &mut MemoryAssetStore::new())
        .unwrap();
    ctx.host.take_calls();
    (ctx, stage)
}

#[test]
fn test_key_bindings_switch_cameras() {
    let (mut ctx, mut stage) = build();
    let player = stage.player.unwrap();

    ctx.input.press(KeyCode::F4);
    stage.update(&mut ctx);
    ctx.input.release(KeyCode::F4);

    assert!(stage.cameras.is_first_person_active());
    assert!(!ctx.world.is_visible(player));
    assert_eq!(stage.hud.active_camera, CameraType::FirstPerson);

    ctx.input.press(KeyCode::F1);
    stage.update(&mut ctx);

    let free = stage.cameras.camera(CameraType::FreeDebug).unwrap().id;
    assert_eq!(stage.cameras.active_type(), CameraType::FreeDebug);
    assert!(ctx.world.is_visible(player));
    assert_eq!(ctx.host.attached_cameras(), vec![free]);
}

#[test]
fn test_held_key_produces_no_duplicate_calls() {
    let (mut ctx, mut stage) = build();

    ctx.input.press(KeyCode::F1);
    stage.update(&mut ctx);
    let attaches = ctx
        .host
        .take_calls()
        .into_iter()
        .filter(|call| matches!(call, HostCall::AttachControl { .. }))
        .count();
    assert_eq!(attaches, 1);

    stage.update(&mut ctx);
    stage.update(&mut ctx);
    assert!(ctx.host.calls().is_empty());
}

#[test]
fn test_first_person_detaches_free_camera() {
    let (mut ctx, mut stage) = build();
    stage.switch_camera(&mut ctx, CameraType::FreeDebug);
    ctx.host.take_calls();

    stage.switch_camera(&mut ctx, CameraType::FirstPerson);

    let free = stage.cameras.camera(CameraType::FreeDebug).unwrap().id;
    let first_person = stage.cameras.camera(CameraType::FirstPerson).unwrap().id;
    let calls = ctx.host.calls();
    assert_eq!(
        calls[0],
        HostCall::DetachControl {
            camera: free,
            surface: ctx.surface
        }
    );
    assert_eq!(calls[1], HostCall::SetActiveCamera(first_person));
    assert_eq!(ctx.host.attached_cameras(), vec![first_person]);
}

#[test]
fn test_lock_to_bot_retargets_follow_camera() {
    let (mut ctx, mut stage) = build();
    let bot = stage.bots[0];

    stage.cameras.lock_to(bot, CameraType::Follow).unwrap();
    stage.update(&mut ctx);

    let follow = stage.cameras.camera(CameraType::Follow).unwrap();
    assert_eq!(follow.target(), Some(bot));
    assert_eq!(follow.look_at, Vec3::new(6.0, 1.0, 6.0));
}

#[test]
fn test_restricted_camera_set_falls_back() {
    let mut ctx = EngineContext::new(HeadlessHost::new());
    let config = StageConfig {
        cameras: vec![CameraType::Follow, CameraType::ArcRotate],
        ..StageConfig::default()
    };
    let mut stage = StageBuilder::new(LevelDefinition::new("small"), config)
        .build_blocking(&mut ctx, &mut MemoryAssetStore::new())
        .unwrap();
    stage.switch_camera(&mut ctx, CameraType::ArcRotate);

    ctx.input.press(KeyCode::F1);
    stage.update(&mut ctx);

    assert_eq!(stage.cameras.active_type(), CameraType::Follow);
    assert!(ctx.host.attached_cameras().is_empty());
}
