//! Integration tests for OBJ imports feeding a stage

use glam::Vec3;
use stage_engine::assets::{join, CancellationToken, ImportRequest, LoadError, ObjAssetStore};
use stage_engine::config::{AssetConfig, StageConfig};
use stage_engine::core::context::EngineContext;
use stage_engine::graphics::HeadlessHost;
use stage_engine::io::{ImportDef, LevelDefinition};
use stage_engine::physics::{presets, Impostor, ShapeKind};
use stage_engine::stage::{StageLifecycle, StageStatus};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

const WEDGE_OBJ: &str = "\
o wedge
v 0.0 0.0 0.0
v 2.0 0.0 0.0
v 2.0 1.0 0.0
v 0.0 0.0 4.0
f 1 2 3
f 1 3 4
";

fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("models")).unwrap();
    fs::create_dir_all(dir.path().join("levels")).unwrap();
    fs::write(dir.path().join("models/wedge.obj"), WEDGE_OBJ).unwrap();
    dir
}

fn store(root: &Path) -> ObjAssetStore {
    ObjAssetStore::new(AssetConfig::new(
        root.to_path_buf(),
        "models".to_string(),
        "levels".to_string(),
    ))
}

#[test]
fn test_join_loads_obj_bounds() {
    let dir = asset_dir();
    let mut store = store(dir.path());

    let outcomes = join::import_all_blocking(
        &mut store,
        vec![ImportRequest::new("wedge.obj"), ImportRequest::new("nope.obj")],
        CancellationToken::new(),
    );

    let meshes = outcomes[0].as_ref().unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].bounds_min, Vec3::ZERO);
    assert_eq!(meshes[0].bounds_max, Vec3::new(2.0, 1.0, 4.0));
    assert!(matches!(outcomes[1], Err(LoadError::NotFound(_))));
}

#[test]
fn test_lifecycle_with_worker_thread_completions() {
    let dir = asset_dir();
    assert!(store(dir.path()).config().validate().is_ok());

    let mut level = LevelDefinition::new("obj");
    level.imports.push(ImportDef::new("wedge.obj", Vec3::ZERO).with_preset(presets::WALL));
    level.imports.push(ImportDef::new("missing.obj", Vec3::X));

    let mut ctx = EngineContext::new(HeadlessHost::new());
    let mut lifecycle = StageLifecycle::new(level, StageConfig::default());
    let mut status = lifecycle.begin(&mut ctx, &mut store(dir.path()));

    for _ in 0..500 {
        if status != StageStatus::AwaitingImports {
            break;
        }
        thread::sleep(Duration::from_millis(10));
        status = lifecycle.pump(&mut ctx);
    }

    assert_eq!(status, StageStatus::Complete);
    let stage = lifecycle.stage().unwrap();
    assert_eq!(stage.imported.len(), 1);
    assert_eq!(stage.placeholders.len(), 1);

    let impostor = ctx.world.get::<Impostor>(stage.imported[0]).unwrap();
    assert_eq!(impostor.params.mass, 0.0);
    assert_eq!(
        impostor.shape,
        ShapeKind::Box {
            half_extents: Vec3::new(1.0, 0.5, 2.0)
        }
    );
}

#[test]
fn test_level_file_drives_the_stage() {
    let dir = asset_dir();
    let config = AssetConfig::new(
        dir.path().to_path_buf(),
        "models".to_string(),
        "levels".to_string(),
    );
    let mut level = LevelDefinition::new("from_disk");
    level.imports.push(ImportDef::new("wedge.obj", Vec3::ZERO));
    level.save_to_file(config.level_path("from_disk").unwrap()).unwrap();

    let loaded = LevelDefinition::load_from_file(config.level_path("from_disk").unwrap()).unwrap();
    let mut ctx = EngineContext::new(HeadlessHost::new());
    let stage = stage_engine::stage::StageBuilder::new(loaded, StageConfig::default())
        .build_blocking(&mut ctx, &mut ObjAssetStore::new(config))
        .unwrap();

    assert_eq!(stage.name, "from_disk");
    assert_eq!(stage.imported.len(), 1);
    // Decoration preset: no impostor
    assert!(ctx.world.get::<Impostor>(stage.imported[0]).is_err());
}
