//! Integration test for the shipped arena level

use stage_engine::assets::ObjAssetStore;
use stage_engine::config::{AssetConfig, StageConfig};
use stage_engine::core::context::EngineContext;
use stage_engine::core::entity::EntityKind;
use stage_engine::graphics::HeadlessHost;
use stage_engine::io::LevelDefinition;
use stage_engine::stage::StageBuilder;
use std::path::PathBuf;

fn game_assets() -> AssetConfig {
    AssetConfig::new(
        PathBuf::from("../game/assets"),
        "models".to_string(),
        "levels".to_string(),
    )
}

#[test]
fn test_arena_level_builds() {
    let assets = game_assets();
    assets.validate().expect("game assets missing");
    let level = LevelDefinition::load_from_file(assets.level_path("arena").unwrap())
        .expect("Failed to load arena level");

    let mut ctx = EngineContext::new(HeadlessHost::new());
    let stage = StageBuilder::new(level, StageConfig::default())
        .build_blocking(&mut ctx, &mut ObjAssetStore::new(assets))
        .expect("Failed to build arena");

    assert_eq!(stage.name, "arena");
    assert_eq!(stage.walls.len(), 5);
    assert_eq!(stage.imported.len(), 2);
    assert!(stage.import_failures.is_empty());
    assert_eq!(ctx.world.count_kind(EntityKind::Item), 3);
    assert_eq!(stage.shadow_generators.len(), 1);
    assert!(stage.skybox.is_some());

    // Every body except the items got an impostor
    assert_eq!(ctx.host.impostor_count(), 1 + 5 + 2 + 1 + 2);
}
