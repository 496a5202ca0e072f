//! Data shown by the external HUD

use crate::core::camera::CameraType;
use crate::core::entity::{Entity, World};

/// Summary the GUI renders; rebuilt from the world each update
///
/// Only the stage's own items and bots are counted, so stages sharing a
/// world do not see each other's pickups.
#[derive(Debug, Clone, PartialEq)]
pub struct HudModel {
    pub level_name: String,
    pub items_remaining: usize,
    pub bots_remaining: usize,
    pub active_camera: CameraType,
    /// Imports replaced by placeholders
    pub failed_imports: usize,
    items: Vec<Entity>,
    bots: Vec<Entity>,
}

impl HudModel {
    pub fn new(
        level_name: impl Into<String>,
        world: &World,
        items: &[Entity],
        bots: &[Entity],
        active_camera: CameraType,
        failed_imports: usize,
    ) -> Self {
        let mut hud = Self {
            level_name: level_name.into(),
            items_remaining: 0,
            bots_remaining: 0,
            active_camera,
            failed_imports,
            items: items.to_vec(),
            bots: bots.to_vec(),
        };
        hud.refresh(world, active_camera);
        hud
    }

    /// Recount live items and bots and record the active camera
    pub fn refresh(&mut self, world: &World, active_camera: CameraType) {
        self.items_remaining = count_live(world, &self.items);
        self.bots_remaining = count_live(world, &self.bots);
        self.active_camera = active_camera;
    }

    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} | items {} | bots {} | camera: {}",
            self.level_name,
            self.items_remaining,
            self.bots_remaining,
            self.active_camera.label()
        );
        if self.failed_imports > 0 {
            line.push_str(&format!(" | {} missing models", self.failed_imports));
        }
        line
    }
}

fn count_live(world: &World, entities: &[Entity]) -> usize {
    entities.iter().filter(|entity| world.contains(**entity)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityKind;

    #[test]
    fn test_counts_follow_world() {
        let mut world = World::new();
        let coin = world.spawn((EntityKind::Item,));
        let gem = world.spawn((EntityKind::Item,));
        let bot = world.spawn((EntityKind::Bot,));

        let mut hud = HudModel::new(
            "arena",
            &world,
            &[coin, gem],
            &[bot],
            CameraType::Follow,
            0,
        );
        assert_eq!(hud.items_remaining, 2);
        assert_eq!(hud.bots_remaining, 1);
        assert_eq!(hud.status_line(), "arena | items 2 | bots 1 | camera: follow");

        world.despawn(coin).unwrap();
        hud.refresh(&world, CameraType::FirstPerson);
        assert_eq!(hud.items_remaining, 1);
        assert_eq!(hud.active_camera, CameraType::FirstPerson);
    }

    #[test]
    fn test_status_line_mentions_missing_models() {
        let world = World::new();
        let hud = HudModel::new("arena", &world, &[], &[], CameraType::Follow, 2);
        assert!(hud.status_line().ends_with("2 missing models"));
    }

    #[test]
    fn test_ignores_entities_of_other_stages() {
        let mut world = World::new();
        world.spawn((EntityKind::Item,));
        world.spawn((EntityKind::Bot,));
        let own = world.spawn((EntityKind::Item,));

        let hud = HudModel::new("second", &world, &[own], &[], CameraType::Follow, 0);
        assert_eq!(hud.items_remaining, 1);
        assert_eq!(hud.bots_remaining, 0);
    }
}
