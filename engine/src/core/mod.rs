//! Core engine state: entities, cameras and the engine context

pub mod camera;
pub mod context;
pub mod entity;
