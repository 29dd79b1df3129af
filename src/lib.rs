pub mod animation;
pub mod ar;
pub mod backend;
pub mod camera;
pub mod config;
pub mod host;
pub mod interaction;
pub mod math;
pub mod scene_graph;
pub mod ui;
