pub mod bounds;
pub mod camera;
pub mod config;
pub mod geo;
pub mod limits;
pub mod map;
