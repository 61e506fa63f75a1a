pub mod assets;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod star;
pub mod wave;
