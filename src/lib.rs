//! Space Invaders game core.
//!
//! The library holds the whole simulation: the alien horde and its layers,
//! the tank, shields, bullets, the mystery ship and the pixel-precise damage
//! protocol they share. `World` drives one frame at a time; the binary only
//! turns key presses into `Intent`s and draws the result.

pub mod animation;
pub mod bullet;
pub mod collision;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod entity;
pub mod error;
pub mod explosion;
pub mod geometry;
pub mod horde;
pub mod layer;
pub mod mask;
pub mod mystery;
pub mod shield;
pub mod ship;
pub mod sprites;
pub mod tank;
pub mod world;

pub use error::{GameError, Result};
pub use world::{GameStatus, Intent, World};
