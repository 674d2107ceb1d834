//! Play-field dimensions and tuning values shared by every entity.
//!
//! Coordinates are pixels on a 750 × 750 field with the origin at the top
//! left; y grows downward.

// ── Play field ────────────────────────────────────────────────────────────────

pub const DISPLAY_WIDTH: i32 = 750;
pub const DISPLAY_HEIGHT: i32 = 750;

pub const DEFAULT_FPS: u32 = 120;

// ── Horde formation ──────────────────────────────────────────────────────────

/// Ship slots per layer (columns in the formation).
pub const HORDE_WIDTH: usize = 9;
/// Layers (rows) in the formation.
pub const HORDE_LAYERS: usize = 5;
/// Empty margin kept on both sides of the formation at creation.
pub const HORDE_BUFFER: i32 = 50;
/// Vertical distance between consecutive layers.
pub const LAYER_SPACING: i32 = 50;
/// Default y of the top layer.
pub const HORDE_HEIGHT: i32 = 75;

/// Horizontal pixels a layer travels per march.
pub const LAYER_STEP: i32 = 10;
/// Vertical pixels each ship drops after an edge bounce.
pub const LAYER_DROP: i32 = 20;
/// Delay between two ships of the same layer dropping.
pub const DROP_INTERVAL: f64 = 0.05;

/// Base delay between two layer marches, reduced by the speed multiplier.
pub const MARCH_INTERVAL: f64 = 0.2;
/// Speed multiplier gained per destroyed ship.
pub const SPEED_STEP: f64 = 1.0 / 250.0;
/// Speed multiplier forced once a single ship remains.
pub const LAST_SHIP_SPEED: f64 = 2.0;

/// Delay between two volleys of the horde.
pub const VOLLEY_INTERVAL: f64 = 0.5;
/// Horizontal distance within which a ship considers itself aimed at the tank.
pub const SHIP_AIM_WINDOW: i32 = 100;

/// Default bounds, in seconds, of the random delay between mystery ships.
pub const MYSTERY_MIN_INTERVAL: f64 = 10.0;
pub const MYSTERY_MAX_INTERVAL: f64 = 30.0;
pub const MYSTERY_SPEED: f64 = 250.0;

// ── Tank & bullets ───────────────────────────────────────────────────────────

pub const TANK_SPEED: f64 = 250.0;
pub const TANK_RELOAD: f64 = 0.5;
pub const TANK_BULLET_SPEED: f64 = 750.0;
pub const SHIP_BULLET_SPEED: f64 = 250.0;

// ── Shields ──────────────────────────────────────────────────────────────────

pub const NUM_SHIELDS: usize = 4;
pub const SHIELD_HEIGHT: i32 = 600;

// ── Animation ────────────────────────────────────────────────────────────────

pub const SHIP_FRAME_DELAY: f64 = 0.5;
pub const EXPLOSION_FRAME_DELAY: f64 = 0.3;
