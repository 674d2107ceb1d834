use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::sprites::SpriteId;

/// Time accumulated by an entity since it was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    pub current_time: f64,
    pub seconds_elapsed: f64,
}

impl Clock {
    pub fn tick(&mut self, seconds_elapsed: f64) {
        self.current_time += seconds_elapsed;
        self.seconds_elapsed = seconds_elapsed;
    }
}

/// Per-frame hook implemented by every game object.
pub trait Entity {
    fn update(&mut self, seconds_elapsed: f64);

    fn is_alive(&self) -> bool;
}

/// What a renderer needs: image handle, placement and whether it changed.
pub trait Sprite {
    fn sprite(&self) -> SpriteId;

    fn rect(&self) -> Rect;

    fn dirty(&self) -> bool;

    fn mark_clean(&mut self);
}
