use serde::{Deserialize, Serialize};

use crate::sprites::SpriteId;

/// Timed sequence of sprite frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    frames: Vec<SpriteId>,
    delay: f64,
    looping: bool,
    cursor: usize,
}

impl Animation {
    pub fn new(frames: Vec<SpriteId>, delay: f64, looping: bool) -> Self {
        Animation {
            frames,
            delay,
            looping,
            cursor: 0,
        }
    }

    /// Single-frame, non-looping animation (explosions).
    pub fn once(frame: SpriteId, delay: f64) -> Self {
        Animation::new(vec![frame], delay, false)
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Next frame, or `None` once a non-looping animation is exhausted.
    pub fn next(&mut self) -> Option<SpriteId> {
        if self.cursor >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return None;
            }
            self.cursor = 0;
        }
        let frame = self.frames[self.cursor];
        self.cursor += 1;
        Some(frame)
    }
}
