use crate::animation::Animation;
use crate::constants::EXPLOSION_FRAME_DELAY;
use crate::cooldown::Cooldown;
use crate::entity::{Clock, Entity, Sprite};
use crate::geometry::Rect;
use crate::sprites::{self, SpriteId};

/// Short-lived animation left behind by anything that gets destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    animation: Animation,
    frame: SpriteId,
    rect: Rect,
    clock: Clock,
    frame_timer: Cooldown,
    alive: bool,
    dirty: bool,
}

impl Explosion {
    /// Start playing `animation` with its top-left corner at `(x, y)`.
    ///
    /// An animation without any frame produces an explosion that is already
    /// dead.
    pub fn new(mut animation: Animation, x: i32, y: i32) -> Self {
        let first = animation.next();
        let frame = first.unwrap_or(SpriteId::ShipExplosion);
        let (width, height) = sprites::size(frame);
        let delay = animation.delay();
        Explosion {
            animation,
            frame,
            rect: Rect::new(x, y, width, height),
            clock: Clock::default(),
            frame_timer: Cooldown::new(delay),
            alive: first.is_some(),
            dirty: true,
        }
    }

    /// Single-frame explosion using the default frame delay.
    pub fn of(frame: SpriteId, x: i32, y: i32) -> Self {
        Explosion::new(Animation::once(frame, EXPLOSION_FRAME_DELAY), x, y)
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.dirty = true;
    }
}

impl Entity for Explosion {
    fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);

        if self.alive && self.frame_timer.ready(self.clock.current_time) {
            match self.animation.next() {
                Some(frame) => {
                    self.frame = frame;
                    self.frame_timer.fire(self.clock.current_time);
                    self.dirty = true;
                }
                None => self.kill(),
            }
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Sprite for Explosion {
    fn sprite(&self) -> SpriteId {
        self.frame
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
