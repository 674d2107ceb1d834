use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::bullet::Bullet;
use crate::collision::{first_hit, Destructible, Hitbox, Side};
use crate::constants::{SHIP_AIM_WINDOW, SHIP_FRAME_DELAY};
use crate::cooldown::Cooldown;
use crate::entity::{Clock, Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::mask::Mask;
use crate::sprites::{self, SpriteId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    One,
    Two,
    Three,
}

/// Per-kind constants, looked up once instead of branching on the kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipProfile {
    pub width: i32,
    pub height: i32,
    /// Distance from the field edge at which a layer of this kind bounces.
    pub edge_buffer: f64,
    /// Seconds between two shots of the same ship.
    pub reload: f64,
    /// Horizontal shift centring the explosion on the ship.
    pub explosion_offset: i32,
}

const PROFILES: [ShipProfile; 3] = [
    ShipProfile {
        width: 32,
        height: 32,
        edge_buffer: 32.0,
        reload: 3.0,
        explosion_offset: -10,
    },
    ShipProfile {
        width: 44,
        height: 32,
        edge_buffer: 27.5,
        reload: 4.0,
        explosion_offset: -4,
    },
    ShipProfile {
        width: 48,
        height: 32,
        edge_buffer: 24.0,
        reload: 5.0,
        explosion_offset: -2,
    },
];

impl ShipKind {
    pub const ALL: [ShipKind; 3] = [ShipKind::One, ShipKind::Two, ShipKind::Three];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn profile(self) -> &'static ShipProfile {
        &PROFILES[self as usize]
    }
}

/// One alien of the horde.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    kind: ShipKind,
    rect: Rect,
    mask: Mask,
    clock: Clock,
    reload: Cooldown,
    animation: Animation,
    frame: SpriteId,
    frame_timer: Cooldown,
    alive: bool,
    dirty: bool,
}

impl Ship {
    pub fn new(kind: ShipKind, x: i32, y: i32) -> Self {
        let profile = kind.profile();
        let first = SpriteId::Ship { kind, frame: 0 };
        let mut animation = Animation::new(
            vec![first, SpriteId::Ship { kind, frame: 1 }],
            SHIP_FRAME_DELAY,
            true,
        );
        let frame = animation.next().unwrap_or(first);
        Ship {
            kind,
            rect: Rect::new(x, y, profile.width, profile.height),
            mask: Mask::from_image(&sprites::image(first)),
            clock: Clock::default(),
            reload: Cooldown::new(profile.reload),
            animation,
            frame,
            frame_timer: Cooldown::new(SHIP_FRAME_DELAY),
            alive: true,
            dirty: true,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Mark the ship dead. Returns `true` only for the call that actually
    /// killed it, so a death is reported once.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.dirty = true;
        was_alive
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect.x += dx;
        self.rect.y += dy;
        self.dirty = true;
    }

    /// Whether the ship is lined up with a target horizontally.
    pub fn aimed_at(&self, target: Rect) -> bool {
        (self.rect.x - target.x).abs() <= SHIP_AIM_WINDOW
    }

    /// Fire at `target` if aligned with it and reloaded.
    pub fn shoot(&mut self, target: Rect) -> Option<Bullet> {
        if !self.alive || !self.aimed_at(target) || !self.reload.ready(self.clock.current_time) {
            return None;
        }
        self.reload.fire(self.clock.current_time);
        Some(Bullet::from_ship(self.kind, self.rect))
    }

    fn explosion(&self) -> Explosion {
        Explosion::of(
            SpriteId::ShipExplosion,
            self.rect.x + self.kind.profile().explosion_offset,
            self.rect.y,
        )
    }
}

impl Entity for Ship {
    fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);

        if self.alive && self.frame_timer.ready(self.clock.current_time) {
            if let Some(frame) = self.animation.next() {
                self.frame = frame;
                self.dirty = true;
            }
            self.frame_timer.fire(self.clock.current_time);
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Sprite for Ship {
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

impl Hitbox for Ship {
    fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Destructible for Ship {
    fn hostile(&self, bullet: &Bullet) -> bool {
        bullet.side() == Side::Tank
    }

    fn take_damage(&mut self, bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) -> bool {
        if !self.alive {
            return false;
        }
        match first_hit(&*self, bullets) {
            Some(bullet) => {
                bullet.kill();
                explosions.push(self.explosion());
                self.kill()
            }
            None => false,
        }
    }
}
