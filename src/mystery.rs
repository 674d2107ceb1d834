use serde::{Deserialize, Serialize};

use crate::bullet::Bullet;
use crate::collision::{first_hit, Destructible, Hitbox, Side};
use crate::constants::{DISPLAY_WIDTH, MYSTERY_SPEED};
use crate::entity::{Clock, Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::mask::Mask;
use crate::sprites::{self, SpriteId};

/// Direction in which a mystery ship crosses the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    LeftToRight,
    RightToLeft,
}

/// Bonus ship flying across the top of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Mystery {
    heading: Heading,
    rect: Rect,
    mask: Mask,
    x: f64,
    clock: Clock,
    alive: bool,
    dirty: bool,
}

impl Mystery {
    /// Spawn just outside the edge it enters from.
    pub fn new(heading: Heading) -> Self {
        let image = sprites::image(SpriteId::Mystery);
        let (width, height) = (image.width(), image.height());
        let x = match heading {
            Heading::LeftToRight => -width,
            Heading::RightToLeft => DISPLAY_WIDTH,
        };
        Mystery {
            heading,
            rect: Rect::new(x, height, width, height),
            mask: Mask::from_image(&image),
            x: x as f64,
            clock: Clock::default(),
            alive: true,
            dirty: true,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.dirty = true;
        was_alive
    }

    fn velocity(&self) -> f64 {
        match self.heading {
            Heading::LeftToRight => MYSTERY_SPEED,
            Heading::RightToLeft => -MYSTERY_SPEED,
        }
    }

    fn crossed(&self) -> bool {
        match self.heading {
            Heading::LeftToRight => self.rect.left() >= DISPLAY_WIDTH,
            Heading::RightToLeft => self.rect.right() <= 0,
        }
    }
}

impl Entity for Mystery {
    fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);
        if !self.alive {
            return;
        }
        self.x += self.velocity() * seconds_elapsed;
        self.rect.x = self.x.floor() as i32;
        self.dirty = true;

        if self.crossed() {
            self.kill();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Sprite for Mystery {
    fn sprite(&self) -> SpriteId {
        SpriteId::Mystery
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

impl Hitbox for Mystery {
    fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Destructible for Mystery {
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
                explosions.push(Explosion::of(
                    SpriteId::MysteryExplosion,
                    self.rect.x + 6,
                    self.rect.y,
                ));
                self.kill()
            }
            None => false,
        }
    }
}
