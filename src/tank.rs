use crate::bullet::Bullet;
use crate::collision::{first_hit, Destructible, Hitbox, Side};
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, TANK_RELOAD, TANK_SPEED};
use crate::cooldown::Cooldown;
use crate::entity::{Clock, Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::mask::Mask;
use crate::sprites::{self, SpriteId};

/// The player's cannon at the bottom of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Tank {
    rect: Rect,
    mask: Mask,
    clock: Clock,
    reload: Cooldown,
    alive: bool,
    dirty: bool,
}

impl Tank {
    pub fn new(x: i32, y: i32) -> Self {
        let image = sprites::image(SpriteId::Tank);
        Tank {
            rect: Rect::new(x, y, image.width(), image.height()),
            mask: Mask::from_image(&image),
            // the clock starts one reload in, so the first shot is immediate
            clock: Clock {
                current_time: TANK_RELOAD,
                seconds_elapsed: 0.0,
            },
            reload: Cooldown::new(TANK_RELOAD),
            alive: true,
            dirty: true,
        }
    }

    /// Tank centred on the bottom edge of the field.
    pub fn spawn() -> Self {
        let (width, height) = sprites::size(SpriteId::Tank);
        Tank::new(DISPLAY_WIDTH / 2 - width / 2, DISPLAY_HEIGHT - height)
    }

    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.dirty = true;
        was_alive
    }

    /// Slide left (`direction < 0`) or right (`direction > 0`) by the
    /// distance covered during the last frame, staying on the field.
    pub fn move_by(&mut self, direction: i32) {
        let step = (self.clock.seconds_elapsed * TANK_SPEED) as i32;
        if direction < 0 && self.rect.left() > step {
            self.rect.x -= step;
            self.dirty = true;
        } else if direction > 0 && self.rect.right() < DISPLAY_WIDTH - step {
            self.rect.x += step;
            self.dirty = true;
        }
    }

    /// Fire a bullet if reloaded.
    pub fn shoot(&mut self) -> Option<Bullet> {
        if !self.alive || !self.reload.ready(self.clock.current_time) {
            return None;
        }
        self.reload.fire(self.clock.current_time);
        Some(Bullet::from_tank(self.rect))
    }
}

impl Entity for Tank {
    fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Sprite for Tank {
    fn sprite(&self) -> SpriteId {
        SpriteId::Tank
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

impl Hitbox for Tank {
    fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Destructible for Tank {
    fn hostile(&self, bullet: &Bullet) -> bool {
        bullet.side() == Side::Ship
    }

    fn take_damage(&mut self, bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) -> bool {
        if !self.alive {
            return false;
        }
        match first_hit(&*self, bullets) {
            Some(bullet) => {
                bullet.kill();
                explosions.push(Explosion::of(
                    SpriteId::TankExplosion,
                    self.rect.x - 4,
                    self.rect.y,
                ));
                self.kill()
            }
            None => false,
        }
    }
}
