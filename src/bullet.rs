use crate::collision::{first_hit, Destructible, Hitbox, Side};
use crate::constants::{DISPLAY_HEIGHT, SHIP_BULLET_SPEED, TANK_BULLET_SPEED};
use crate::entity::{Clock, Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::mask::Mask;
use crate::ship::ShipKind;
use crate::sprites::{self, SpriteId};

/// Projectile travelling straight up (tank) or down (ships).
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    side: Side,
    sprite: SpriteId,
    explosion: SpriteId,
    rect: Rect,
    mask: Mask,
    /// Sub-pixel vertical position; `rect.y` is its floor.
    y: f64,
    /// Pixels per second, positive downward.
    speed: f64,
    clock: Clock,
    alive: bool,
    dirty: bool,
}

impl Bullet {
    pub fn new(side: Side, sprite: SpriteId, explosion: SpriteId, x: i32, y: i32, speed: f64) -> Self {
        let image = sprites::image(sprite);
        Bullet {
            side,
            sprite,
            explosion,
            rect: Rect::new(x, y, image.width(), image.height()),
            mask: Mask::from_image(&image),
            y: y as f64,
            speed,
            clock: Clock::default(),
            alive: true,
            dirty: true,
        }
    }

    /// Bullet leaving the top centre of the tank.
    pub fn from_tank(tank: Rect) -> Self {
        let (width, height) = sprites::size(SpriteId::TankBullet);
        Bullet::new(
            Side::Tank,
            SpriteId::TankBullet,
            SpriteId::TankBulletExplosion,
            tank.x + tank.width / 2 - width / 2,
            tank.y - height,
            -TANK_BULLET_SPEED,
        )
    }

    /// Bullet leaving the bottom centre of a ship of the given kind.
    pub fn from_ship(kind: ShipKind, ship: Rect) -> Self {
        let sprite = SpriteId::ShipBullet(kind);
        let (width, _) = sprites::size(sprite);
        Bullet::new(
            Side::Ship,
            sprite,
            SpriteId::ShipBulletExplosion,
            ship.x + ship.width / 2 - width / 2,
            ship.bottom(),
            SHIP_BULLET_SPEED,
        )
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns `true` if the bullet was still alive.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.dirty = true;
        was_alive
    }

    fn explode_at(&self, x: i32, y: i32) -> Explosion {
        Explosion::of(self.explosion, x, y)
    }

    fn off_field(&self) -> bool {
        match self.side {
            Side::Ship => self.rect.y >= DISPLAY_HEIGHT,
            Side::Tank => self.rect.y <= 0,
        }
    }
}

impl Entity for Bullet {
    fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);
        if !self.alive {
            return;
        }
        self.y += self.speed * seconds_elapsed;
        self.rect.y = self.y.floor() as i32;
        self.dirty = true;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Sprite for Bullet {
    fn sprite(&self) -> SpriteId {
        self.sprite
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

impl Hitbox for Bullet {
    fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Destructible for Bullet {
    fn hostile(&self, bullet: &Bullet) -> bool {
        bullet.side != self.side
    }

    /// Bullets cancel out bullets of the other side and burst when they
    /// leave the field.
    fn take_damage(&mut self, bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) -> bool {
        if !self.alive {
            return false;
        }

        if let Some(other) = first_hit(&*self, bullets) {
            other.kill();
            self.kill();
            let (width, _) = sprites::size(self.explosion);
            explosions.push(self.explode_at(self.rect.center_x() - width / 2, self.rect.y));
            return true;
        }

        if self.off_field() {
            self.kill();
            let (width, height) = sprites::size(self.explosion);
            let y = match self.side {
                Side::Ship => DISPLAY_HEIGHT - height,
                Side::Tank => 0,
            };
            explosions.push(self.explode_at(self.rect.x - width / 2, y));
            return true;
        }

        false
    }
}

/// Run the bullet-versus-bullet pass over a whole bullet group.
pub fn resolve_bullets(bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) {
    for i in 0..bullets.len() {
        let (before, rest) = bullets.split_at_mut(i);
        if let Some((current, after)) = rest.split_first_mut() {
            if !current.take_damage(before, explosions) {
                current.take_damage(after, explosions);
            }
        }
    }
}
