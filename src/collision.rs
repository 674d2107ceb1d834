//! Damage protocol shared by ships, the tank, the mystery ship, shields and
//! bullets.
//!
//! Hits are pixel-precise: two sprites collide only when an opaque pixel of
//! one mask lies on an opaque pixel of the other.

use serde::{Deserialize, Serialize};

use crate::bullet::Bullet;
use crate::entity::{Entity, Sprite};
use crate::explosion::Explosion;
use crate::mask::Mask;

/// Which side fired a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Ship,
    Tank,
}

pub trait Hitbox: Sprite {
    fn mask(&self) -> &Mask;
}

/// First overlapping pixel of `a` and `b`, in `a`'s local coordinates.
pub fn collide_mask<A, B>(a: &A, b: &B) -> Option<(i32, i32)>
where
    A: Hitbox + ?Sized,
    B: Hitbox + ?Sized,
{
    let ra = a.rect();
    let rb = b.rect();
    if !ra.intersects(&rb) {
        return None;
    }
    a.mask().overlap(b.mask(), (rb.x - ra.x, rb.y - ra.y))
}

pub trait Destructible: Hitbox {
    /// Whether `bullet` can damage this entity.
    fn hostile(&self, bullet: &Bullet) -> bool;

    /// Test every live hostile bullet against this entity, destroying the
    /// bullet (and usually the entity) on contact and spawning explosions.
    ///
    /// Returns `true` when this call destroyed the entity.
    fn take_damage(&mut self, bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) -> bool;
}

/// The first live hostile bullet touching `target`, if any.
pub fn first_hit<'b, T>(target: &T, bullets: &'b mut [Bullet]) -> Option<&'b mut Bullet>
where
    T: Destructible + ?Sized,
{
    bullets
        .iter_mut()
        .find(|b| b.is_alive() && target.hostile(&**b) && collide_mask(target, &**b).is_some())
}
