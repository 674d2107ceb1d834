use rand::rngs::StdRng;
use rand::Rng;

use crate::bullet::Bullet;
use crate::collision::{collide_mask, Destructible, Hitbox};
use crate::constants::{DISPLAY_WIDTH, NUM_SHIELDS, SHIELD_HEIGHT};
use crate::entity::{Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::mask::{Mask, PixelImage};
use crate::sprites::{self, SpriteId};

/// Erosion passes applied around an impact: (patches, reach, patch size).
const EROSION: [(usize, i32, i32); 3] = [(10, 4, 4), (20, 8, 2), (30, 12, 1)];

/// Bunker between the tank and the horde. Every bullet that touches it is
/// absorbed and bites a ragged hole out of it; holes never close.
#[derive(Clone, Debug)]
pub struct Shield {
    rect: Rect,
    image: PixelImage,
    mask: Mask,
    rng: StdRng,
    impacts: usize,
    dirty: bool,
}

impl Shield {
    /// `rng` drives the shape of the holes.
    pub fn new(x: i32, y: i32, rng: StdRng) -> Self {
        let image = sprites::image(SpriteId::Shield);
        Shield {
            rect: Rect::new(x, y, image.width(), image.height()),
            mask: Mask::from_image(&image),
            image,
            rng,
            impacts: 0,
            dirty: true,
        }
    }

    pub fn image(&self) -> &PixelImage {
        &self.image
    }

    pub fn impacts(&self) -> usize {
        self.impacts
    }

    /// Clear pixels around `(x, y)` (shield coordinates): a solid square at
    /// the contact point, then smaller patches scattered further out.
    pub fn erode(&mut self, x: i32, y: i32) {
        self.image.clear_rect(x - 4, y, 8, 8);

        for (patches, reach, size) in EROSION {
            for _ in 0..patches {
                let px = self.rng.gen_range(x - reach..=x + reach);
                let py = self.rng.gen_range(y - reach..=y + reach);
                self.image.clear_rect(px - size / 2, py, size, size);
            }
        }

        self.mask = Mask::from_image(&self.image);
        self.impacts += 1;
        self.dirty = true;
    }
}

impl Entity for Shield {
    fn update(&mut self, _seconds_elapsed: f64) {}

    fn is_alive(&self) -> bool {
        true
    }
}

impl Sprite for Shield {
    fn sprite(&self) -> SpriteId {
        SpriteId::Shield
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

impl Hitbox for Shield {
    fn mask(&self) -> &Mask {
        &self.mask
    }
}

impl Destructible for Shield {
    fn hostile(&self, _bullet: &Bullet) -> bool {
        true
    }

    /// Shields are never destroyed; this always returns `false`.
    fn take_damage(&mut self, bullets: &mut [Bullet], _explosions: &mut Vec<Explosion>) -> bool {
        for bullet in bullets.iter_mut() {
            if !bullet.is_alive() || !self.hostile(bullet) {
                continue;
            }
            if let Some((x, y)) = collide_mask(&*self, &*bullet) {
                bullet.kill();
                self.erode(x, y);
            }
        }
        false
    }
}

/// Evenly spaced row of shields, each eroding with its own seed.
pub fn create_shields(rng: &mut impl Rng) -> Vec<Shield> {
    use rand::SeedableRng;

    let (width, _) = sprites::size(SpriteId::Shield);
    let gap = (DISPLAY_WIDTH - NUM_SHIELDS as i32 * width) / (NUM_SHIELDS as i32 + 1);

    (0..NUM_SHIELDS)
        .map(|i| {
            let x = gap + i as i32 * (width + gap);
            Shield::new(x, SHIELD_HEIGHT, StdRng::seed_from_u64(rng.gen()))
        })
        .collect()
}
