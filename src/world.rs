//! Frame driver: owns every entity group and runs one frame of the game in
//! a fixed order.
//!
//! 1. advance every entity's clock (bullets and the mystery ship travel);
//! 2. horde animation, speed and mystery spawn;
//! 3. damage passes: tank, ships, mystery, shields, bullet against bullet;
//! 4. one layer marches;
//! 5. the horde fires;
//! 6. player intents;
//! 7. dead entities are dropped from their groups.
//!
//! A ship destroyed in step 3 is therefore never able to fire in step 5 of
//! the same frame.

use rand::Rng;
use tracing::info;

use crate::bullet::{resolve_bullets, Bullet};
use crate::collision::Destructible;
use crate::entity::{Entity, Sprite};
use crate::explosion::Explosion;
use crate::geometry::Rect;
use crate::horde::{AlienHorde, HordeConfig};
use crate::mystery::Mystery;
use crate::shield::{create_shields, Shield};
use crate::sprites::SpriteId;
use crate::tank::Tank;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The tank was destroyed or the horde reached it.
    Lost,
    /// Every ship was destroyed.
    Cleared,
}

/// Player input for one frame, already reduced from raw key state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    /// Negative moves the tank left, positive right.
    pub direction: i32,
    pub fire: bool,
    pub restart: bool,
}

pub struct World {
    pub tank: Tank,
    pub shields: Vec<Shield>,
    pub horde: AlienHorde,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub mysteries: Vec<Mystery>,
    config: HordeConfig,
    status: GameStatus,
    frame: u64,
}

impl World {
    pub fn new(config: &HordeConfig, rng: &mut impl Rng) -> Self {
        World {
            tank: Tank::spawn(),
            shields: create_shields(rng),
            horde: AlienHorde::new(config, rng),
            bullets: Vec::new(),
            explosions: Vec::new(),
            mysteries: Vec::new(),
            config: config.clone(),
            status: GameStatus::Playing,
            frame: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Throw everything away and form a fresh game.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        info!(frame = self.frame, "restarting");
        let config = self.config.clone();
        *self = World::new(&config, rng);
    }

    /// Run one frame lasting `seconds_elapsed`.
    pub fn advance(&mut self, seconds_elapsed: f64, intent: &Intent, rng: &mut impl Rng) -> GameStatus {
        if intent.restart {
            self.restart(rng);
            return self.status;
        }
        if self.status != GameStatus::Playing {
            return self.status;
        }
        self.frame += 1;

        self.tank.update(seconds_elapsed);
        for shield in &mut self.shields {
            shield.update(seconds_elapsed);
        }
        for bullet in &mut self.bullets {
            bullet.update(seconds_elapsed);
        }
        for explosion in &mut self.explosions {
            explosion.update(seconds_elapsed);
        }
        for mystery in &mut self.mysteries {
            mystery.update(seconds_elapsed);
        }

        self.horde.update(seconds_elapsed, rng, &mut self.mysteries);

        self.tank.take_damage(&mut self.bullets, &mut self.explosions);
        self.horde.take_damage(&mut self.bullets, &mut self.explosions);
        for mystery in &mut self.mysteries {
            mystery.take_damage(&mut self.bullets, &mut self.explosions);
        }
        for shield in &mut self.shields {
            shield.take_damage(&mut self.bullets, &mut self.explosions);
        }
        resolve_bullets(&mut self.bullets, &mut self.explosions);

        self.horde.march();

        if self.tank.is_alive() {
            self.horde.shoot(&self.tank, rng, &mut self.bullets);

            self.tank.move_by(intent.direction);
            if intent.fire {
                if let Some(bullet) = self.tank.shoot() {
                    self.bullets.push(bullet);
                }
            }
        }

        self.bullets.retain(|b| b.is_alive());
        self.explosions.retain(|e| e.is_alive());
        self.mysteries.retain(|m| m.is_alive());

        self.status = self.evaluate();
        if self.status != GameStatus::Playing {
            info!(status = ?self.status, frame = self.frame, ships = self.horde.alive_ships(), "game over");
        }
        self.status
    }

    fn evaluate(&self) -> GameStatus {
        if !self.tank.is_alive() {
            return GameStatus::Lost;
        }
        if self.horde.alive_ships() == 0 {
            return GameStatus::Cleared;
        }
        match self.horde.lowest_edge() {
            Some(bottom) if bottom >= self.tank.rect().top() => GameStatus::Lost,
            _ => GameStatus::Playing,
        }
    }

    /// Everything a renderer should draw this frame, back to front.
    pub fn sprites(&self) -> Vec<(SpriteId, Rect)> {
        let mut out: Vec<(SpriteId, Rect)> = Vec::new();
        out.extend(self.shields.iter().map(|s| (s.sprite(), s.rect())));
        out.extend(self.horde.ships().map(|s| (s.sprite(), s.rect())));
        out.extend(self.mysteries.iter().map(|m| (m.sprite(), m.rect())));
        if self.tank.is_alive() {
            out.push((self.tank.sprite(), self.tank.rect()));
        }
        out.extend(self.bullets.iter().map(|b| (b.sprite(), b.rect())));
        out.extend(self.explosions.iter().map(|e| (e.sprite(), e.rect())));
        out
    }

    /// Whether anything changed since the last `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.tank.dirty()
            || self.horde.is_dirty()
            || self.shields.iter().any(|s| s.dirty())
            || self.bullets.iter().any(|b| b.dirty())
            || self.explosions.iter().any(|e| e.dirty())
            || self.mysteries.iter().any(|m| m.dirty())
    }

    pub fn mark_clean(&mut self) {
        self.tank.mark_clean();
        self.horde.mark_clean();
        for shield in &mut self.shields {
            shield.mark_clean();
        }
        for bullet in &mut self.bullets {
            bullet.mark_clean();
        }
        for explosion in &mut self.explosions {
            explosion.mark_clean();
        }
        for mystery in &mut self.mysteries {
            mystery.mark_clean();
        }
    }
}
