use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::bullet::Bullet;
use crate::collision::Destructible;
use crate::constants::{
    DISPLAY_WIDTH, HORDE_BUFFER, HORDE_HEIGHT, HORDE_LAYERS, HORDE_WIDTH, LAST_SHIP_SPEED,
    LAYER_SPACING, MARCH_INTERVAL, MYSTERY_MAX_INTERVAL, MYSTERY_MIN_INTERVAL, SPEED_STEP,
    VOLLEY_INTERVAL,
};
use crate::cooldown::Cooldown;
use crate::entity::{Clock, Entity, Sprite};
use crate::explosion::Explosion;
use crate::layer::HordeLayer;
use crate::mystery::{Heading, Mystery};
use crate::ship::{Ship, ShipKind};
use crate::tank::Tank;

/// Ship kind of every layer, top row first.
const LAYER_KINDS: [ShipKind; HORDE_LAYERS] = [
    ShipKind::One,
    ShipKind::Two,
    ShipKind::Two,
    ShipKind::Three,
    ShipKind::Three,
];

/// Tunables of the horde that can come from the config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HordeConfig {
    /// y of the top layer.
    pub height: i32,
    /// Bounds of the random delay between two mystery ships, in seconds.
    pub mystery_min: f64,
    pub mystery_max: f64,
}

impl Default for HordeConfig {
    fn default() -> Self {
        HordeConfig {
            height: HORDE_HEIGHT,
            mystery_min: MYSTERY_MIN_INTERVAL,
            mystery_max: MYSTERY_MAX_INTERVAL,
        }
    }
}

/// The whole enemy formation: five layers plus the timers that coordinate
/// them.
///
/// * one layer marches per satisfied interval, cycling from the bottom row
///   up (4, 3, 2, 1, 0, 4, …);
/// * the interval shrinks as ships die (`speed_multiplier`);
/// * a volley fires from a random half of the columns, always from the
///   living ship closest to the tank;
/// * mystery ships are launched on an independent random timer.
///
/// The horde owns the count of living ships; every death goes through
/// [`AlienHorde::destroy`] or [`AlienHorde::take_damage`] and is counted
/// once.
#[derive(Clone, Debug)]
pub struct AlienHorde {
    layers: Vec<HordeLayer>,
    cursor: usize,
    clock: Clock,
    speed_multiplier: f64,
    march_timer: Cooldown,
    volley_timer: Cooldown,
    mystery_timer: Cooldown,
    mystery_range: (f64, f64),
    alive_ships: usize,
    observed_ships: usize,
}

impl AlienHorde {
    pub fn new(config: &HordeConfig, rng: &mut impl Rng) -> Self {
        let mut layers: Vec<HordeLayer> = (0..HORDE_LAYERS).map(|_| HordeLayer::new()).collect();

        let widest = ShipKind::Three.profile().width;
        let gap = ((DISPLAY_WIDTH - HORDE_BUFFER * 2) - HORDE_WIDTH as i32 * widest)
            / (HORDE_WIDTH as i32 + 1);
        let step = widest + gap;

        for column in 0..HORDE_WIDTH {
            let x = gap + HORDE_BUFFER + column as i32 * step;
            for (row, layer) in layers.iter_mut().enumerate() {
                let kind = LAYER_KINDS[row];
                // narrower kinds are centred on the widest ship's column
                let centred = x + (widest - kind.profile().width) / 2;
                let y = config.height + row as i32 * LAYER_SPACING;
                layer.append(Ship::new(kind, centred, y));
            }
        }

        let alive_ships = layers.iter().map(|l| l.len()).sum();
        let mystery_range = (config.mystery_min, config.mystery_max);
        let mystery_timer = Cooldown::new(roll_interval(mystery_range, rng));

        debug!(
            ships = alive_ships,
            mystery_in = mystery_timer.interval(),
            "horde formed"
        );

        AlienHorde {
            cursor: layers.len() - 1,
            layers,
            clock: Clock::default(),
            speed_multiplier: 0.0,
            march_timer: Cooldown::new(MARCH_INTERVAL),
            volley_timer: Cooldown::new(VOLLEY_INTERVAL),
            mystery_timer,
            mystery_range,
            alive_ships,
            observed_ships: alive_ships,
        }
    }

    pub fn layers(&self) -> &[HordeLayer] {
        &self.layers
    }

    pub fn alive_ships(&self) -> usize {
        self.alive_ships
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Layer that marches on the next satisfied interval.
    pub fn layer_cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds until the next mystery ship, measured from the last one.
    pub fn mystery_interval(&self) -> f64 {
        self.mystery_timer.interval()
    }

    /// Advance time, animate the layers, recompute the speed multiplier and
    /// launch a mystery ship when its timer runs out.
    pub fn update(&mut self, seconds_elapsed: f64, rng: &mut impl Rng, mysteries: &mut Vec<Mystery>) {
        self.clock.tick(seconds_elapsed);
        let now = self.clock.current_time;

        for layer in &mut self.layers {
            layer.update(seconds_elapsed);
        }

        if self.alive_ships == 1 {
            if self.observed_ships != 1 {
                info!("one ship left, horde at full speed");
            }
            self.speed_multiplier = self.speed_multiplier.max(LAST_SHIP_SPEED);
        } else if self.alive_ships < self.observed_ships {
            let lost = self.observed_ships - self.alive_ships;
            self.speed_multiplier += lost as f64 * SPEED_STEP;
        }
        self.observed_ships = self.alive_ships;

        if self.mystery_timer.ready(now) {
            let heading = if rng.gen_bool(0.5) {
                Heading::LeftToRight
            } else {
                Heading::RightToLeft
            };
            mysteries.push(Mystery::new(heading));
            self.mystery_timer.fire(now);
            self.mystery_timer
                .set_interval(roll_interval(self.mystery_range, rng));
            debug!(?heading, next_in = self.mystery_timer.interval(), "mystery ship launched");
        }
    }

    /// March the layer under the cursor if the move interval has elapsed.
    ///
    /// Returns the index of the layer that moved. While that layer is still
    /// dropping the whole horde waits for it.
    pub fn march(&mut self) -> Option<usize> {
        let now = self.clock.current_time;
        self.march_timer
            .set_interval((MARCH_INTERVAL - self.speed_multiplier).max(0.0));
        if !self.march_timer.ready(now) {
            return None;
        }

        let index = self.cursor;
        let last_survivor = self.alive_ships == 1;
        let layer = &mut self.layers[index];
        if layer.is_dropping() {
            return None;
        }
        layer.march(last_survivor);

        self.cursor = index.checked_sub(1).unwrap_or(self.layers.len() - 1);
        self.march_timer.fire(now);
        Some(index)
    }

    /// Fire a volley at the tank from a random half of the columns.
    ///
    /// Returns the number of bullets fired.
    pub fn shoot(&mut self, tank: &Tank, rng: &mut impl Rng, bullets: &mut Vec<Bullet>) -> usize {
        let now = self.clock.current_time;
        if !self.volley_timer.ready(now) {
            return 0;
        }

        let target = tank.rect();
        let mut fired = 0;
        for column in index::sample(rng, HORDE_WIDTH, HORDE_WIDTH / 2) {
            if let Some(ship) = self.front_ship_mut(column) {
                if let Some(bullet) = ship.shoot(target) {
                    bullets.push(bullet);
                    fired += 1;
                }
            }
        }
        self.volley_timer.fire(now);
        trace!(fired, "volley");
        fired
    }

    /// The living ship of `column` closest to the tank, with its layer index.
    pub fn front_ship(&self, column: usize) -> Option<(usize, &Ship)> {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .find_map(|(row, layer)| layer.get(column).filter(|s| s.is_alive()).map(|s| (row, s)))
    }

    fn front_ship_mut(&mut self, column: usize) -> Option<&mut Ship> {
        let (row, _) = self.front_ship(column)?;
        self.layers[row].get_mut(column)
    }

    /// Run the damage protocol for every living ship against `bullets`.
    ///
    /// Returns the number of ships destroyed.
    pub fn take_damage(&mut self, bullets: &mut [Bullet], explosions: &mut Vec<Explosion>) -> usize {
        let mut destroyed = 0;
        for row in 0..self.layers.len() {
            for column in 0..self.layers[row].len() {
                let hit = self.layers[row]
                    .get_mut(column)
                    .map_or(false, |ship| ship.take_damage(bullets, explosions));
                if hit {
                    self.ship_destroyed(row, column);
                    destroyed += 1;
                }
            }
        }
        destroyed
    }

    /// Destroy the ship at `(row, column)` without a bullet.
    ///
    /// Returns `false` if there is no such ship or it was already dead.
    pub fn destroy(&mut self, row: usize, column: usize) -> bool {
        let killed = self
            .layers
            .get_mut(row)
            .and_then(|layer| layer.get_mut(column))
            .map_or(false, |ship| ship.kill());
        if killed {
            self.ship_destroyed(row, column);
        }
        killed
    }

    fn ship_destroyed(&mut self, row: usize, column: usize) {
        debug_assert!(self.alive_ships > 0, "more ships destroyed than formed");
        self.alive_ships = self.alive_ships.saturating_sub(1);
        trace!(row, column, left = self.alive_ships, "ship destroyed");
    }

    /// Bottom edge of the lowest living ship.
    pub fn lowest_edge(&self) -> Option<i32> {
        self.layers
            .iter()
            .flat_map(|layer| layer.ships())
            .filter(|s| s.is_alive())
            .map(|s| s.rect().bottom())
            .max()
    }

    /// Every living ship, for rendering.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.layers
            .iter()
            .flat_map(|layer| layer.ships())
            .filter(|s| s.is_alive())
    }

    pub fn is_dirty(&self) -> bool {
        self.layers
            .iter()
            .flat_map(|layer| layer.ships())
            .any(|s| s.dirty())
    }

    pub fn mark_clean(&mut self) {
        for layer in &mut self.layers {
            layer.mark_clean();
        }
    }
}

fn roll_interval((min, max): (f64, f64), rng: &mut impl Rng) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
