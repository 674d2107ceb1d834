use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_WIDTH, DROP_INTERVAL, LAYER_DROP, LAYER_STEP};
use crate::cooldown::Cooldown;
use crate::entity::{Clock, Entity, Sprite};
use crate::geometry::Vec2;
use crate::ship::Ship;

/// One row of the horde, marched and bounced as a unit.
///
/// A bounce off either edge flips the horizontal velocity and starts a
/// drop: the ships step down one at a time, `DROP_INTERVAL` apart, starting
/// with the ship that leads the new direction. The layer refuses to march
/// until the whole row has dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HordeLayer {
    ships: Vec<Ship>,
    velocity: Vec2,
    drop_cursor: Option<i32>,
    drop_timer: Cooldown,
    clock: Clock,
}

impl Default for HordeLayer {
    fn default() -> Self {
        HordeLayer::new()
    }
}

impl HordeLayer {
    pub fn new() -> Self {
        HordeLayer {
            ships: Vec::new(),
            velocity: Vec2::new(LAYER_STEP, 0),
            drop_cursor: None,
            drop_timer: Cooldown::new(DROP_INTERVAL),
            clock: Clock::default(),
        }
    }

    /// Add a ship at the end of the row. Only used while forming the horde.
    pub fn append(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn get(&self, column: usize) -> Option<&Ship> {
        self.ships.get(column)
    }

    pub fn get_mut(&mut self, column: usize) -> Option<&mut Ship> {
        self.ships.get_mut(column)
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_dropping(&self) -> bool {
        self.velocity.y != 0
    }

    /// Slot that drops next, while a drop is in progress.
    pub fn drop_cursor(&self) -> Option<i32> {
        self.drop_cursor
    }

    pub fn alive_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_alive()).count()
    }

    /// Bounce margin for this row, taken from its first living ship.
    pub fn edge_buffer(&self) -> Option<f64> {
        self.ships
            .iter()
            .find(|s| s.is_alive())
            .map(|s| s.kind().profile().edge_buffer)
    }

    /// Advance the layer's clock and, mid-drop, lower the next ship.
    pub fn update(&mut self, seconds_elapsed: f64) {
        self.clock.tick(seconds_elapsed);
        for ship in &mut self.ships {
            ship.update(seconds_elapsed);
        }

        if !self.is_dropping() {
            return;
        }

        let last = self.ships.len() as i32 - 1;
        let leftward = self.velocity.x < 0;
        let cursor = *self
            .drop_cursor
            .get_or_insert(if leftward { 0 } else { last });

        if !self.drop_timer.ready(self.clock.current_time) {
            return;
        }

        let dy = self.velocity.y;
        if let Some(ship) = usize::try_from(cursor).ok().and_then(|i| self.ships.get_mut(i)) {
            ship.translate(0, dy);
        }
        self.drop_timer.fire(self.clock.current_time);

        let next = if leftward { cursor + 1 } else { cursor - 1 };
        if next < 0 || next > last {
            self.drop_cursor = None;
            self.velocity.y = 0;
            self.drop_timer.reset();
        } else {
            self.drop_cursor = Some(next);
        }
    }

    /// Move the row one step sideways, bouncing off the field edges.
    ///
    /// With `last_survivor` set only living ships are checked against the
    /// edges; otherwise every slot counts, so the row keeps the width it was
    /// formed with. Returns `false` when the row could not march (mid-drop
    /// or no ship left).
    pub fn march(&mut self, last_survivor: bool) -> bool {
        if self.is_dropping() {
            return false;
        }
        let Some(buffer) = self.edge_buffer() else {
            return false;
        };
        let right_limit = DISPLAY_WIDTH as f64 - buffer;

        for ship in self.ships.iter().filter(|s| !last_survivor || s.is_alive()) {
            let rect = ship.rect();
            if rect.left() as f64 <= buffer {
                self.velocity.x = self.velocity.x.abs();
                self.velocity.y = LAYER_DROP;
            } else if rect.right() as f64 >= right_limit {
                self.velocity.x = -self.velocity.x.abs();
                self.velocity.y = LAYER_DROP;
            }
        }

        let dx = self.velocity.x;
        for ship in &mut self.ships {
            ship.translate(dx, 0);
        }
        true
    }

    pub fn mark_clean(&mut self) {
        for ship in &mut self.ships {
            ship.mark_clean();
        }
    }
}

impl Index<usize> for HordeLayer {
    type Output = Ship;

    fn index(&self, column: usize) -> &Ship {
        &self.ships[column]
    }
}
