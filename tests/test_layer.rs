use space_invaders::constants::HORDE_WIDTH;
use space_invaders::entity::Sprite;
use space_invaders::geometry::Vec2;
use space_invaders::layer::HordeLayer;
use space_invaders::ship::{Ship, ShipKind};

/// A full row of kind-three ships starting at `x`, packed edge to edge.
fn make_layer(x: i32) -> HordeLayer {
    let mut layer = HordeLayer::new();
    for i in 0..HORDE_WIDTH as i32 {
        layer.append(Ship::new(ShipKind::Three, x + i * 48, 100));
    }
    layer
}

fn ys(layer: &HordeLayer) -> Vec<i32> {
    layer.ships().iter().map(|s| s.rect().y).collect()
}

// ── march ─────────────────────────────────────────────────────────────────────

#[test]
fn march_steps_sideways() {
    let mut layer = make_layer(200);
    assert!(layer.march(false));
    assert_eq!(layer[0].rect().x, 210);
    assert_eq!(layer.velocity(), Vec2::new(10, 0));
    assert!(!layer.is_dropping());
}

#[test]
fn right_edge_bounce_starts_drop() {
    // last ship's right edge: 300 + 8 * 48 + 48 = 732, past 750 - 24
    let mut layer = make_layer(300);
    assert!(layer.march(false));
    assert_eq!(layer.velocity(), Vec2::new(-10, 20));
    assert_eq!(layer[0].rect().x, 290);
    assert!(layer.is_dropping());
    assert!(ys(&layer).iter().all(|&y| y == 100));
}

#[test]
fn left_edge_bounce_starts_drop() {
    let mut layer = make_layer(20);
    layer.march(false);
    assert_eq!(layer.velocity(), Vec2::new(10, 20));
}

#[test]
fn march_refused_mid_drop() {
    let mut layer = make_layer(300);
    layer.march(false);
    let x = layer[0].rect().x;
    assert!(!layer.march(false));
    assert_eq!(layer[0].rect().x, x);
}

#[test]
fn empty_layer_cannot_march() {
    let mut layer = HordeLayer::new();
    assert!(layer.is_empty());
    assert!(!layer.march(false));
    assert_eq!(layer.edge_buffer(), None);
}

#[test]
fn dead_row_cannot_march() {
    let mut layer = make_layer(200);
    for i in 0..HORDE_WIDTH {
        layer.get_mut(i).unwrap().kill();
    }
    assert_eq!(layer.alive_count(), 0);
    assert!(!layer.march(false));
    assert_eq!(layer[0].rect().x, 200);
}

#[test]
fn edge_buffer_follows_first_living_ship() {
    let mut layer = HordeLayer::new();
    layer.append(Ship::new(ShipKind::One, 100, 100));
    layer.append(Ship::new(ShipKind::Two, 200, 100));
    assert_eq!(layer.edge_buffer(), Some(32.0));
    layer.get_mut(0).unwrap().kill();
    assert_eq!(layer.edge_buffer(), Some(27.5));
}

#[test]
fn last_survivor_ignores_dead_slots() {
    // the dead ship sits on the right edge, the survivor is far from it
    let mut alone = make_layer(300);
    for i in 1..HORDE_WIDTH {
        alone.get_mut(i).unwrap().kill();
    }
    let mut crowded = alone.clone();

    alone.march(true);
    assert_eq!(alone.velocity(), Vec2::new(10, 0));

    crowded.march(false);
    assert_eq!(crowded.velocity(), Vec2::new(-10, 20));
}

// ── drop ──────────────────────────────────────────────────────────────────────

#[test]
fn drop_lowers_one_ship_per_interval() {
    let mut layer = make_layer(300);
    layer.march(false);

    for step in 1..=HORDE_WIDTH {
        layer.update(0.06);
        let expected: Vec<i32> = (0..HORDE_WIDTH)
            .map(|i| if i < step { 120 } else { 100 })
            .collect();
        assert_eq!(ys(&layer), expected, "after {step} ticks");
    }
    assert!(!layer.is_dropping());
    assert_eq!(layer.drop_cursor(), None);
}

#[test]
fn drop_after_left_bounce_starts_from_the_right() {
    let mut layer = make_layer(20);
    layer.march(false);

    layer.update(0.06);
    assert_eq!(layer[HORDE_WIDTH - 1].rect().y, 120);
    assert_eq!(layer[0].rect().y, 100);
    assert_eq!(layer.drop_cursor(), Some(HORDE_WIDTH as i32 - 2));
}

#[test]
fn drop_waits_for_interval() {
    let mut layer = make_layer(300);
    layer.march(false);
    layer.update(0.03);
    assert!(ys(&layer).iter().all(|&y| y == 100));
    assert_eq!(layer.drop_cursor(), Some(0));
    layer.update(0.03);
    assert_eq!(layer[0].rect().y, 120);
}

#[test]
fn layer_marches_again_after_drop() {
    let mut layer = make_layer(300);
    layer.march(false);
    for _ in 0..HORDE_WIDTH {
        layer.update(0.06);
    }
    let x = layer[0].rect().x;
    assert!(layer.march(false));
    assert_eq!(layer[0].rect().x, x - 10);
    assert!(!layer.is_dropping());
}

#[test]
fn dead_ships_drop_with_their_row() {
    let mut layer = make_layer(300);
    layer.get_mut(4).unwrap().kill();
    layer.march(false);
    for _ in 0..HORDE_WIDTH {
        layer.update(0.06);
    }
    assert!(ys(&layer).iter().all(|&y| y == 120));
}

// ── serde ─────────────────────────────────────────────────────────────────────

#[test]
fn serialized_layer_follows_same_trajectory() {
    let mut layer = make_layer(250);
    let mut saw_drop = false;

    for tick in 0..15 {
        let json = serde_json::to_string(&layer).unwrap();
        let mut restored: HordeLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, layer, "tick {tick}: restore differs");

        for l in [&mut layer, &mut restored] {
            l.update(0.06);
            if tick % 2 == 0 {
                l.march(false);
            }
        }
        saw_drop |= layer.is_dropping();
        assert_eq!(restored, layer, "tick {tick}: trajectories diverged");
    }

    assert!(saw_drop, "trajectory never dropped");
}
