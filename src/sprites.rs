//! Procedural sprite sheet.
//!
//! Every image the game needs is described by a small ASCII template and
//! scaled up, so collision masks can be built without loading any asset.
//! `SpriteId` is the image handle handed to renderers.

use serde::{Deserialize, Serialize};

use crate::mask::PixelImage;
use crate::ship::ShipKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Ship { kind: ShipKind, frame: u8 },
    ShipBullet(ShipKind),
    ShipBulletExplosion,
    ShipExplosion,
    Tank,
    TankBullet,
    TankBulletExplosion,
    TankExplosion,
    Mystery,
    MysteryExplosion,
    Shield,
}

// ── Templates ────────────────────────────────────────────────────────────────

const SHIP_ONE: [&[&str]; 2] = [
    &[
        "...##...",
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        "..#..#..",
        ".#.##.#.",
        "#.#..#.#",
    ],
    &[
        "...##...",
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        ".#.##.#.",
        "#......#",
        ".#....#.",
    ],
];

const SHIP_TWO: [&[&str]; 2] = [
    &[
        "..#.....#..",
        "...#...#...",
        "..#######..",
        ".##.###.##.",
        "###########",
        "#.#######.#",
        "#.#.....#.#",
        "...##.##...",
    ],
    &[
        "..#.....#..",
        "#..#...#..#",
        "#.#######.#",
        "###.###.###",
        "###########",
        ".#########.",
        "..#.....#..",
        ".#.......#.",
    ],
];

const SHIP_THREE: [&[&str]; 2] = [
    &[
        "....####....",
        ".##########.",
        "############",
        "###..##..###",
        "############",
        "...##..##...",
        "..##.##.##..",
        "##........##",
    ],
    &[
        "....####....",
        ".##########.",
        "############",
        "###..##..###",
        "############",
        "..###..###..",
        ".##..##..##.",
        "..##....##..",
    ],
];

const MYSTERY: &[&str] = &[
    ".....######.....",
    "...##########...",
    "..############..",
    ".##.##.##.##.##.",
    "################",
    "..###..##..###..",
    "...#........#...",
];

const TANK: &[&str] = &[
    "......#......",
    ".....###.....",
    ".....###.....",
    ".###########.",
    "#############",
    "#############",
    "#############",
    "#############",
];

const SHIELD: &[&str] = &[
    "....##############....",
    "...################...",
    "..##################..",
    ".####################.",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "#######........#######",
    "######..........######",
    "######..........######",
    "######..........######",
];

const EXPLOSION: &[&str] = &[
    "....#...#....",
    ".#...#.#...#.",
    "..#.......#..",
    "...#.....#...",
    "##.........##",
    "...#.....#...",
    "..#..#.#..#..",
    ".#..#...#..#.",
];

const TANK_EXPLOSION: &[&str] = &[
    "..#....#....#..",
    "#...#.....#...#",
    "..#...###...#..",
    "....#######....",
    "..###########..",
    ".#############.",
    "###############",
    "###############",
];

const BULLET_EXPLOSION: &[&str] = &["#..#", ".##.", ".##.", "#..#"];

const TANK_BULLET: &[&str] = &["#", "#", "#", "#", "#"];

const SHIP_BULLETS: [&[&str]; 3] = [
    &["##", "##", "##", "##", "##", "##", "##", "##", "##", "##"],
    &["#.", ".#", "#.", ".#", "#.", ".#", "#.", ".#", "#.", ".#"],
    &["##", ".#", "##", "#.", "##", ".#", "##", "#.", "##", "##"],
];

fn template(id: SpriteId) -> (&'static [&'static str], i32) {
    match id {
        SpriteId::Ship { kind, frame } => {
            let frames = match kind {
                ShipKind::One => &SHIP_ONE,
                ShipKind::Two => &SHIP_TWO,
                ShipKind::Three => &SHIP_THREE,
            };
            (frames[frame as usize % frames.len()], 4)
        }
        SpriteId::ShipBullet(kind) => (SHIP_BULLETS[kind.index()], 2),
        SpriteId::ShipBulletExplosion | SpriteId::TankBulletExplosion => (BULLET_EXPLOSION, 4),
        SpriteId::ShipExplosion | SpriteId::MysteryExplosion => (EXPLOSION, 4),
        SpriteId::Tank => (TANK, 4),
        SpriteId::TankBullet => (TANK_BULLET, 4),
        SpriteId::TankExplosion => (TANK_EXPLOSION, 4),
        SpriteId::Mystery => (MYSTERY, 4),
        SpriteId::Shield => (SHIELD, 4),
    }
}

/// Render the image for a sprite handle.
pub fn image(id: SpriteId) -> PixelImage {
    let (rows, scale) = template(id);
    PixelImage::from_template(rows, scale)
}

/// Pixel size of a sprite without building its image.
pub fn size(id: SpriteId) -> (i32, i32) {
    let (rows, scale) = template(id);
    let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
    (cols * scale, rows.len() as i32 * scale)
}
