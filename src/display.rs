//! Rendering layer. All terminal I/O lives here.
//!
//! The play field is 750 × 750 pixels; every frame it is squeezed into
//! whatever the terminal offers between the HUD row and the hint row.
//! Sprites are drawn as short glyph strings centred on their pixel rect,
//! shields are sampled pixel by pixel so their holes show up.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use space_invaders::entity::Sprite;
use space_invaders::geometry::Rect;
use space_invaders::ship::ShipKind;
use space_invaders::sprites::SpriteId;
use space_invaders::{GameStatus, World};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_TANK: Color = Color::White;
const C_SHIELD: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_BULLET_TANK: Color = Color::Cyan;
const C_BULLET_SHIP: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal cells available to the play field, inside the border.
#[derive(Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    const LEFT: u16 = 1;
    const TOP: u16 = 2;

    fn new(width: u16, height: u16) -> Self {
        Viewport {
            width,
            height,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    fn col(&self, x: i32) -> i32 {
        Self::LEFT as i32 + x * self.cols as i32 / DISPLAY_WIDTH
    }

    fn row(&self, y: i32) -> i32 {
        Self::TOP as i32 + y * self.rows as i32 / DISPLAY_HEIGHT
    }

    /// Pixel at the centre of cell `(col, row)`.
    fn pixel(&self, col: i32, row: i32) -> (i32, i32) {
        let cx = ((col - Self::LEFT as i32) * 2 + 1) * DISPLAY_WIDTH / (self.cols as i32 * 2);
        let cy = ((row - Self::TOP as i32) * 2 + 1) * DISPLAY_HEIGHT / (self.rows as i32 * 2);
        (cx, cy)
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= Self::LEFT as i32
            && col < (Self::LEFT + self.cols) as i32
            && row >= Self::TOP as i32
            && row < (Self::TOP + self.rows) as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for a terminal of `(width, height)` cells.
pub fn render<W: Write>(out: &mut W, world: &World, size: (u16, u16)) -> std::io::Result<()> {
    let view = Viewport::new(size.0, size.1);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, world, &view)?;
    draw_shields(out, world, &view)?;

    for (id, rect) in world.sprites() {
        if id != SpriteId::Shield {
            draw_sprite(out, &view, id, rect)?;
        }
    }

    draw_controls_hint(out, &view)?;

    match world.status() {
        GameStatus::Playing => {}
        status => draw_game_over(out, world, status, &view)?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Ships: {:>2}", world.horde.alive_ships())))?;

    let speed = format!("Speed: +{:.3}", world.horde.speed_multiplier());
    let cx = view.width / 2;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(speed.chars().count() as u16 / 2),
        0,
    ))?;
    out.queue(Print(&speed))?;

    let hits: usize = world.shields.iter().map(|s| s.impacts()).sum();
    let right = format!("Shield hits: {}", hits);
    let col = view
        .width
        .saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Shields ───────────────────────────────────────────────────────────────────

fn draw_shields<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    for shield in &world.shields {
        let rect = shield.rect();
        let image = shield.image();
        for row in view.row(rect.top())..=view.row(rect.bottom() - 1) {
            for col in view.col(rect.left())..=view.col(rect.right() - 1) {
                if !view.contains(col, row) {
                    continue;
                }
                let (px, py) = view.pixel(col, row);
                if image.is_opaque(px - rect.x, py - rect.y) {
                    out.queue(cursor::MoveTo(col as u16, row as u16))?;
                    out.queue(Print("█"))?;
                }
            }
        }
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn glyph(id: SpriteId) -> (&'static str, Color) {
    match id {
        SpriteId::Ship { kind, frame } => {
            let (frames, color) = match kind {
                ShipKind::One => (["{@}", "}@{"], Color::Magenta),
                ShipKind::Two => (["/W\\", "\\W/"], Color::Cyan),
                ShipKind::Three => (["<M>", ">M<"], Color::Green),
            };
            (frames[frame as usize % 2], color)
        }
        SpriteId::ShipBullet(kind) => match kind {
            ShipKind::One => ("|", C_BULLET_SHIP),
            ShipKind::Two => ("/", C_BULLET_SHIP),
            ShipKind::Three => ("Z", C_BULLET_SHIP),
        },
        SpriteId::TankBullet => ("╵", C_BULLET_TANK),
        SpriteId::Tank => ("_▲_", C_TANK),
        SpriteId::Mystery => ("<=O=>", C_MYSTERY),
        SpriteId::ShipBulletExplosion | SpriteId::TankBulletExplosion => ("x", C_EXPLOSION),
        SpriteId::ShipExplosion => ("\\*/", C_EXPLOSION),
        SpriteId::MysteryExplosion => ("<*>", C_MYSTERY),
        SpriteId::TankExplosion => ("#*#", C_EXPLOSION),
        SpriteId::Shield => ("█", C_SHIELD),
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    id: SpriteId,
    rect: Rect,
) -> std::io::Result<()> {
    if rect.right() <= 0 || rect.left() >= DISPLAY_WIDTH {
        return Ok(());
    }
    let (text, color) = glyph(id);
    let row = view.row(rect.y + rect.height / 2);
    let start = view.col(rect.center_x()) - text.chars().count() as i32 / 2;

    out.queue(style::SetForegroundColor(color))?;
    for (i, ch) in text.chars().enumerate() {
        let col = start + i as i32;
        if view.contains(col, row) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let hint = "←/→ or A/D: Move   Space: Shoot   R: Restart   Q: Quit";
    let col = (view.width / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &World,
    status: GameStatus,
    view: &Viewport,
) -> std::io::Result<()> {
    let (title, color) = match status {
        GameStatus::Cleared => ("★  HORDE DESTROYED  ★", Color::Yellow),
        _ => ("G A M E   O V E R", Color::Red),
    };
    let detail = format!(
        "{} ships left after {} frames",
        world.horde.alive_ships(),
        world.frame()
    );
    let hint = "R - Play Again  Q - Quit";

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(1);
    let lines: [(&str, Color); 3] = [(title, color), (&detail, Color::White), (hint, C_HINT)];

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
