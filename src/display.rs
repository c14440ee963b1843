//! Rendering layer: all terminal I/O lives here.
//!
//! [`TerminalScene`] is the frontend's [`Presenter`]: it mirrors what the
//! core reports (sprites keyed by entity id, HUD values, game-over flag)
//! and [`render`] turns that mirror into terminal commands, scaling field
//! pixels down to character cells.  No game logic is performed here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arcade_shooter::entities::{EntityId, EntityKind, ItemKind};
use arcade_shooter::geometry::Aabb;
use arcade_shooter::presenter::Presenter;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_GAUGE: Color = Color::Magenta;
const C_GAUGE_READY: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_SHIELDED: Color = Color::Blue;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_ITEM_RAPID: Color = Color::Cyan;
const C_ITEM_SHIELD: Color = Color::Blue;
const C_POWERUP_ACTIVE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const GAUGE_CELLS: usize = 10;

// ── Scene mirror ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Sprite {
    kind: EntityKind,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Debug)]
pub struct TerminalScene {
    field_width: f32,
    field_height: f32,
    sprites: HashMap<EntityId, Sprite>,
    score: u32,
    gauge_percent: u8,
    gauge_ready: bool,
    shield: bool,
    rapid_fire: bool,
    game_over: bool,
}

impl TerminalScene {
    pub fn new(field_width: f32, field_height: f32) -> Self {
        TerminalScene {
            field_width,
            field_height,
            sprites: HashMap::new(),
            score: 0,
            gauge_percent: 0,
            gauge_ready: false,
            shield: false,
            rapid_fire: false,
            game_over: false,
        }
    }
}

impl Presenter for TerminalScene {
    fn render(&mut self, id: EntityId, kind: EntityKind, bounds: Aabb) {
        self.sprites.insert(
            id,
            Sprite {
                kind,
                x: bounds.min_x,
                y: bounds.min_y,
                width: bounds.width(),
                height: bounds.height(),
            },
        );
    }

    fn destroy(&mut self, id: EntityId) {
        self.sprites.remove(&id);
    }

    fn set_position(&mut self, id: EntityId, x: f32, y: f32) {
        if let Some(sprite) = self.sprites.get_mut(&id) {
            sprite.x = x;
            sprite.y = y;
        }
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn gauge_changed(&mut self, percent: u8, ready: bool) {
        self.gauge_percent = percent;
        self.gauge_ready = ready;
    }

    fn shield_changed(&mut self, active: bool) {
        self.shield = active;
    }

    fn rapid_fire_changed(&mut self, active: bool) {
        self.rapid_fire = active;
    }

    fn game_over(&mut self) {
        self.game_over = true;
    }

    fn reset(&mut self) {
        self.sprites.clear();
        self.game_over = false;
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `width` × `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    scene: &TerminalScene,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, scene, width)?;

    let view = Viewport::new(scene, width, height);
    // Player last so it stays visible on top of anything overlapping it.
    let mut sprites: Vec<&Sprite> = scene.sprites.values().collect();
    sprites.sort_by_key(|s| matches!(s.kind, EntityKind::Player));
    for sprite in sprites {
        draw_sprite(out, &view, sprite, scene.shield)?;
    }

    draw_controls_hint(out, height)?;

    if scene.game_over {
        draw_game_over(out, scene, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Field → cell mapping ──────────────────────────────────────────────────────

/// Play area is columns `1..width-1` and rows `2..height-2`.
struct Viewport {
    scale_x: f32,
    scale_y: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(scene: &TerminalScene, width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Viewport {
            scale_x: cols as f32 / scene.field_width,
            scale_y: rows as f32 / scene.field_height,
            cols,
            rows,
        }
    }

    /// Cell under the field point `(x, y)`, or `None` outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x * self.scale_x) as u16;
        let row = (y * self.scale_y) as u16;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((col + 1, row + 2))
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, scene: &TerminalScene, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", scene.score)))?;

    // Special gauge, centred
    let filled = scene.gauge_percent as usize * GAUGE_CELLS / 100;
    let bar = format!(
        "SP[{}{}]",
        "█".repeat(filled),
        "·".repeat(GAUGE_CELLS - filled)
    );
    let label = if scene.gauge_ready { " READY" } else { "" };
    let gx = (width / 2).saturating_sub((GAUGE_CELLS as u16 + 4) / 2);
    out.queue(cursor::MoveTo(gx, 0))?;
    out.queue(style::SetForegroundColor(if scene.gauge_ready {
        C_GAUGE_READY
    } else {
        C_GAUGE
    }))?;
    out.queue(Print(format!("{}{}", bar, label)))?;

    // Active effects, right-aligned
    let mut tags = String::new();
    if scene.rapid_fire {
        tags.push_str("[! RAPID]");
    }
    if scene.shield {
        tags.push_str("[◆ SHIELD]");
    }
    if !tags.is_empty() {
        let rx = width.saturating_sub(tags.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&tags))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: &Sprite,
    shielded: bool,
) -> std::io::Result<()> {
    let (glyph, color) = match sprite.kind {
        EntityKind::Player if shielded => ("(▲)", C_SHIELDED),
        EntityKind::Player => ("/▲\\", C_PLAYER),
        EntityKind::Enemy => ("«▼»", C_ENEMY),
        EntityKind::Projectile => ("║", C_BULLET_PLAYER),
        EntityKind::EnemyProjectile => ("↓", C_BULLET_ENEMY),
        EntityKind::Item(ItemKind::RapidFire) => ("!", C_ITEM_RAPID),
        EntityKind::Item(ItemKind::Shield) => ("◆", C_ITEM_SHIELD),
    };

    // Anchor the glyph on the centre of the hitbox.
    let cx = sprite.x + sprite.width / 2.0;
    let cy = sprite.y + sprite.height / 2.0;
    let Some((col, row)) = view.cell(cx, cy) else {
        return Ok(());
    };
    let half = glyph.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   X / Z : Special   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    scene: &TerminalScene,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let lines: [(String, Color); 5] = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", scene.score), Color::Yellow),
        ("R - Play Again  Q - Quit".to_string(), Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
