//! Plain-text backend that prints frames to any [`Write`] sink.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use tower_defence_core::{EnemyKind, Tile};

use crate::{FrameControl, Presentation, RenderingBackend, RunStatus, Scene, FRAME_DELTA};

/// Backend that draws the board as a character grid followed by the HUD.
#[derive(Debug)]
pub struct TextBackend<W: Write> {
    writer: W,
    render_every: u64,
    ansi_colors: bool,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend that draws every frame without terminal colors.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            render_every: 1,
            ansi_colors: false,
        }
    }

    /// Draws only every `frames`-th frame; the final frame is always drawn.
    #[must_use]
    pub fn with_render_every(mut self, frames: u64) -> Self {
        self.render_every = frames.max(1);
        self
    }

    /// Enables 24-bit terminal colors for enemies.
    #[must_use]
    pub fn with_ansi_colors(mut self, enabled: bool) -> Self {
        self.ansi_colors = enabled;
        self
    }

    /// Draws a single frame.
    pub fn draw(&mut self, scene: &Scene) -> AnyResult<()> {
        let frame = self.compose(scene);
        self.writer
            .write_all(frame.as_bytes())
            .context("failed to write frame")?;
        Ok(())
    }

    fn compose(&self, scene: &Scene) -> String {
        let hud = &scene.hud;
        let mut out = format!(
            "== tick {} | health {} | gold {} | wave {}/{} | {}/{} enemies | shots {} ==\n",
            hud.tick,
            hud.health,
            hud.gold,
            hud.wave_number,
            hud.wave_count,
            hud.remaining_enemies,
            hud.total_enemies,
            scene.projectiles.len(),
        );

        let board = &scene.board;
        let mut glyphs: Vec<String> = board
            .tiles
            .iter()
            .map(|tile| tile_glyph(*tile).to_string())
            .collect();
        for enemy in &scene.enemies {
            let column = enemy.position.x.round();
            let row = enemy.position.y.round();
            if column < 0.0 || row < 0.0 {
                continue;
            }
            let (column, row) = (column as u32, row as u32);
            if board.tile(column, row).is_none() {
                continue;
            }
            let glyph = enemy_glyph(enemy.kind);
            glyphs[row as usize * board.columns as usize + column as usize] = if self.ansi_colors
            {
                let (red, green, blue) = enemy.color.to_rgb_u8();
                format!("\x1b[38;2;{red};{green};{blue}m{glyph}\x1b[0m")
            } else {
                glyph.to_string()
            };
        }

        for row in 0..board.rows {
            for column in 0..board.columns {
                let on_cursor = board.cursor.column() == column as i32
                    && board.cursor.row() == row as i32;
                out.push(if on_cursor { '>' } else { ' ' });
                out.push_str(&glyphs[row as usize * board.columns as usize + column as usize]);
            }
            out.push('\n');
        }

        out.push_str("shop:");
        for panel in &scene.tower_panels {
            let descriptor = panel.kind.descriptor();
            let marker = match (panel.selected, panel.affordable) {
                (true, _) => "*",
                (false, true) => "",
                (false, false) => " (too expensive)",
            };
            out.push_str(&format!(
                " [{}] {} {}g {} DMG {} TIME {} RANGE{marker}",
                panel.key,
                descriptor.name(),
                descriptor.price(),
                descriptor.damage(),
                descriptor.firing_time(),
                descriptor.max_range(),
            ));
        }
        out.push('\n');

        if let Some(preview) = scene.range_preview {
            out.push_str(&format!(
                "build: range {} around ({}, {})\n",
                preview.radius, preview.centre.x, preview.centre.y
            ));
        }

        out.push_str("waves:");
        for panel in &scene.wave_panels {
            let descriptor = panel.kind.descriptor();
            let marker = if panel.current { ">" } else { "" };
            out.push_str(&format!(
                " {marker}Wave {}: {} x{} ({} HP {} SPD {} GOLD",
                panel.number,
                descriptor.name(),
                panel.total_amount,
                descriptor.health(),
                descriptor.speed(),
                descriptor.reward(),
            ));
            if panel.batch_amount > 0 {
                out.push_str(&format!(", batches of {}", panel.batch_amount));
            }
            out.push(')');
        }
        out.push('\n');

        match hud.status {
            RunStatus::Running => {}
            RunStatus::Paused => out.push_str("-- paused --\n"),
            RunStatus::Won => out.push_str("*** You win! ***\n"),
            RunStatus::Lost => out.push_str("*** You lose! ***\n"),
        }
        out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(std::time::Duration, &mut Scene) -> FrameControl,
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;
        writeln!(self.writer, "{window_title}").context("failed to write title")?;
        self.draw(&scene)?;

        let mut frame: u64 = 0;
        loop {
            let control = update_scene(FRAME_DELTA, &mut scene);
            frame += 1;
            let exit = control == FrameControl::Exit;
            if exit || frame % self.render_every == 0 {
                self.draw(&scene)?;
            }
            if exit {
                break;
            }
        }

        self.writer.flush().context("failed to flush output")?;
        Ok(())
    }
}

fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Path => '#',
        Tile::Empty => '.',
        Tile::Tower(kind) => {
            let id = kind.descriptor().base_color_id();
            char::from_digit(u32::from(id.unsigned_abs()), 10).unwrap_or('T')
        }
    }
}

fn enemy_glyph(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::Regular => 'r',
        EnemyKind::Tough => 't',
        EnemyKind::Fast => 'f',
        EnemyKind::Tougher => 'T',
        EnemyKind::RegularPlus => 'R',
        EnemyKind::Boss => 'B',
    }
}
