//! A character grid that paints a [`Scene`].

use colored::Colorize;
use std::fmt::Write;
use termgraph_core::Coordinate;
use termgraph_graph::{DrawCommand, Scene, CROSSHAIR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Dim,
    Highlight,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    style: Style,
}

const BLANK: Cell = Cell {
    ch: ' ',
    style: Style::Plain,
};

/// Largest width or height a canvas will allocate.
pub const MAX_SIDE: i32 = 1024;

/// A painted frame. Writes outside the grid are dropped.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A blank grid. Each side is clamped to `0..=MAX_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_SIDE) as usize;
        let height = height.clamp(0, MAX_SIDE) as usize;
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Paints every command of `scene`, in order, onto a blank grid.
    pub fn paint(scene: &Scene) -> Self {
        let mut canvas = Self::new(scene.terminal.width, scene.terminal.height);
        for command in &scene.commands {
            canvas.draw(command);
        }
        canvas
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Crosshair { position } => self.put(*position, CROSSHAIR, Style::Dim),
            DrawCommand::EdgeCell {
                position,
                glyph,
                highlighted,
            } => self.put(*position, *glyph, style(*highlighted)),
            DrawCommand::NodeFrame {
                position,
                width,
                text,
                highlighted,
                ..
            } => self.frame(*position, *width, text, style(*highlighted)),
            DrawCommand::StatusLine { text } => {
                let width = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
                self.frame(Coordinate::origin(), width, text, Style::Plain)
            }
        }
    }

    /// A three-row box, `inner` columns wide, with `text` centered inside.
    fn frame(&mut self, at: Coordinate, inner: i32, text: &str, style: Style) {
        let right = at.x + inner + 1;
        for (row, (left_ch, fill, right_ch)) in [('┌', '─', '┐'), ('│', ' ', '│'), ('└', '─', '┘')]
            .into_iter()
            .enumerate()
        {
            let y = at.y + row as i32;
            self.put(Coordinate::new(at.x, y), left_ch, style);
            for x in at.x + 1..right {
                self.put(Coordinate::new(x, y), fill, style);
            }
            self.put(Coordinate::new(right, y), right_ch, style);
        }

        let text: Vec<char> = text.chars().take(inner.max(0) as usize).collect();
        let pad = (inner - text.len() as i32) / 2;
        for (offset, ch) in text.into_iter().enumerate() {
            let x = at.x + 1 + pad + offset as i32;
            self.put(Coordinate::new(x, at.y + 1), ch, style);
        }
    }

    fn put(&mut self, at: Coordinate, ch: char, style: Style) {
        let (Ok(x), Ok(y)) = (usize::try_from(at.x), usize::try_from(at.y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, style };
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// The frame as plain text, one line per row, trailing blanks trimmed.
    pub fn to_plain(&self) -> String {
        self.rows()
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.ch).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The frame with the focused node and its edges highlighted.
    pub fn to_colored(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for cell in row {
                let ch = cell.ch.to_string();
                let _ = match cell.style {
                    Style::Plain => write!(out, "{}", ch),
                    Style::Dim => write!(out, "{}", ch.dimmed()),
                    Style::Highlight => write!(out, "{}", ch.yellow().bold()),
                };
            }
        }
        out
    }

    #[cfg(test)]
    fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }
}

fn style(highlighted: bool) -> Style {
    if highlighted {
        Style::Highlight
    } else {
        Style::Plain
    }
}
