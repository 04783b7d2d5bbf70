#![forbid(unsafe_code)]

//! Cell-grid text surface.
//!
//! [`CellCanvas`] backs marquee glyph runs with plain strings measured in
//! terminal cells. One cell is one unit of width and a run is one unit tall,
//! so a marquee viewport of `Size::new(cols, 1.0)` maps directly onto a
//! terminal row.
//!
//! # Wide characters
//!
//! East Asian wide characters occupy two cells. A wide character cut by
//! either edge of the row, or overlapped by another run, is drawn as a
//! blank so the row never changes width.

use marquee_core::geometry::Size;
use marquee_core::style::TextStyle;
use marquee_core::TextSurface;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Handle to one glyph run on a [`CellCanvas`].
pub type RunId = usize;

#[derive(Debug, Clone)]
struct GlyphRun {
    text: String,
    style: TextStyle,
    x: f64,
    y: f64,
    attached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blank,
    Glyph(char),
    /// Right half of the wide glyph to its left.
    Continuation,
}

/// A [`TextSurface`] that renders into rows of terminal cells.
#[derive(Debug, Default)]
pub struct CellCanvas {
    runs: Vec<Option<GlyphRun>>,
    /// Slots freed by `destroy`, reused by the next `create_element`.
    free_list: Vec<RunId>,
}

impl CellCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs created and not yet destroyed.
    pub fn run_count(&self) -> usize {
        self.runs.iter().flatten().count()
    }

    pub fn attached_count(&self) -> usize {
        self.runs.iter().flatten().filter(|run| run.attached).count()
    }

    pub fn text(&self, id: RunId) -> Option<&str> {
        self.run(id).map(|run| run.text.as_str())
    }

    pub fn position(&self, id: RunId) -> Option<(f64, f64)> {
        self.run(id).map(|run| (run.x, run.y))
    }

    pub fn style(&self, id: RunId) -> Option<&TextStyle> {
        self.run(id).map(|run| &run.style)
    }

    pub fn is_attached(&self, id: RunId) -> bool {
        self.run(id).is_some_and(|run| run.attached)
    }

    /// Render every attached run into a row exactly `width` cells wide.
    ///
    /// Run positions are floored to whole cells.
    pub fn render_row(&self, width: u16) -> String {
        let width = usize::from(width);
        let mut cells = vec![Cell::Blank; width];

        for run in self.runs.iter().flatten().filter(|run| run.attached) {
            let mut col = run.x.floor() as i64;
            for ch in run.text.chars() {
                let w = ch.width().unwrap_or(0) as i64;
                if w == 0 {
                    continue;
                }
                for offset in 0..w {
                    let Ok(at) = usize::try_from(col + offset) else {
                        continue;
                    };
                    if let Some(cell) = cells.get_mut(at) {
                        *cell = if offset == 0 { Cell::Glyph(ch) } else { Cell::Continuation };
                    }
                }
                col += w;
            }
        }

        let mut row = String::with_capacity(width);
        let mut i = 0;
        while i < width {
            match cells[i] {
                Cell::Glyph(ch) if ch.width() == Some(2) => {
                    if cells.get(i + 1) == Some(&Cell::Continuation) {
                        row.push(ch);
                        i += 2;
                        continue;
                    }
                    row.push(' ');
                }
                Cell::Glyph(ch) => row.push(ch),
                Cell::Blank | Cell::Continuation => row.push(' '),
            }
            i += 1;
        }
        row
    }

    fn run(&self, id: RunId) -> Option<&GlyphRun> {
        self.runs.get(id).and_then(Option::as_ref)
    }

    fn run_mut(&mut self, id: RunId) -> Option<&mut GlyphRun> {
        self.runs.get_mut(id).and_then(Option::as_mut)
    }
}

impl TextSurface for CellCanvas {
    type Handle = RunId;

    fn create_element(&mut self, style: &TextStyle) -> RunId {
        let run = GlyphRun {
            text: String::new(),
            style: style.clone(),
            x: 0.0,
            y: 0.0,
            attached: false,
        };
        if let Some(id) = self.free_list.pop() {
            self.runs[id] = Some(run);
            return id;
        }
        self.runs.push(Some(run));
        self.runs.len() - 1
    }

    fn destroy(&mut self, id: RunId) {
        let Some(slot) = self.runs.get_mut(id) else {
            return;
        };
        if slot.take().is_some() {
            self.free_list.push(id);
        }
    }

    fn size_to_fit(&mut self, id: RunId, text: &str, style: &TextStyle) -> Size {
        if let Some(run) = self.run_mut(id) {
            run.text.clear();
            run.text.push_str(text);
            run.style = style.clone();
        }
        Size::new(text.width() as f64, 1.0)
    }

    fn set_position(&mut self, id: RunId, x: f64, y: f64) {
        if let Some(run) = self.run_mut(id) {
            run.x = x;
            run.y = y;
        }
    }

    fn attach(&mut self, id: RunId) {
        if let Some(run) = self.run_mut(id) {
            run.attached = true;
        }
    }

    fn detach(&mut self, id: RunId) {
        if let Some(run) = self.run_mut(id) {
            run.attached = false;
        }
    }

    fn apply_style(&mut self, id: RunId, style: &TextStyle) {
        if let Some(run) = self.run_mut(id) {
            run.style = style.clone();
        }
    }
}
