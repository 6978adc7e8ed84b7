//! The chunk formatter.
//!
//! A [`FormatRequest`] describes one message: its chunks, alignment,
//! indentation, line-break policy and rendering mode. A [`Formatter`] turns
//! it into a single string of raw ANSI output.
//!
//! - **Normal**: indentation, alignment, then effects and color per chunk.
//! - **Table**: rows padded to common column widths, cells joined by two
//!   spaces and rows by newlines.
//! - **Raw**: every chunk is prefixed with a cursor-position escape for its
//!   `pos_x`/`pos_y`; no indentation or alignment.
//!
//! In every mode the line-break policy is applied last, then the animation
//! prefix is prepended verbatim.
//!
//! ```rust,ignore
//! use aurora_term::prelude::*;
//!
//! let request = FormatRequest::new([
//!     TextChunk::colored("Deploy", "success"),
//!     TextChunk::plain(" finished"),
//! ])
//! .align(Align::Right)
//! .add_line(LineBreak::After);
//! print!("{}", format(&request));
//! ```

mod align;
mod indent;
mod table;

pub use align::{Align, align_chunks, visible_width};
pub use indent::{MAX_LEVELS, TAB_WIDTH, Tabs, indentation, level_for};
pub use table::{COLUMN_SEPARATOR, column_widths, normalize_rows, pad_cell};

use crate::chunk::TextChunk;
use crate::color::ColorInput;
use crate::palette::{self, Palette};
use crate::terminal::get_terminal_width;

/// Blank lines around the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreak {
    #[default]
    None,
    Before,
    After,
    Both,
}

impl LineBreak {
    /// Wrap `rendered` in the requested newlines.
    #[must_use]
    pub fn apply(self, rendered: String) -> String {
        match self {
            Self::None => rendered,
            Self::Before => format!("\n{rendered}"),
            Self::After => format!("{rendered}\n"),
            Self::Both => format!("\n{rendered}\n"),
        }
    }
}

/// How chunks are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Table,
    Raw,
}

/// The chunks of a request: a flat message or table rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunks {
    Flat(Vec<TextChunk>),
    Rows(Vec<Vec<TextChunk>>),
}

impl Default for Chunks {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl Chunks {
    /// All chunks in reading order; rows are concatenated.
    #[must_use]
    pub fn into_flat(self) -> Vec<TextChunk> {
        match self {
            Self::Flat(chunks) => chunks,
            Self::Rows(rows) => rows.into_iter().flatten().collect(),
        }
    }

    /// Table rows; a flat list is a single row.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<TextChunk>> {
        match self {
            Self::Flat(chunks) if chunks.is_empty() => Vec::new(),
            Self::Flat(chunks) => vec![chunks],
            Self::Rows(rows) => rows,
        }
    }
}

/// Everything needed to render one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatRequest {
    pub chunks: Chunks,
    /// Color for chunks that have none, resolved by the formatter's palette.
    pub default_color: Option<ColorInput>,
    pub align: Align,
    pub tabs: Tabs,
    pub add_line: LineBreak,
    /// Prepended verbatim to the final output.
    pub animation: String,
    pub mode: Mode,
    /// Line width; `None` queries the terminal at render time.
    pub width: Option<usize>,
}

impl FormatRequest {
    /// A normal-mode request for a flat list of chunks.
    #[must_use]
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<TextChunk>,
    {
        Self {
            chunks: Chunks::Flat(chunks.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A table-mode request.
    #[must_use]
    pub fn table<R, I, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<TextChunk>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self {
            chunks: Chunks::Rows(rows),
            mode: Mode::Table,
            ..Self::default()
        }
    }

    /// A raw-mode request; chunk positions are honored.
    #[must_use]
    pub fn raw<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<TextChunk>,
    {
        Self::new(chunks).mode(Mode::Raw)
    }

    #[must_use]
    pub fn default_color(mut self, color: impl Into<ColorInput>) -> Self {
        self.default_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn tabs(mut self, tabs: Tabs) -> Self {
        self.tabs = tabs;
        self
    }

    #[must_use]
    pub fn add_line(mut self, add_line: LineBreak) -> Self {
        self.add_line = add_line;
        self
    }

    #[must_use]
    pub fn animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// Renders requests against one palette.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    palette: &'a Palette,
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Self::new(palette::active())
    }
}

impl<'a> Formatter<'a> {
    #[must_use]
    pub const fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    #[must_use]
    pub const fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Render a request. Never fails; malformed parts fall back silently.
    #[must_use]
    pub fn format(&self, request: &FormatRequest) -> String {
        let chunks = request.chunks.clone();
        let rendered = match request.mode {
            Mode::Normal => self.render_normal(request, chunks.into_flat()),
            Mode::Table => {
                let rows = chunks
                    .into_rows()
                    .into_iter()
                    .map(|row| self.with_default_color(request, row))
                    .collect();
                table::render_rows(rows, request.align)
            }
            Mode::Raw => self
                .with_default_color(request, chunks.into_flat())
                .iter()
                .map(TextChunk::render_positioned)
                .collect(),
        };
        let rendered = request.add_line.apply(rendered);
        format!("{}{rendered}", request.animation)
    }

    fn render_normal(&self, request: &FormatRequest, chunks: Vec<TextChunk>) -> String {
        let chunks = self.with_default_color(request, chunks);
        let chunks = indent::indent_chunks(chunks, request.tabs);
        let chunks = if request.align.needs_width() {
            let width = request.width.unwrap_or_else(get_terminal_width);
            align_chunks(chunks, request.align, width)
        } else {
            chunks
        };
        chunks.iter().map(TextChunk::render).collect()
    }

    fn with_default_color(&self, request: &FormatRequest, chunks: Vec<TextChunk>) -> Vec<TextChunk> {
        let Some(input) = &request.default_color else {
            return chunks;
        };
        let color = input.clone().resolve(self.palette);
        chunks
            .into_iter()
            .map(|chunk| match chunk.color {
                Some(_) => chunk,
                None => chunk.with_color(color.clone()),
            })
            .collect()
    }
}

/// Render a request with the active palette.
#[must_use]
pub fn format(request: &FormatRequest) -> String {
    Formatter::default().format(request)
}

/// Render a flat, left-aligned, automatically indented message.
#[must_use]
pub fn render_chunks<I, C>(chunks: I) -> String
where
    I: IntoIterator<Item = C>,
    C: Into<TextChunk>,
{
    format(&FormatRequest::new(chunks))
}

/// Render rows as a left-aligned table.
#[must_use]
pub fn render_table<R, I, C>(rows: R) -> String
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = C>,
    C: Into<TextChunk>,
{
    format(&FormatRequest::table(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::effects::Effect;

    #[test]
    fn test_plain_message() {
        assert_eq!(render_chunks(["Hello", " world"]), "Hello world");
    }

    #[test]
    fn test_line_breaks() {
        let base = FormatRequest::new(["x"]);
        assert_eq!(format(&base.clone().add_line(LineBreak::Before)), "\nx");
        assert_eq!(format(&base.clone().add_line(LineBreak::After)), "x\n");
        assert_eq!(format(&base.add_line(LineBreak::Both)), "\nx\n");
    }

    #[test]
    fn test_animation_goes_before_line_break() {
        let request = FormatRequest::new(["x"])
            .add_line(LineBreak::Before)
            .animation("\x1b[2K\r");
        assert_eq!(format(&request), "\x1b[2K\r\nx");
    }

    #[test]
    fn test_automatic_indentation_from_palette_name() {
        let request = FormatRequest::new([TextChunk::colored("x", "secondary")]);
        let out = format(&request);
        assert!(out.contains("        x"), "{out:?}");
    }

    #[test]
    fn test_manual_indentation() {
        let request = FormatRequest::new(["x"]).tabs(Tabs::Manual(1));
        assert_eq!(format(&request), "    x");
    }

    #[test]
    fn test_right_alignment_with_width() {
        let request = FormatRequest::new(["abc"]).align(Align::Right).width(6);
        assert_eq!(format(&request), "   abc");
    }

    #[test]
    fn test_default_color_only_fills_gaps() {
        let red = Color::from_rgb(255, 0, 0);
        let request = FormatRequest::new([
            TextChunk::plain("a"),
            TextChunk::plain("b").with_color(Color::from_rgb(0, 0, 255)),
        ])
        .default_color(red)
        .tabs(Tabs::Manual(0));
        assert_eq!(
            format(&request),
            "\x1b[38;2;255;0;0ma\x1b[0m\x1b[38;2;0;0;255mb\x1b[0m"
        );
    }

    #[test]
    fn test_default_color_by_name_resolves_through_palette() {
        let palette = Palette::from_hex_entries([("accent", "#010203")], true)
            .expect("valid palette");
        let request = FormatRequest::new(["a"]).default_color("accent");
        assert_eq!(
            Formatter::new(&palette).format(&request),
            "\x1b[38;2;1;2;3ma\x1b[0m"
        );
    }

    #[test]
    fn test_effects_then_color() {
        let chunk = TextChunk::plain("Hi")
            .with_effect(Effect::Bold)
            .with_color(Color::from_rgb(1, 2, 3));
        let request = FormatRequest::new([chunk]);
        assert_eq!(
            format(&request),
            "\x1b[38;2;1;2;3m\x1b[1mHi\x1b[0m\x1b[0m"
        );
    }

    #[test]
    fn test_table_mode() {
        let request = FormatRequest::table([["A", "BB"], ["CCC", "D"]]);
        assert_eq!(format(&request), "A    BB\nCCC  D ");
    }

    #[test]
    fn test_table_mode_with_flat_chunks_is_one_row() {
        let request = FormatRequest::new(["a", "b"]).mode(Mode::Table);
        assert_eq!(format(&request), "a  b");
    }

    #[test]
    fn test_raw_mode_positions_each_chunk() {
        let request = FormatRequest::raw([
            TextChunk::plain("A").at(1, 1),
            TextChunk::plain("B").at(10, 3),
        ])
        .align(Align::Right)
        .tabs(Tabs::Manual(3));
        assert_eq!(format(&request), "\x1b[1;1HA\x1b[3;10HB");
    }

    #[test]
    fn test_normal_mode_with_rows_flattens() {
        let request = FormatRequest::table([["a"], ["b"]]).mode(Mode::Normal);
        assert_eq!(format(&request), "ab");
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(format(&FormatRequest::default()), "");
        assert_eq!(render_table(Vec::<Vec<&str>>::new()), "");
    }
}
