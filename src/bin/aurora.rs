//! aurora - render styled terminal text from the command line.
//!
//! The process always exits with status 0. Input that cannot be rendered
//! prints the help text instead.

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::LevelFilter;

use aurora_term::color::{ColorOptions, apply_color_with};
use aurora_term::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "aurora")]
#[command(about = "Render colored, aligned and tabulated text as ANSI escape sequences")]
#[command(
    long_about = "Render colored, aligned and tabulated text as ANSI escape sequences.

EXAMPLES:
    aurora --text Hello --color success --bold
    aurora --text Left --text Right --align justify --width 40
    aurora --table --headers Name,Age --row Alice,30 --row Bob,4
    aurora --text 'Rainbow text' --gradient
    aurora --raw --text A --pos-x 1 --pos-y 1 --text B --pos-x 10 --pos-y 3"
)]
#[command(version)]
struct Cli {
    /// Text chunk to render; repeat for several chunks
    #[arg(long = "text", short = 't', value_name = "TEXT")]
    texts: Vec<String>,

    /// Color for the chunk at the same position (palette name or #RRGGBB)
    #[arg(long = "color", short = 'c', value_name = "COLOR")]
    colors: Vec<String>,

    #[arg(long)]
    bold: bool,
    #[arg(long)]
    dim: bool,
    #[arg(long)]
    italic: bool,
    #[arg(long)]
    underline: bool,
    #[arg(long)]
    blink: bool,
    #[arg(long)]
    reverse: bool,
    #[arg(long)]
    hidden: bool,
    #[arg(long)]
    strikethrough: bool,
    #[arg(long)]
    link: bool,

    /// Horizontal alignment
    #[arg(long, value_enum, default_value_t = AlignArg::Left)]
    align: AlignArg,

    /// Render --headers and --row values as a table
    #[arg(long)]
    table: bool,

    /// Comma-separated header cells
    #[arg(long, value_delimiter = ',', value_name = "CELLS")]
    headers: Vec<String>,

    /// Comma-separated row cells; repeat for several rows
    #[arg(long = "row", value_name = "CELLS")]
    rows: Vec<String>,

    /// Lighten every color by this many tones
    #[arg(long, value_name = "TONES")]
    lighten: Option<u32>,

    /// Darken every color by this many tones
    #[arg(long, value_name = "TONES")]
    darken: Option<u32>,

    /// Render colors in reverse video
    #[arg(long)]
    inverted: bool,

    /// Apply colors to the background instead of the foreground
    #[arg(long)]
    background: bool,

    /// Spread a gradient over the text (the --color list or the palette gradient)
    #[arg(long)]
    gradient: bool,

    /// Pretty-print and highlight a JSON document
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Palette .ini file overriding the built-in colors
    #[arg(long, value_name = "PATH")]
    palette: Option<PathBuf>,

    /// Line width used for alignment (defaults to the terminal width)
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Blank lines around the output
    #[arg(long, value_enum, default_value_t = LineBreakArg::None)]
    add_line: LineBreakArg,

    /// Indentation levels; negative derives them from the color name
    #[arg(long, default_value_t = -1, allow_negative_numbers = true, value_name = "LEVELS")]
    tabs: i64,

    /// Position every chunk with --pos-x / --pos-y
    #[arg(long)]
    raw: bool,

    /// Column for the chunk at the same position
    #[arg(long = "pos-x", value_name = "COLUMN")]
    pos_x: Vec<u16>,

    /// Row for the chunk at the same position
    #[arg(long = "pos-y", value_name = "ROW")]
    pos_y: Vec<u16>,

    /// Remove all ANSI codes from the output
    #[arg(long)]
    strip: bool,

    /// Log debug messages to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlignArg {
    Left,
    Right,
    Center,
    Justify,
    CenterBlock,
}

impl From<AlignArg> for Align {
    fn from(value: AlignArg) -> Self {
        match value {
            AlignArg::Left => Self::Left,
            AlignArg::Right => Self::Right,
            AlignArg::Center => Self::Center,
            AlignArg::Justify => Self::Justify,
            AlignArg::CenterBlock => Self::CenterBlock,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineBreakArg {
    None,
    Before,
    After,
    Both,
}

impl From<LineBreakArg> for LineBreak {
    fn from(value: LineBreakArg) -> Self {
        match value {
            LineBreakArg::None => Self::None,
            LineBreakArg::Before => Self::Before,
            LineBreakArg::After => Self::After,
            LineBreakArg::Both => Self::Both,
        }
    }
}

impl Cli {
    fn effects(&self) -> EffectSet {
        [
            (self.bold, Effect::Bold),
            (self.dim, Effect::Dim),
            (self.italic, Effect::Italic),
            (self.underline, Effect::Underline),
            (self.blink, Effect::Blink),
            (self.reverse, Effect::Reverse),
            (self.hidden, Effect::Hidden),
            (self.strikethrough, Effect::Strikethrough),
            (self.link, Effect::Link),
        ]
        .into_iter()
        .filter_map(|(enabled, effect)| enabled.then_some(effect))
        .collect()
    }

    /// Apply lighten, darken and inversion to a color.
    fn adjust(&self, mut color: Color) -> Color {
        if let Some(tones) = self.lighten {
            color = color.lighten(tones);
        }
        if let Some(tones) = self.darken {
            color = color.darken(tones);
        }
        let inverted = self.inverted || color.is_inverted();
        color.with_inverted(inverted)
    }

    /// The color at `index` after lighten, darken and inversion.
    fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).map(|color| self.adjust(to_color(color)))
    }

    fn with_effects(&self, chunk: TextChunk) -> TextChunk {
        let effects = self.effects();
        if effects.is_empty() {
            chunk
        } else {
            chunk.with_effects(effects)
        }
    }

    fn chunk(&self, text: &str, index: usize) -> TextChunk {
        let chunk = self.with_effects(TextChunk::plain(text));
        match self.color(index) {
            Some(color) if self.background => {
                chunk.with_text(apply_color_with(text, &color, ColorOptions::background()))
            }
            Some(color) => chunk.with_color(color),
            None => chunk,
        }
    }

    /// The joined text shaded along the `--color` list or the palette
    /// gradient, each grapheme carrying the effect flags.
    fn gradient(&self) -> TextChunk {
        let stops: Vec<Color> = if self.colors.is_empty() {
            palette_gradient()
        } else {
            self.colors.iter().map(to_color).collect()
        };
        let stops: Vec<Color> = stops.into_iter().map(|stop| self.adjust(stop)).collect();
        gradient_chunks(&self.texts.concat(), &stops)
            .into_iter()
            .map(|chunk| {
                let chunk = self.with_effects(chunk);
                match chunk.color.clone() {
                    // Interpolated colors do not carry the stops' inversion.
                    Some(color) if self.inverted => chunk.with_color(color.with_inverted(true)),
                    _ => chunk,
                }
            })
            .map(|chunk| chunk.render())
            .collect::<String>()
            .into()
    }

    fn request(&self) -> FormatRequest {
        let request = if self.table {
            let header = (!self.headers.is_empty()).then(|| {
                self.headers
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| self.chunk(cell, column).with_effect(Effect::Bold))
                    .collect::<Vec<_>>()
            });
            let rows = self.rows.iter().map(|row| {
                row.split(',')
                    .enumerate()
                    .map(|(column, cell)| self.chunk(cell.trim(), column))
                    .collect::<Vec<_>>()
            });
            FormatRequest::table(header.into_iter().chain(rows))
        } else if self.gradient {
            FormatRequest::new([self.gradient()])
        } else {
            let chunks = self.texts.iter().enumerate().map(|(index, text)| {
                let chunk = self.chunk(text, index);
                match (self.pos_x.get(index), self.pos_y.get(index)) {
                    (None, None) => chunk,
                    (x, y) => chunk.at(x.copied().unwrap_or(1), y.copied().unwrap_or(1)),
                }
            });
            FormatRequest::new(chunks.collect::<Vec<_>>())
        };

        let mode = match request.mode {
            Mode::Normal if self.raw => Mode::Raw,
            mode => mode,
        };
        let mut request = request
            .mode(mode)
            .align(self.align.into())
            .tabs(Tabs::from_level(self.tabs))
            .add_line(self.add_line.into());
        request.width = self.width;
        request
    }

    fn has_input(&self) -> bool {
        if self.table {
            !self.headers.is_empty() || !self.rows.is_empty()
        } else {
            !self.texts.is_empty() || self.json.is_some()
        }
    }
}

fn print_help() {
    let _ = Cli::command().print_help();
    println!();
}

#[cfg(feature = "json")]
fn render_json(input: &str) -> Option<String> {
    match format_json(input) {
        Ok(rendered) => Some(rendered),
        Err(err) => {
            eprintln!("aurora: {err}");
            None
        }
    }
}

#[cfg(not(feature = "json"))]
fn render_json(_input: &str) -> Option<String> {
    eprintln!("aurora: built without JSON support");
    None
}

fn load_palette(path: &Path) {
    let installed = Palette::read(path, true).and_then(Palette::install);
    if let Err(err) = installed {
        eprintln!("aurora: {err}; using the built-in palette");
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = err.print();
                }
                _ => {
                    log::debug!("invalid arguments: {err}");
                    print_help();
                }
            }
            return;
        }
    };

    // The logger copies the active palette, so install the file first.
    if let Some(path) = &cli.palette {
        load_palette(path);
    }
    if cli.verbose {
        let _ = AuroraLogger::new().level(LevelFilter::Debug).init();
    }
    if !cli.has_input() {
        print_help();
        return;
    }

    let rendered = match (&cli.json, cli.table) {
        (Some(json), false) => match render_json(json) {
            Some(rendered) => LineBreak::from(cli.add_line).apply(rendered),
            None => {
                print_help();
                return;
            }
        },
        _ => format(&cli.request()),
    };

    if cli.strip {
        println!("{}", strip_ansi(&rendered));
    } else {
        println!("{rendered}");
    }
}
