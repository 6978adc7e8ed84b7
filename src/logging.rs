//! A `log` backend that renders records with the crate's own color engine.
//!
//! Each level is colored with a palette entry: error, warning, info and
//! debug use the entries of the same name, trace uses a dimmed `no_color`.
//! Optional tracing integration is available via `AuroraTracingLayer` when
//! the `tracing` feature is enabled.
//!
//! ```rust,ignore
//! use aurora_term::logging::AuroraLogger;
//! use log::LevelFilter;
//!
//! AuroraLogger::new().level(LevelFilter::Debug).show_time(false).init()?;
//! log::info!("palette loaded");
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::chunk::TextChunk;
use crate::color::Color;
use crate::effects::{Effect, EffectSet};
use crate::palette::{self, NO_COLOR, Palette};
use crate::sync::lock_recover;

const DEFAULT_TIME_FORMAT: &str = "[hour]:[minute]:[second]";

/// Logger for the `log` crate that writes palette-colored lines.
///
/// # Thread Safety
///
/// The writer is behind a mutex with poison recovery, so concurrent records
/// never interleave within a line.
pub struct AuroraLogger {
    writer: Mutex<Box<dyn Write + Send>>,
    palette: Palette,
    level: LevelFilter,
    show_time: bool,
    show_level: bool,
    show_target: bool,
    colorize: bool,
    time_format: OwnedFormatItem,
}

impl Default for AuroraLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuroraLogger {
    /// Create a logger writing to stderr with the active palette.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Create a logger writing to any writer.
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        let time_format = time::format_description::parse_owned::<2>(DEFAULT_TIME_FORMAT)
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            writer: Mutex::new(Box::new(writer)),
            palette: palette::active().clone(),
            level: LevelFilter::Info,
            show_time: true,
            show_level: true,
            show_target: false,
            colorize: true,
            time_format,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Include the record target (usually the module path).
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Emit ANSI codes; plain text when false.
    #[must_use]
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Use a different palette for level colors.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Override the time format. Invalid descriptions keep the current one.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Returns `SetLoggerError` if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_color(&self, level: Level) -> &Color {
        let name = match level {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => NO_COLOR,
        };
        self.palette.get(name)
    }

    fn paint(&self, chunk: TextChunk) -> String {
        if self.colorize {
            chunk.render()
        } else {
            chunk.text
        }
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time = TextChunk::plain(self.format_time()).with_effect(Effect::Dim);
            line.push_str(&self.paint(time));
            line.push(' ');
        }

        if self.show_level {
            let mut label = TextChunk::new(
                format!("{:<5}", record.level()),
                Some(self.level_color(record.level()).clone()),
            );
            label = match record.level() {
                Level::Error => label.with_effects(EffectSet::BOLD),
                Level::Trace => label.with_effects(EffectSet::DIM),
                _ => label,
            };
            line.push_str(&self.paint(label));
            line.push(' ');
        }

        if self.show_target && !record.target().is_empty() {
            let target = TextChunk::new(
                record.target(),
                Some(self.palette.get("ternary").clone()),
            );
            line.push_str(&self.paint(target));
            line.push(' ');
        }

        line.push_str(&record.args().to_string());
        line
    }

    fn write_line(&self, line: &str) {
        let mut writer = lock_recover(&self.writer);
        // Logging must never fail the caller; write errors are dropped.
        let _ = writeln!(writer, "{line}");
    }
}

impl Log for AuroraLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_record(record);
        self.write_line(&line);
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use super::AuroraLogger;
    use log::Level;
    use std::fmt::Debug;

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level as TracingLevel, Subscriber};
    use tracing_subscriber::{Layer, layer::Context};

    /// Tracing layer that formats events through an `AuroraLogger`.
    pub struct AuroraTracingLayer {
        logger: AuroraLogger,
    }

    impl Default for AuroraTracingLayer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AuroraTracingLayer {
        /// Create a tracing layer backed by a default `AuroraLogger`.
        #[must_use]
        pub fn new() -> Self {
            Self {
                logger: AuroraLogger::new(),
            }
        }

        /// Use an existing logger configuration.
        #[must_use]
        pub fn with_logger(logger: AuroraLogger) -> Self {
            Self { logger }
        }

        /// Install as the global tracing subscriber.
        ///
        /// # Errors
        ///
        /// Returns an error if a global subscriber is already set.
        pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
            use tracing_subscriber::prelude::*;

            let subscriber = tracing_subscriber::registry().with(self);
            tracing::subscriber::set_global_default(subscriber)
        }
    }

    #[derive(Default)]
    struct EventVisitor {
        message: Option<String>,
        fields: Vec<(String, String)>,
    }

    impl EventVisitor {
        fn into_message(self) -> String {
            let mut message = self.message.unwrap_or_default();
            if !self.fields.is_empty() {
                let extra = self
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if message.is_empty() {
                    message = extra;
                } else {
                    message.push(' ');
                    message.push_str(&extra);
                }
            }
            message
        }
    }

    impl Visit for EventVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            let rendered = format!("{value:?}");
            let rendered = strip_quotes(&rendered).to_string();
            if field.name() == "message" {
                self.message = Some(rendered);
            } else {
                self.fields.push((field.name().to_string(), rendered));
            }
        }
    }

    impl<S> Layer<S> for AuroraTracingLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let level = map_tracing_level(*metadata.level());
            if !self.logger.enabled(&log::Metadata::builder().level(level).build()) {
                return;
            }

            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            let message = visitor.into_message();

            let message_ref = message.as_str();
            let args = format_args!("{message_ref}");
            let record = log::Record::builder()
                .args(args)
                .level(level)
                .target(metadata.target())
                .file(metadata.file())
                .line(metadata.line())
                .module_path(metadata.module_path())
                .build();

            let line = self.logger.format_record(&record);
            self.logger.write_line(&line);
        }
    }

    fn map_tracing_level(level: TracingLevel) -> Level {
        match level {
            TracingLevel::TRACE => Level::Trace,
            TracingLevel::DEBUG => Level::Debug,
            TracingLevel::INFO => Level::Info,
            TracingLevel::WARN => Level::Warn,
            TracingLevel::ERROR => Level::Error,
        }
    }

    fn strip_quotes(value: &str) -> &str {
        if value.len() >= 2 && value.starts_with('\"') && value.ends_with('\"') {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::logging::tests::SharedBuffer;
        use tracing_subscriber::prelude::*;

        #[test]
        fn test_strip_quotes() {
            assert_eq!(strip_quotes("\"hello\""), "hello");
            assert_eq!(strip_quotes("plain"), "plain");
            assert_eq!(strip_quotes("\""), "\"");
            assert_eq!(strip_quotes("\"hello"), "\"hello");
        }

        #[test]
        fn test_map_tracing_level() {
            assert_eq!(map_tracing_level(TracingLevel::TRACE), Level::Trace);
            assert_eq!(map_tracing_level(TracingLevel::DEBUG), Level::Debug);
            assert_eq!(map_tracing_level(TracingLevel::INFO), Level::Info);
            assert_eq!(map_tracing_level(TracingLevel::WARN), Level::Warn);
            assert_eq!(map_tracing_level(TracingLevel::ERROR), Level::Error);
        }

        #[test]
        fn test_visitor_message_with_fields() {
            let visitor = EventVisitor {
                message: Some("done".to_string()),
                fields: vec![("rows".to_string(), "3".to_string())],
            };
            assert_eq!(visitor.into_message(), "done rows=3");
        }

        #[test]
        fn test_layer_forwards_events() {
            let buffer = SharedBuffer::default();
            let logger = AuroraLogger::with_writer(buffer.clone())
                .show_time(false)
                .colorize(false);
            let subscriber =
                tracing_subscriber::registry().with(AuroraTracingLayer::with_logger(logger));
            tracing::subscriber::with_default(subscriber, || {
                tracing::warn!(width = 80, "terminal fallback");
                tracing::debug!("filtered out");
            });
            assert_eq!(buffer.contents(), "WARN  terminal fallback width=80\n");
        }
    }
}

#[cfg(feature = "tracing")]
pub use tracing_integration::AuroraTracingLayer;
