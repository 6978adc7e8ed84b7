//! Common test utilities and logging infrastructure
//!
//! Library code logs through the `log` facade; `try_init` bridges those
//! records into the tracing subscriber, so fallback messages show up in
//! failing test output.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=aurora_term::palette=trace` - Module-specific tracing

#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use aurora_term::TextChunk;

static INIT: Once = Once::new();

/// Initialize test logging. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("aurora_term=debug,test=info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_ansi(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// Plain chunks from string slices.
pub fn plain_chunks(texts: &[&str]) -> Vec<TextChunk> {
    texts.iter().map(|text| TextChunk::plain(*text)).collect()
}

/// Plain table rows from string slices.
pub fn plain_rows(rows: &[&[&str]]) -> Vec<Vec<TextChunk>> {
    rows.iter().map(|row| plain_chunks(row)).collect()
}
