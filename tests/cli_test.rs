//! Tests for the `aurora` binary.
#![cfg(feature = "cli")]

use assert_cmd::Command;
use aurora_term::color::Color;
use predicates::prelude::*;

fn aurora() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aurora"));
    cmd.env("COLUMNS", "40");
    cmd
}

#[test]
fn colored_text() {
    aurora()
        .args(["--text", "Hi", "--color", "#FF0000"])
        .assert()
        .success()
        .stdout("\x1b[38;2;255;0;0mHi\x1b[0m\n");
}

#[test]
fn effects_and_palette_names() {
    aurora()
        .args(["--text", "Done", "--color", "success", "--bold", "--tabs", "0"])
        .assert()
        .success()
        .stdout("\x1b[38;2;60;210;120m\x1b[1mDone\x1b[0m\x1b[0m\n");
}

#[test]
fn strip_removes_every_escape() {
    aurora()
        .args(["--text", "plain", "--color", "error", "--underline", "--strip", "--tabs", "0"])
        .assert()
        .success()
        .stdout("plain\n");
}

#[test]
fn right_alignment_uses_columns() {
    aurora()
        .args(["--text", "end", "--align", "right", "--strip"])
        .assert()
        .success()
        .stdout(format!("{}end\n", " ".repeat(37)));
}

#[test]
fn explicit_width_beats_columns() {
    aurora()
        .args(["--text", "ab", "--align", "center", "--width", "6"])
        .assert()
        .success()
        .stdout("  ab  \n");
}

#[test]
fn table_output() {
    aurora()
        .args([
            "--table", "--headers", "Name,Age", "--row", "Alice,30", "--row", "Bob,4", "--strip",
        ])
        .assert()
        .success()
        .stdout("Name   Age\nAlice  30 \nBob    4  \n");
}

#[test]
fn raw_positions() {
    aurora()
        .args(["--raw", "--text", "A", "--pos-x", "3", "--pos-y", "2"])
        .assert()
        .success()
        .stdout("\x1b[2;3HA\n");
}

#[test]
fn add_line_wraps_output() {
    aurora()
        .args(["--text", "x", "--add-line", "both"])
        .assert()
        .success()
        .stdout("\nx\n\n");
}

#[test]
fn gradient_keeps_visible_text() {
    aurora()
        .args(["--text", "abc", "--gradient", "--color", "#FF0000", "--color", "#0000FF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[38;2;128;0;128mb"));
}

#[test]
fn lighten_adjusts_the_color() {
    let expected = Color::from_hex("#336699").lighten(2).to_ansi_fg();
    aurora()
        .args(["--text", "Hi", "--color", "#336699", "--lighten", "2"])
        .assert()
        .success()
        .stdout(format!("{expected}Hi\x1b[0m\n"));
}

#[test]
fn darken_adjusts_the_color() {
    let expected = Color::from_hex("#336699").darken(2).to_ansi_fg();
    aurora()
        .args(["--text", "Hi", "--color", "#336699", "--darken", "2"])
        .assert()
        .success()
        .stdout(format!("{expected}Hi\x1b[0m\n"));
}

#[test]
fn inverted_prefixes_reverse_video() {
    aurora()
        .args(["--text", "Hi", "--color", "#336699", "--inverted"])
        .assert()
        .success()
        .stdout("\x1b[7m\x1b[38;2;51;102;153mHi\x1b[0m\n");
}

#[test]
fn background_paints_behind_the_text() {
    aurora()
        .args(["--text", "Hi", "--color", "#336699", "--background"])
        .assert()
        .success()
        .stdout("\x1b[48;2;51;102;153mHi\x1b[0m\n");
}

#[test]
fn huge_tabs_are_clamped() {
    aurora()
        .args(["--text", "x", "--strip", "--tabs", "4611686018427387904"])
        .assert()
        .success()
        .stdout(format!("{}x\n", " ".repeat(65_535 * 4)));
}

#[test]
fn gradient_applies_effects_per_grapheme() {
    aurora()
        .args(["--text", "ab", "--gradient", "--color", "#FF0000", "--color", "#0000FF", "--bold"])
        .assert()
        .success()
        .stdout(
            "\x1b[38;2;255;0;0m\x1b[1ma\x1b[0m\x1b[0m\x1b[38;2;0;0;255m\x1b[1mb\x1b[0m\x1b[0m\n",
        );
}

#[test]
fn gradient_honors_inversion_and_lightness() {
    let red = Color::from_hex("#FF0000").darken(1).to_ansi_fg();
    aurora()
        .args([
            "--text", "ab", "--gradient", "--color", "#FF0000", "--color", "#0000FF", "--inverted",
            "--darken", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("\x1b[7m{red}a\x1b[0m")));
}

#[test]
fn no_input_prints_help() {
    aurora()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_arguments_print_help_and_exit_zero() {
    aurora()
        .args(["--align", "diagonal", "--text", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag() {
    aurora()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn json_is_highlighted() {
    aurora()
        .args(["--json", r#"{"a":1}"#, "--strip"])
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");
}

#[test]
fn invalid_json_reports_and_exits_zero() {
    aurora()
        .args(["--json", "{not json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("aurora:"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn missing_palette_falls_back_to_builtin() {
    aurora()
        .args(["--palette", "/nonexistent/palette.ini", "--text", "ok", "--strip"])
        .assert()
        .success()
        .stdout("ok\n")
        .stderr(predicate::str::contains("built-in palette"));
}

#[test]
fn verbose_log_uses_the_loaded_palette() {
    let path = std::env::temp_dir().join(format!("aurora_cli_palette_{}.ini", std::process::id()));
    std::fs::write(&path, "[colors]\ndebug = #010203\n").unwrap();

    let assert = aurora()
        .arg("--palette")
        .arg(&path)
        .args(["-v", "--text", "x", "--color", "nosuchcolor", "--strip"])
        .assert();
    std::fs::remove_file(&path).ok();

    assert
        .success()
        .stdout("x\n")
        .stderr(predicate::str::contains("\x1b[38;2;1;2;3mDEBUG"));
}
