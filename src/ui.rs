/// User interface and status output utilities
///
/// This module handles:
/// - Colored terminal text
/// - Status and error message formatting
///
/// Status lines go to stderr so that stdout carries only report output.
use std::io::{self, Write};

/// Print the "boxtab: " prefix for status messages
fn print_status_header() {
    eprint!("boxtab: ");
}

/// Print colored text to stderr, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stderr() else {
            return false;
        };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print a status message with "boxtab: " prefix
pub fn status(s: &str) {
    print_status_header();
    eprintln!("{}", s);
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    print_color("error", term::color::BRIGHT_RED);
    eprintln!(": {}", msg);
}

/// Write report text to stdout
pub fn print_report(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
