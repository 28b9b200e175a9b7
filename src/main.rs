// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod ui;

use boxtab::demo::{SessionNode, sample_session, session_queries};
use boxtab::error::{Error, Result};
use boxtab::{Column, format, parse, read_report, report, store, write_report};
use cli::{CliArgs, Command};
use log::debug;
use std::io::{self, Read};
use std::path::Path;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Execute one subcommand and return the process exit code
fn run(args: CliArgs) -> Result<i32> {
    match args.command {
        Command::Render { input, name, out_dir } => {
            let tree: Column = serde_json::from_str(&read_input(&input)?)?;
            let text = format(&tree)?;
            match name {
                Some(name) => {
                    let dir = out_dir.unwrap_or_else(store::default_report_dir);
                    let path = write_report(&text, &dir, &name)?;
                    ui::status(&format!("Wrote report to {}", path.display()));
                }
                None => ui::print_report(&text)?,
            }
            Ok(0)
        }

        Command::Parse { input, compact } => {
            let tree = parse(&read_input(&input)?)?;
            let json = if compact { serde_json::to_string(&tree)? } else { serde_json::to_string_pretty(&tree)? };
            ui::print_report(&format!("{}\n", json))?;
            Ok(0)
        }

        Command::Check { input } => {
            let text = read_input(&input)?;
            let rendered = format(&parse(&text)?)?;
            if rendered == text {
                ui::status("Report text is canonical");
                Ok(0)
            } else {
                debug!("Canonical form:\n{}", rendered);
                ui::print_error("Report parses, but re-renders differently (run with RUST_LOG=debug to see the canonical form)");
                Ok(1)
            }
        }

        Command::Demo { origin, date, json } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let source = SessionNode::new(sample_session(date));
            let tree = report(&source, &session_queries(origin))?;
            let output = if json { format!("{}\n", serde_json::to_string_pretty(&tree)?) } else { format(&tree)? };
            ui::print_report(&output)?;
            Ok(0)
        }
    }
}

/// Read a file, or stdin for "-"
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    read_report(path).map_err(Error::from)
}
