use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "boxtab")]
#[command(about = "Render report trees as box-drawn tables and read them back")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a JSON report tree as a table
    Render {
        /// JSON file holding the report tree ("-" reads stdin)
        input: PathBuf,

        /// Store the table under this name instead of printing it
        #[arg(long, value_name = "NAME")]
        name: Option<String>,

        /// Directory for stored tables
        /// Default: ~/.local/share/boxtab/reports (Linux), ~/Library/Application Support/boxtab/reports (macOS)
        #[arg(long, value_name = "DIR", requires = "name")]
        out_dir: Option<PathBuf>,
    },

    /// Parse a table back into a JSON report tree
    Parse {
        /// Table text file ("-" reads stdin)
        input: PathBuf,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Check that a table re-renders to exactly the same text
    Check {
        /// Table text file ("-" reads stdin)
        input: PathBuf,
    },

    /// Report on a built-in sample measurement session
    Demo {
        /// First reading number
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        origin: i64,

        /// Session date as YYYY-MM-DD (default: today)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,

        /// Print the report tree as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Render { name: Some(name), .. } = &self.command
            && (name.is_empty() || name.contains(['/', '\\']))
        {
            return Err(format!("Report name {:?} must be a plain file name", name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_with_name() {
        let args = CliArgs::try_parse_from(["boxtab", "render", "tree.json", "--name", "weekly"]).unwrap();
        match args.command {
            Command::Render { input, name, out_dir } => {
                assert_eq!(input, PathBuf::from("tree.json"));
                assert_eq!(name.as_deref(), Some("weekly"));
                assert!(out_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_out_dir_requires_name() {
        assert!(CliArgs::try_parse_from(["boxtab", "render", "tree.json", "--out-dir", "/tmp"]).is_err());
    }

    #[test]
    fn test_validate_rejects_path_like_name() {
        let args = CliArgs::try_parse_from(["boxtab", "render", "tree.json", "--name", "a/b"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_demo_date_and_origin() {
        let args = CliArgs::try_parse_from(["boxtab", "demo", "--origin", "-3", "--date", "2024-03-01"]).unwrap();
        match &args.command {
            Command::Demo { origin, date, json } => {
                assert_eq!(*origin, -3);
                assert_eq!(*date, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert!(!*json);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_demo_rejects_bad_date() {
        assert!(CliArgs::try_parse_from(["boxtab", "demo", "--date", "March"]).is_err());
    }
}
