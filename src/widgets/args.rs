use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use widgets::model::WidgetChangeSet;
use widgets::refs::WidgetRef;

#[derive(Parser, Debug)]
#[command(name = "widgets", version)]
#[command(about = "Keep stacked widgets in a unique z-order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json (defaults to $WIDGETS_HOME, then the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a session script against a fresh in-memory store
    #[command(alias = "r")]
    Run {
        /// Script file, one command per line (stdin when omitted or "-")
        script: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., max-page-limit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// One line of a session script.
#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Create a widget (x, height and width are required)
    #[command(alias = "n")]
    Create(WidgetFields),

    /// Show one widget
    #[command(alias = "v")]
    Get {
        /// Widget reference (@N or a UUID)
        widget: WidgetRef,
    },

    /// List widgets by ascending z
    #[command(alias = "ls")]
    List {
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,
    },

    /// Change some fields of a widget
    #[command(alias = "e")]
    Update {
        /// Widget reference (@N or a UUID)
        widget: WidgetRef,

        #[command(flatten)]
        fields: WidgetFields,
    },

    /// Delete a widget
    #[command(alias = "rm")]
    Delete {
        /// Widget reference (@N or a UUID)
        widget: WidgetRef,
    },

    /// Delete every widget
    Clear,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WidgetFields {
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Stacking index (omit on create to place on top)
    #[arg(long, allow_negative_numbers = true)]
    pub z: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,
}

impl WidgetFields {
    pub fn to_change_set(&self) -> WidgetChangeSet {
        WidgetChangeSet {
            x: self.x,
            y: self.y,
            z: self.z,
            height: self.height,
            width: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SessionCommand {
        SessionLine::try_parse_from(line.split_whitespace())
            .unwrap()
            .command
    }

    #[test]
    fn parses_create_with_negative_values() {
        match parse("create --x -5 --z -10 --height 2 --width 3") {
            SessionCommand::Create(fields) => {
                let change_set = fields.to_change_set();
                assert_eq!(change_set.x, Some(-5));
                assert_eq!(change_set.z, Some(-10));
                assert_eq!(change_set.y, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_update_with_ref() {
        match parse("update @2 --width 9") {
            SessionCommand::Update { widget, fields } => {
                assert_eq!(widget, WidgetRef::Ordinal(2));
                assert_eq!(fields.width, Some(9));
                assert!(fields.x.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_list_aliases() {
        assert!(matches!(
            parse("ls --limit 1 --offset 2"),
            SessionCommand::List {
                limit: Some(1),
                offset: Some(2)
            }
        ));
    }

    #[test]
    fn rejects_bad_refs() {
        assert!(SessionLine::try_parse_from(["get", "@zero"]).is_err());
    }

    #[test]
    fn top_level_cli() {
        let cli =
            Cli::try_parse_from(["widgets", "--format", "json", "run", "script.txt"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Run { script: Some(_) }));
    }
}
