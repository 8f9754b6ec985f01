use clap::error::ErrorKind;
use clap::Parser;
use directories::ProjectDirs;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use widgets::api::{configure, ConfigAction, WidgetsApi};
use widgets::config::{WidgetsConfig, CONFIG_KEYS};
use widgets::error::{Result, WidgetsError};
use widgets::refs::RefTable;
use widgets::store::memory::InMemoryStore;

mod args;
mod print;
use args::{Cli, Commands, OutputFormat, SessionCommand, SessionLine};

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("WIDGETS_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("widgets=debug")
        } else {
            EnvFilter::new("widgets=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether every step succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config_dir = resolve_config_dir(cli.config_dir);

    match cli.command {
        Commands::Run { script } => handle_run(config_dir.as_deref(), script, cli.format),
        Commands::Config { key, value } => handle_config(config_dir.as_deref(), key, value),
    }
}

fn resolve_config_dir(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os("WIDGETS_HOME").map(PathBuf::from))
        .or_else(|| {
            ProjectDirs::from("com", "widgets", "widgets").map(|d| d.config_dir().to_path_buf())
        })
}

fn handle_config(dir: Option<&Path>, key: Option<String>, value: Option<String>) -> Result<bool> {
    let dir = dir.ok_or_else(|| {
        WidgetsError::Io(io::Error::other("could not determine a config directory"))
    })?;
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = configure(dir, action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print::print_messages(&result.messages, OutputFormat::Text);

    let failed = result
        .messages
        .iter()
        .any(|m| m.level == widgets::api::MessageLevel::Error);
    Ok(!failed)
}

fn handle_run(dir: Option<&Path>, script: Option<PathBuf>, format: OutputFormat) -> Result<bool> {
    let config = match dir {
        Some(dir) => WidgetsConfig::load(dir)?,
        None => WidgetsConfig::default(),
    };
    debug!(?config, "loaded config");

    let reader: Box<dyn BufRead> = match script {
        Some(path) if path != Path::new("-") => Box::new(BufReader::new(File::open(&path)?)),
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = Session::new(WidgetsApi::new(InMemoryStore::new(), config), format);
    let mut failures = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Err(e) = session.execute(trimmed) {
            print::print_failure(index + 1, trimmed, &e);
            failures += 1;
        }
    }

    info!(failures, "session finished");
    Ok(failures == 0)
}

/// A script run: one store, plus the `@N` names of the widgets created so far.
struct Session {
    api: WidgetsApi<InMemoryStore>,
    refs: RefTable,
    format: OutputFormat,
}

impl Session {
    fn new(api: WidgetsApi<InMemoryStore>, format: OutputFormat) -> Self {
        Self {
            api,
            refs: RefTable::new(),
            format,
        }
    }

    fn execute(&mut self, line: &str) -> Result<()> {
        let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                println!("{}", e);
                return Ok(());
            }
            Err(e) => {
                let summary = e.to_string();
                let first = summary.lines().next().unwrap_or_default();
                let first = first.strip_prefix("error: ").unwrap_or(first);
                return Err(WidgetsError::InvalidArgument(first.to_string()));
            }
        };

        match parsed.command {
            SessionCommand::Create(fields) => {
                let result = self.api.create_widget(&fields.to_change_set())?;
                for widget in &result.affected_widgets {
                    self.refs.record(widget.id);
                    print::print_widget(widget, &self.refs, self.format)?;
                }
                print::print_messages(&result.messages, self.format);
            }
            SessionCommand::Get { widget } => {
                let id = self.refs.resolve(&widget)?;
                let result = self.api.get_widget(&id)?;
                for widget in &result.listed_widgets {
                    print::print_widget(widget, &self.refs, self.format)?;
                }
            }
            SessionCommand::List { limit, offset } => {
                let result = self.api.list_widgets(limit, offset)?;
                print::print_widget_list(&result.listed_widgets, &self.refs, self.format)?;
                print::print_messages(&result.messages, self.format);
            }
            SessionCommand::Update { widget, fields } => {
                let id = self.refs.resolve(&widget)?;
                let result = self.api.update_widget(&id, &fields.to_change_set())?;
                for widget in &result.affected_widgets {
                    print::print_widget(widget, &self.refs, self.format)?;
                }
                print::print_messages(&result.messages, self.format);
            }
            SessionCommand::Delete { widget } => {
                let id = self.refs.resolve(&widget)?;
                let result = self.api.delete_widget(&id)?;
                print::print_messages(&result.messages, self.format);
            }
            SessionCommand::Clear => {
                let result = self.api.clear_widgets()?;
                print::print_messages(&result.messages, self.format);
            }
        }
        Ok(())
    }
}
