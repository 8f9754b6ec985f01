use crate::args::OutputFormat;
use colored::*;
use widgets::api::{CmdMessage, MessageLevel};
use widgets::error::{Result, WidgetsError};
use widgets::model::Widget;
use widgets::refs::RefTable;

pub fn print_messages(messages: &[CmdMessage], format: OutputFormat) {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        // Keep stdout parseable in JSON mode.
        match format {
            OutputFormat::Text => println!("{}", line),
            OutputFormat::Json => eprintln!("{}", line),
        }
    }
}

pub fn print_widget(widget: &Widget, refs: &RefTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", widget_line(widget, refs)),
        OutputFormat::Json => println!("{}", serde_json::to_string(widget)?),
    }
    Ok(())
}

pub fn print_widget_list(widgets: &[Widget], refs: &RefTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if widgets.is_empty() {
                println!("No widgets found.");
            }
            for widget in widgets {
                println!("{}", widget_line(widget, refs));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(widgets)?),
    }
    Ok(())
}

pub fn print_failure(line_number: usize, line: &str, error: &WidgetsError) {
    eprintln!(
        "{} {}: {}",
        format!("line {}:", line_number).bold(),
        error.outcome().to_string().red(),
        error
    );
    eprintln!("    {}", line.dimmed());
}

fn widget_line(widget: &Widget, refs: &RefTable) -> String {
    let reference = refs
        .ordinal_of(&widget.id)
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<5} z={:<6} at ({}, {})  {}x{}  {}  {}",
        reference.yellow(),
        widget.z,
        widget.x,
        widget.y,
        widget.width,
        widget.height,
        widget.id.to_string().dimmed(),
        widget.last_modification_date.to_rfc3339().dimmed()
    )
}
