//! `growlog` - CLI for growth records
//!
//! This binary provides the command-line interface for saving, editing,
//! and inspecting children's growth measurements.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::Parser;

use growlog::cli::{AddCommand, Cli, Command, ConfigCommand, EditCommand, OutputFormat};
use growlog::metrics::Severity;
use growlog::screen::{Field, RecordCard, Screen, SubmitOutcome};
use growlog::store::KvStore;
use growlog::{init_logging, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, cmd.index),
        Command::List(cmd) => handle_list(&config, cmd.format),
        Command::Chart(cmd) => handle_chart(&config, cmd.format),
        Command::Children(cmd) => handle_children(&config, cmd.format),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the screen over the configured database.
///
/// A failed record load is reported as a warning and the screen opens
/// with an empty list; only a database that cannot be opened at all is
/// fatal.
fn open_screen(config: &Config) -> Result<Screen> {
    let kv = KvStore::open(config.database_path())
        .with_context(|| format!("opening database at {}", config.database_path().display()))?;
    let mut screen = Screen::open(kv);
    report_notice(&mut screen);
    Ok(screen)
}

/// Print any pending notice to stderr without failing the command.
fn report_notice(screen: &mut Screen) {
    if let Some(notice) = screen.dismiss_notice() {
        eprintln!("warning: {notice}");
    }
}

fn handle_add(config: &Config, cmd: &AddCommand) -> Result<()> {
    let mut screen = open_screen(config)?;

    if let Some(roster_index) = cmd.child {
        screen.open_picker();
        if !screen.select_child(roster_index) {
            bail!("no child at roster index {roster_index} (see `growlog children`)");
        }
    } else if let Some(name) = &cmd.name {
        screen.input(Field::Name, name);
    }
    screen.input(Field::Weight, &cmd.weight);
    screen.input(Field::Height, &cmd.height);

    submit_and_print(&mut screen, config.display.color)
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> Result<()> {
    let mut screen = open_screen(config)?;

    screen
        .begin_edit(cmd.index)
        .with_context(|| format!("beginning edit of record {}", cmd.index))?;

    if let Some(name) = &cmd.name {
        screen.input(Field::Name, name);
    }
    if let Some(weight) = &cmd.weight {
        screen.input(Field::Weight, weight);
    }
    if let Some(height) = &cmd.height {
        screen.input(Field::Height, height);
    }

    submit_and_print(&mut screen, config.display.color)
}

fn handle_delete(config: &Config, index: usize) -> Result<()> {
    let mut screen = open_screen(config)?;

    let name = screen.records().get(index).map(|record| record.name.clone());
    if screen.delete(index) {
        match name {
            Some(name) => println!("Deleted [{index}] {name}"),
            None => println!("Deleted record {index}"),
        }
        Ok(())
    } else {
        report_notice(&mut screen);
        bail!("record {index} was not deleted");
    }
}

fn handle_list(config: &Config, format: OutputFormat) -> Result<()> {
    let screen = open_screen(config)?;
    let cards = screen.cards();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Table => print_table(&cards, config.display.color),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No records saved yet.");
            } else {
                for (index, card) in cards.iter().enumerate() {
                    print_card(index, card, config.display.color);
                }
            }
        }
    }
    Ok(())
}

fn handle_chart(config: &Config, format: OutputFormat) -> Result<()> {
    let screen = open_screen(config)?;
    let series = screen.chart();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
        OutputFormat::Table => {
            let label_width = series
                .iter()
                .map(|point| point.label.chars().count())
                .chain(std::iter::once("LABEL".len()))
                .max()
                .unwrap_or(5);
            println!("{:<label_width$}  INDEX", "LABEL");
            for point in &series {
                println!("{:<label_width$}  {:>6.2}", point.label, point.index);
            }
        }
        OutputFormat::Plain => {
            for point in &series {
                println!("{} {:.2}", point.label, point.index);
            }
        }
    }
    Ok(())
}

fn handle_children(config: &Config, format: OutputFormat) -> Result<()> {
    let screen = open_screen(config)?;
    let children = screen.children();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(children)?),
        OutputFormat::Plain | OutputFormat::Table => {
            if children.is_empty() {
                println!("No children registered.");
            } else {
                for (index, child) in children.iter().enumerate() {
                    println!("[{index}] {}", child.responsible_name);
                }
            }
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let screen = open_screen(config)?;
    let stats = screen.stats().context("reading store statistics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let last_saved = stats
            .last_saved
            .map_or_else(|| "never".to_string(), |stamp| stamp.to_rfc3339());
        println!("growlog status");
        println!("--------------");
        println!("Database:      {}", config.database_path().display());
        println!("Records:       {}", stats.records);
        println!("Children:      {}", stats.children);
        println!("Last saved:    {last_saved}");
        println!("Database size: {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Color:         {}", config.display.color);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Submit the form and print the saved record, or fail with the reason.
fn submit_and_print(screen: &mut Screen, color: bool) -> Result<()> {
    match screen.submit() {
        SubmitOutcome::Saved { index } => {
            if let Some(card) = screen.cards().get(index) {
                println!(
                    "Saved [{index}] {}: index {:.2} ({})",
                    card.name,
                    card.index,
                    paint(card.category.label(), card.severity, color)
                );
            }
            Ok(())
        }
        SubmitOutcome::Invalid(missing) => {
            let fields: Vec<&str> = missing.iter().map(Field::label).collect();
            bail!("missing required field(s): {}", fields.join(", "));
        }
        SubmitOutcome::Failed => {
            report_notice(screen);
            bail!("record was not saved");
        }
    }
}

fn print_card(index: usize, card: &RecordCard, color: bool) {
    println!("[{index}] {}", card.name);
    println!("    Weight: {} kg", card.weight_kg);
    println!("    Height: {} m", card.height_m);
    println!(
        "    Index:  {:.2} ({})",
        card.index,
        paint(card.category.label(), card.severity, color)
    );
}

fn print_table(cards: &[RecordCard], color: bool) {
    if cards.is_empty() {
        println!("No records saved yet.");
        return;
    }

    let name_width = cards
        .iter()
        .map(|card| card.name.chars().count())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(4);

    println!(
        "{:>3}  {:<name_width$}  {:>6}  {:>6}  {:>6}  CATEGORY",
        "#", "NAME", "WEIGHT", "HEIGHT", "INDEX"
    );
    for (index, card) in cards.iter().enumerate() {
        println!(
            "{index:>3}  {:<name_width$}  {:>6}  {:>6}  {:>6.2}  {}",
            card.name,
            card.weight_kg,
            card.height_m,
            card.index,
            paint(card.category.label(), card.severity, color)
        );
    }
}

/// Wrap text in the ANSI color for a severity when color is enabled.
fn paint(text: &str, severity: Severity, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let code = match severity {
        Severity::Info => "34",
        Severity::Good => "32",
        Severity::Warning => "33",
        Severity::Critical => "31",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}
