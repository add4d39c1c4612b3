use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use dict_core::config::Config;
use dict_core::host::env::LaunchArgs;
use dict_core::host::render::{strip_sense_prefix, truncate_to_width, CHAR_WIDTH_PX};
use dict_core::{logging, Definition, DictionaryEngine};
use std::io::{stdin, stdout, Write};
use tracing::warn;

fn main() -> Result<()> {
    let args = LaunchArgs::parse();
    let support_dir = args.support_dir();
    let (mut config, config_error) = Config::load_or_default(&support_dir);
    logging::init(Some(&support_dir), config.debug || args.debug_log);
    if let Some(e) = config_error {
        warn!(error = %e, "using default config");
        eprintln!("{} {e}", "config ignored:".yellow());
    }

    let engine = DictionaryEngine::from_config(&config, &support_dir, &args.cache_dir())
        .context("could not load the dictionary")?;

    println!("{}", "Live Dictionary".bold());
    println!("Type a word to look it up. ':limit N' changes the result count, 'exit' quits.");

    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "exit" | ":q" => break,
            "" => {}
            cmd if cmd.starts_with(":limit") => match cmd[":limit".len()..].trim().parse::<usize>() {
                Ok(n) => {
                    config.limit = n;
                    println!("limit set to {n}");
                }
                Err(_) => println!("{}", "usage: :limit N".red()),
            },
            query => print_results(query, &engine.lookup(query, config.limit)),
        }
    }
    Ok(())
}

fn print_results(query: &str, definitions: &[Definition]) {
    if definitions.is_empty() {
        println!("{} {}", "no definition for".dark_grey(), query.bold());
        return;
    }

    let columns = crossterm::terminal::size().map(|(cols, _)| cols).unwrap_or(80);
    for (i, definition) in definitions.iter().enumerate() {
        let width = f64::from(summary_columns(columns, &definition.headword)) * CHAR_WIDTH_PX;
        let summary = truncate_to_width(strip_sense_prefix(&definition.text), width);
        let headword = if i == 0 && definition.headword == query {
            definition.headword.as_str().bold().green()
        } else {
            definition.headword.as_str().bold().cyan()
        };
        println!("{:>2}. {} {}", i + 1, headword, summary);
    }
}

/// Terminal columns left for the summary after the number and `headword`.
fn summary_columns(columns: u16, headword: &str) -> u16 {
    let headword_columns = u16::try_from(headword.chars().count()).unwrap_or(u16::MAX);
    columns.saturating_sub(headword_columns).saturating_sub(6)
}
