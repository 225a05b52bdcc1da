// UI layer: command-line definitions and the dispatch from one parsed
// command to one client operation. Results go to stdout, progress and
// prompts to stderr.

use crate::api::WikiClient;
use crate::config::{HOST_ENV, STRICT_ENV};
use crate::tiddler::{Tiddler, DEFAULT_TYPE};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Command-line client for TiddlyWiki servers
#[derive(Parser, Debug)]
#[command(name = "tw5", version, about)]
pub struct Cli {
    /// Base URL of the wiki server
    #[arg(long, global = true, env = HOST_ENV)]
    pub host: Option<String>,

    /// Treat unexpected HTTP statuses as errors
    #[arg(long, global = true, env = STRICT_ENV)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a tiddler and print it as JSON
    #[command(visible_alias = "g")]
    Get {
        /// Name of the tiddler
        #[arg(short, long)]
        name: String,
    },

    /// List every tiddler
    #[command(visible_alias = "ls")]
    List {
        /// Print the listing as a JSON array instead of titles
        #[arg(long)]
        json: bool,
    },

    /// Put a new tiddler, replacing any tiddler with the same name
    #[command(visible_alias = "p")]
    Put {
        /// Name of the tiddler
        #[arg(short, long)]
        name: String,

        /// Body text
        #[arg(short, long, default_value = "")]
        text: String,

        /// Space-separated tag list
        #[arg(long, default_value = "")]
        tags: String,

        /// Content type of the body
        #[arg(long = "type", default_value = DEFAULT_TYPE)]
        content_type: String,

        /// Extra field as NAME=VALUE (repeatable)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Append text to an existing tiddler
    #[command(visible_alias = "a")]
    Append {
        /// Name of the tiddler
        #[arg(short, long)]
        name: String,

        /// Text to append
        #[arg(short, long)]
        text: String,
    },

    /// Delete a tiddler
    #[command(visible_alias = "d")]
    Delete {
        /// Name of the tiddler
        #[arg(short, long)]
        name: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// The server URL. clap can't mark a global flag as required, so a
    /// missing host is reported here.
    pub fn host(&self) -> Result<&str> {
        self.host
            .as_deref()
            .with_context(|| format!("no server url given: pass --host or set {HOST_ENV}"))
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("field `{raw}` has an empty name")),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}

/// Run one parsed command against the wiki, writing results to `out`.
pub fn run(client: &WikiClient, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Get { name } => {
            let tiddler = with_spinner("Fetching...", || client.fetch(&name))
                .with_context(|| format!("Couldn't get tiddler {name}"))?;
            let json = tiddler.to_json();
            anyhow::ensure!(!json.is_empty(), "Couldn't serialize tiddler {name}");
            writeln!(out, "{json}")?;
        }
        Command::List { json } => {
            let tiddlers = with_spinner("Fetching...", || client.fetch_all())
                .context("Couldn't list tiddlers")?;
            render_listing(&tiddlers, json, out)?;
        }
        Command::Put {
            name,
            text,
            tags,
            content_type,
            fields,
        } => {
            let mut tiddler = Tiddler::new(name)
                .with_text(text)
                .with_tags(tags)
                .with_type(content_type);
            for (field, value) in fields {
                tiddler.add_field(field, value);
            }
            with_spinner("Saving...", || client.create(&tiddler))
                .with_context(|| format!("Couldn't put tiddler {}", tiddler.title))?;
        }
        Command::Append { name, text } => {
            with_spinner("Appending...", || client.append(&name, &text))
                .with_context(|| format!("Couldn't append to tiddler {name}"))?;
        }
        Command::Delete { name, yes } => {
            if !yes && !confirm_delete(&name)? {
                eprintln!("Aborted.");
                return Ok(());
            }
            with_spinner("Deleting...", || client.delete(&name))
                .with_context(|| format!("Couldn't delete tiddler {name}"))?;
        }
    }
    Ok(())
}

fn render_listing(tiddlers: &[Tiddler], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(tiddlers)?)?;
    } else {
        for tiddler in tiddlers {
            writeln!(out, "{}", tiddler.title)?;
        }
    }
    Ok(())
}

fn confirm_delete(name: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete tiddler '{name}'?"))
        .default(false)
        .interact()
        .context("Couldn't read confirmation (pass --yes to skip it)")?;
    Ok(confirmed)
}

/// Show a spinner on stderr while `f` runs. indicatif hides it when
/// stderr is not a terminal.
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}
