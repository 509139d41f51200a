mod cli;
mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pagemark::{protocol, Document, ExtractOptions, Extractor};
use tracing::{debug, error};

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        error!(error = %format!("{err:#}"), "command failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let html = read_input(cli.file.as_deref())?;
    debug!(bytes = html.len(), "read page");

    let document = Document::parse(&html, cli.url.as_deref()).context("invalid page URL")?;
    let options = ExtractOptions::compact(cli.compact);

    let output = match cli.message.as_deref() {
        Some(message) => protocol::handle(message, Some(&document), &options).to_json()?,
        None => Extractor::with_options(options).extract(&document),
    };

    println!("{output}");
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}
