//! prompt: renders a colorized bash prompt from values passed as flags.
//!
//! The shell computes every value (exit status, branch, job counts, ...) and
//! passes them on each redraw; this program only formats them.

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, Write};
use std::process::ExitCode;

mod args;
mod buffer;
mod cli;
mod colorscheme;
mod prompt;
mod signal;

use crate::colorscheme::Scheme;
use crate::prompt::Render;

/// Main entry point.
///
/// Initializes logging, renders the prompt from the arguments and prints it
/// to stdout. Usage errors go to stderr and exit with status 1.
fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("prompt: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    debug!("rendering from {} arguments", args.len());

    match prompt::render(&args, Scheme::default(), &signal::Platform) {
        Ok(Render::Prompt(prompt)) => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(prompt.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write prompt")?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(Render::Help) => {
            print!("{}", cli::usage());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!("scan failed: {e:?}");
            eprintln!("{e}");
            eprint!("{}", cli::usage());
            Ok(ExitCode::FAILURE)
        }
    }
}
