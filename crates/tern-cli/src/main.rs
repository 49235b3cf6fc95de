//! tern CLI: `ternc`
//!
//! Parses one source file and prints its AST:
//!
//! ```text
//! ternc [--no-color] [--quiet] <file>
//! ```
//!
//! The first error is printed with the offending source line and the process
//! exits with status 1. The log level is read from `TERN_LOG`.

use clap::Parser;

mod args;
mod commands;

use args::Options;

fn main() {
    let options = Options::parse();

    if let Err(message) = tern_log::init_from_env() {
        eprintln!("warning: {message}");
    }

    commands::parse_file(&options);
}
