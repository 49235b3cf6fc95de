//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Parse a tern source file and print its AST.
///
/// The log level is read from `TERN_LOG` (error, warn, info, debug, trace).
#[derive(Debug, Parser)]
#[command(name = "ternc")]
#[command(version)]
pub struct Options {
    /// Source file to parse
    pub path: PathBuf,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Parse only; do not print the AST
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("ternc").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_file_only() {
        let options = parse(&["main.tn"]).unwrap();
        assert_eq!(options.path, PathBuf::from("main.tn"));
        assert!(!options.no_color);
        assert!(!options.quiet);
    }

    #[test]
    fn test_parse_flags_in_any_position() {
        let options = parse(&["--quiet", "main.tn", "--no-color"]).unwrap();
        assert!(options.no_color);
        assert!(options.quiet);

        assert!(parse(&["-q", "main.tn"]).unwrap().quiet);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["--verbose", "main.tn"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = parse(&["a.tn", "b.tn"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_parse_help() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
