//! CLI command implementations

use crate::args::Options;
use std::fs;
use std::process;
use tern_log::{debug, info};
use tern_mem::MemPool;
use tern_syntax::{Emitter, PrettyPrinter, parse_ast};

/// Parses `options.path` and prints its AST to stdout.
///
/// Exits the process with status 1 on the first error.
pub fn parse_file(options: &Options) {
    let source = match fs::read_to_string(&options.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{}': {err}", options.path.display());
            process::exit(1);
        }
    };
    debug!("read {} bytes from '{}'", source.len(), options.path.display());

    let pool = MemPool::new();
    let emitter = Emitter::new(!options.no_color && Emitter::for_stderr().use_colors());

    let ast = match parse_ast(&pool, &source) {
        Ok(ast) => ast,
        Err(err) => emitter.exit_with(&err, &source),
    };

    if !options.quiet {
        let printed = PrettyPrinter::new(&source).print_ast(&ast);
        if !printed.is_empty() {
            println!("{printed}");
        }
    }

    let stats = pool.stats();
    info!(
        "parsed {} function(s) from '{}': {} bytes used, {} committed in {} segment(s)",
        ast.functions.len(),
        options.path.display(),
        stats.used,
        stats.committed,
        stats.segments
    );
}
