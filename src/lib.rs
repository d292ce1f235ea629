pub mod config;
pub mod error;
pub mod loader;
pub mod output;

pub use config::{Config, OutputConfig, OutputFormat};
pub use error::{CliError, CliResult};
pub use loader::CsvDirectory;
pub use output::AstFormat;

use std::io::Write;

use csvql_core::{parser::Parser, tokenize, Executor};

/// Per-invocation switches that are not part of the persistent config.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Dump the parsed clauses before executing
    pub print_ast: bool,
    pub ast_format: AstFormat,
}

/// Run one query end to end: tokenize, parse, load, execute, render.
///
/// Nothing from the result set is written unless execution succeeds. The AST
/// dump, when requested, is written before the table is loaded.
pub fn run_query<W: Write>(
    query: &str,
    config: &Config,
    options: &QueryOptions,
    out: &mut W,
) -> CliResult<()> {
    let tokens = tokenize(query);
    tracing::debug!(tokens = tokens.len(), "query tokenized");

    let clauses = Parser::new(tokens).parse()?;
    tracing::debug!(clauses = clauses.len(), "query parsed");

    if options.print_ast {
        output::render_ast(&clauses, options.ast_format, out)?;
    }

    let executor = Executor::new(CsvDirectory::new(&config.data_dir));
    let result = executor.execute_clauses(&clauses)?;

    output::render(&result, &config.output, out)
}
