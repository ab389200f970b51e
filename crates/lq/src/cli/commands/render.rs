//! Implementation of `lq render`.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use lq_query::QueryNode;
use tracing::{debug, warn};

use crate::{
    cli::{args::RenderCommand, context::CommandContext},
    document::{DocumentError, build_query, parse_document},
};

/// Renders a query document, or prints its tree with `--explain`.
pub fn run(ctx: &CommandContext, cmd: &RenderCommand) -> ExitCode {
    let contents = match read_source(&cmd.file) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let query = match parse_document(&contents).and_then(|doc| build_query(doc, &ctx.config.query))
    {
        Ok(query) => query,
        Err(e) => {
            eprintln!("error: {e}");
            if let DocumentError::Invalid { source, .. } | DocumentError::Operator(source) = &e
                && let Some(hint) = source.suggestion()
            {
                eprintln!("{hint}");
            }
            return ExitCode::FAILURE;
        }
    };

    debug!(clauses = query.root().len(), "built query");

    if cmd.explain {
        print!("{}", query.explain());
        return ExitCode::SUCCESS;
    }

    if query.is_empty() {
        warn!(file = %cmd.file, "query renders to an empty string");
    }
    println!("{}", query.render());
    ExitCode::SUCCESS
}

/// Reads the document from a file, or from stdin when `source` is `-`.
fn read_source(source: &str) -> Result<String, DocumentError> {
    if source == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| DocumentError::Read {
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
        return Ok(contents);
    }

    let path = PathBuf::from(source);
    fs::read_to_string(&path).map_err(|e| DocumentError::Read { path, source: e })
}
