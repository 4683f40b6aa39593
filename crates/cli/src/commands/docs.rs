//! `--docs`, `--type-docs`, `--query-docs` and `--mutation-docs`.

use super::{Session, Status};
use anyhow::{Context, Result};
use gql_client::{NotFound, Schema};
use std::io::Write;

/// Which documentation to look up, and for what name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsLookup {
    /// Type, then query, then mutation
    Any(String),
    Type(String),
    Query(String),
    Mutation(String),
}

impl DocsLookup {
    fn render(&self, schema: &Schema) -> Result<String, NotFound> {
        match self {
            Self::Any(term) => gql_client::get_docs(term, schema),
            Self::Type(name) => gql_client::render_type(name, schema),
            Self::Query(name) => gql_client::render_query(name, schema),
            Self::Mutation(name) => gql_client::render_mutation(name, schema),
        }
    }
}

/// Prints the documentation, or the "not found" document on a miss.
pub async fn print(session: &mut Session, lookup: &DocsLookup, out: &mut dyn Write) -> Result<Status> {
    let rendered = lookup.render(session.load_schema(false).await?.schema());

    let (markdown, status) = match rendered {
        Ok(markdown) => (markdown, Status::Success),
        Err(not_found) => {
            tracing::warn!(%not_found, "Documentation lookup failed");
            (not_found.to_markdown(), Status::NotFound)
        }
    };

    let output = session.interaction.render_markdown(&markdown);
    out.write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(status)
}
