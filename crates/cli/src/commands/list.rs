//! `--types`, `--queries` and `--mutations`.

use super::Session;
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Types,
    Queries,
    Mutations,
}

/// Prints one name per line, sorted.
pub async fn print(session: &mut Session, listing: Listing, out: &mut dyn Write) -> Result<()> {
    let schema = session.load_schema(false).await?.schema();
    let names = match listing {
        Listing::Types => gql_client::list_types(schema),
        Listing::Queries => gql_client::list_queries(schema),
        Listing::Mutations => gql_client::list_mutations(schema),
    };
    tracing::debug!(?listing, count = names.len(), "Listing names");

    for name in names {
        writeln!(out, "{name}").context("Failed to write to stdout")?;
    }
    Ok(())
}
