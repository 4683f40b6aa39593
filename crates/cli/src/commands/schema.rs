//! Loading the schema for a session, and the `--schema` / `--refresh-schema` actions.

use super::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use gql_client::SchemaDocument;
use std::io::Write;

impl Session {
    /// The schema for this invocation.
    ///
    /// Loaded once from the cache, or fetched when there is no cache. With
    /// `force_refresh` it is always fetched and replaces the in-memory copy, so
    /// later actions see the refreshed schema.
    pub(crate) async fn load_schema(
        &mut self,
        force_refresh: bool,
    ) -> Result<&SchemaDocument> {
        if force_refresh || self.schema.is_none() {
            let will_fetch = force_refresh || !self.client.cache().exists();
            if will_fetch && self.config.endpoint().bearer().is_none() {
                eprintln!(
                    "{} {} no bearer token set (--bearer or GQL_BEARER); trying without one",
                    "gql:".bold(),
                    "warning:".yellow().bold()
                );
            }

            let spinner = if will_fetch {
                self.interaction.spinner(&format!(
                    "Fetching schema from {}...",
                    self.config.endpoint().url()
                ))
            } else {
                indicatif::ProgressBar::hidden()
            };
            let result = self.client.get_schema(force_refresh).await;
            spinner.finish_and_clear();

            let schema = result.with_context(|| {
                format!("Failed to load schema from {}", self.config.endpoint().url())
            })?;
            self.schema = Some(schema);
        }

        self.schema.as_ref().context("Schema was not loaded")
    }
}

/// Prints the schema document as pretty JSON.
pub async fn print(session: &mut Session, force_refresh: bool, out: &mut dyn Write) -> Result<()> {
    let schema = session.load_schema(force_refresh).await?;
    let json =
        serde_json::to_string_pretty(schema.as_json()).context("Failed to serialize schema")?;
    writeln!(out, "{json}").context("Failed to write to stdout")
}
