//! `--query <FILE> --input <JSON>`: send a stored query after confirmation.

use super::Session;
use crate::interact::Interaction;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use gql_client::{Endpoint, HttpTransport, RawResponse};
use std::fmt;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// What the user is shown before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPreview {
    pub endpoint: String,
    pub bearer: String,
    pub query: String,
    pub variables: String,
}

impl RequestPreview {
    fn new(endpoint: &Endpoint, query: &str, variables: &serde_json::Value) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.url().to_string(),
            bearer: mask_bearer(endpoint.bearer()),
            query: query.to_string(),
            variables: serde_json::to_string_pretty(variables)
                .context("Failed to serialize variables")?,
        })
    }
}

impl fmt::Display for RequestPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Endpoint: {}", self.endpoint)?;
        writeln!(f, "Bearer: {}", self.bearer)?;
        writeln!(f, "Query:")?;
        writeln!(f, "{}", self.query.trim_end())?;
        writeln!(f, "Variables:")?;
        write!(f, "{}", self.variables)
    }
}

/// Result of [`send_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Sent(RawResponse),
    Cancelled,
}

/// Parses `--input`. Variables must be a JSON object.
pub fn parse_variables(input: &str) -> Result<serde_json::Value, String> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| format!("invalid JSON: {e}"))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("variables must be a JSON object".to_string())
    }
}

/// Shows only the end of a token, or that there is none.
fn mask_bearer(token: Option<&str>) -> String {
    match token {
        None => "(none)".to_string(),
        Some(token) if token.chars().count() <= 8 => "****".to_string(),
        Some(token) => {
            let tail: String = token.chars().skip(token.chars().count() - 4).collect();
            format!("****{tail}")
        }
    }
}

/// Resolves `file` inside `queries_dir`. Absolute paths and `..` are refused.
fn query_path(queries_dir: &Path, file: &str) -> Result<PathBuf> {
    let relative = Path::new(file);
    let inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if file.trim().is_empty() || !inside {
        bail!(
            "Query file must be relative to {}: {file}",
            queries_dir.display()
        );
    }
    Ok(queries_dir.join(relative))
}

/// Loads `<queries_dir>/<file>`, previews it and sends it once confirmed.
///
/// `assume_yes` skips the question but not the preview.
pub async fn send_request(
    queries_dir: &Path,
    file: &str,
    variables: &serde_json::Value,
    transport: &HttpTransport,
    interaction: &dyn Interaction,
    assume_yes: bool,
) -> Result<RequestOutcome> {
    let path = query_path(queries_dir, file)?;
    if !path.is_file() {
        bail!("Query file not found: {}", path.display());
    }
    let query = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;

    let preview = RequestPreview::new(transport.endpoint(), &query, variables)?;
    interaction.show_preview(&preview);

    if !assume_yes && !interaction.confirm("Send this request?")? {
        tracing::info!(file, "Request cancelled");
        return Ok(RequestOutcome::Cancelled);
    }

    let body = serde_json::json!({
        "query": query,
        "variables": variables,
    });
    let response = transport
        .post(&body)
        .await
        .with_context(|| format!("Failed to send request to {}", transport.endpoint().url()))?;
    Ok(RequestOutcome::Sent(response))
}

/// Runs the request action and prints the response as pretty JSON.
pub async fn print(
    session: &Session,
    file: &str,
    variables: &serde_json::Value,
    out: &mut dyn Write,
) -> Result<()> {
    let outcome = send_request(
        &session.config.queries_dir(),
        file,
        variables,
        session.client.transport(),
        session.interaction.as_ref(),
        session.assume_yes,
    )
    .await?;

    let response = match outcome {
        RequestOutcome::Sent(response) => response,
        RequestOutcome::Cancelled => {
            eprintln!("{} Request cancelled", "gql:".bold());
            return Ok(());
        }
    };

    if !response.is_success() {
        tracing::warn!(status = response.status, "Endpoint returned an error status");
        eprintln!(
            "{} {} endpoint answered with HTTP {}",
            "gql:".bold(),
            "warning:".yellow().bold(),
            response.status
        );
    }

    // GraphQL errors are part of the body and are printed like any other data.
    let output = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or(response.body);
    writeln!(out, "{output}").context("Failed to write to stdout")
}
