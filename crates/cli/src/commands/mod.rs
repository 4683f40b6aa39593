//! Actions the CLI can run, and the session they share.
//!
//! The command line is turned into an ordered list of [`Action`]s which [`run`]
//! executes one after another against a single [`Session`].

pub mod docs;
pub mod list;
pub mod request;
pub mod schema;

use crate::config::Config;
use crate::interact::Interaction;
use anyhow::{Context, Result};
use gql_client::{HttpTransport, IntrospectionClient, SchemaCache, SchemaDocument};
use std::io::Write;

/// One requested action, in command-line order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print the schema, from the cache when possible
    Schema,
    /// Fetch the schema again, cache it and print it
    RefreshSchema,
    /// Print type, query or mutation names
    List(list::Listing),
    /// Print Markdown documentation
    Docs(docs::DocsLookup),
    /// Send a stored query with variables
    Request {
        file: String,
        variables: serde_json::Value,
    },
}

/// How a run ended when no action failed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// At least one documentation lookup found nothing
    NotFound,
}

/// State shared by the actions of one invocation.
pub struct Session {
    config: Config,
    client: IntrospectionClient,
    interaction: Box<dyn Interaction>,
    assume_yes: bool,
    schema: Option<SchemaDocument>,
}

impl Session {
    pub fn new(
        config: Config,
        interaction: Box<dyn Interaction>,
        assume_yes: bool,
    ) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint().clone())
            .context("Failed to set up the HTTP client")?;
        let client = IntrospectionClient::new(transport, SchemaCache::in_dir(config.home()));
        Ok(Self {
            config,
            client,
            interaction,
            assume_yes,
            schema: None,
        })
    }
}

/// Runs every action in order, stopping at the first hard failure.
///
/// A documentation miss is not a hard failure: its "not found" document is
/// printed, the remaining actions still run, and the result is
/// [`Status::NotFound`].
pub async fn run(session: &mut Session, actions: &[Action], out: &mut dyn Write) -> Result<Status> {
    let mut status = Status::Success;

    for action in actions {
        tracing::debug!(?action, "Running action");
        match action {
            Action::Schema => schema::print(session, false, out).await?,
            Action::RefreshSchema => schema::print(session, true, out).await?,
            Action::List(listing) => list::print(session, *listing, out).await?,
            Action::Docs(lookup) => {
                if docs::print(session, lookup, out).await? == Status::NotFound {
                    status = Status::NotFound;
                }
            }
            Action::Request { file, variables } => {
                request::print(session, file, variables, out).await?;
            }
        }
    }

    out.flush().context("Failed to write to stdout")?;
    Ok(status)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::interact::testing::Scripted;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// A cached schema with one query, one mutation and one object type.
    pub(crate) fn sample_schema() -> serde_json::Value {
        json!({
            "data": { "__schema": {
                "queryType": { "name": "Query", "fields": [
                    { "name": "ping", "description": null, "args": [],
                      "type": { "name": "String" } }
                ] },
                "mutationType": { "name": "Mutation", "fields": [
                    { "name": "login", "description": "Start a session", "args": [],
                      "type": { "kind": "OBJECT", "name": "Session", "ofType": null } }
                ] },
                "types": [
                    { "kind": "OBJECT", "name": "Session", "description": null, "fields": [
                        { "name": "token", "description": null, "args": [],
                          "type": { "kind": "SCALAR", "name": "String", "ofType": null } }
                    ], "interfaces": [] },
                    { "kind": "SCALAR", "name": "String", "description": null },
                    { "kind": "OBJECT", "name": "__Type", "description": null, "fields": [] }
                ]
            } }
        })
    }

    pub(crate) fn write_cached_schema(home: &Path) {
        std::fs::write(
            home.join(gql_client::SCHEMA_FILE),
            serde_json::to_string_pretty(&sample_schema()).unwrap(),
        )
        .unwrap();
    }

    pub(crate) fn session(server: &MockServer, home: &TempDir, interaction: Scripted) -> Session {
        let config = Config::resolve(
            Some(home.path().to_path_buf()),
            Some(server.uri()),
            Some("secret-token".to_string()),
        )
        .unwrap();
        Session::new(config, Box::new(interaction), false).unwrap()
    }

    async fn run_to_string(session: &mut Session, actions: &[Action]) -> (Status, String) {
        let mut out = Vec::new();
        let status = run(session, actions, &mut out).await.unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_queries_listing_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let home = tempfile::tempdir().unwrap();
        write_cached_schema(home.path());
        let mut session = session(&server, &home, Scripted::declining());

        let (status, out) =
            run_to_string(&mut session, &[Action::List(list::Listing::Queries)]).await;

        assert_eq!(status, Status::Success);
        assert_eq!(out, "ping\n");
    }

    #[tokio::test]
    async fn test_type_docs_not_found_still_prints() {
        let server = MockServer::start().await;
        let home = tempfile::tempdir().unwrap();
        write_cached_schema(home.path());
        let mut session = session(&server, &home, Scripted::declining());

        let (status, out) = run_to_string(
            &mut session,
            &[
                Action::Docs(docs::DocsLookup::Type("Widget".into())),
                Action::List(list::Listing::Types),
            ],
        )
        .await;

        assert_eq!(status, Status::NotFound);
        assert!(out.contains("_Not found_"));
        assert!(out.ends_with("Session\nString\n"));
    }

    #[tokio::test]
    async fn test_actions_share_one_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_schema()))
            .expect(1)
            .mount(&server)
            .await;
        let home = tempfile::tempdir().unwrap();
        let mut session = session(&server, &home, Scripted::declining());

        let (status, out) = run_to_string(
            &mut session,
            &[
                Action::List(list::Listing::Mutations),
                Action::Docs(docs::DocsLookup::Any("login".into())),
            ],
        )
        .await;

        assert_eq!(status, Status::Success);
        assert!(out.starts_with("login\n# Mutation: login\n"));
        assert!(home.path().join(gql_client::SCHEMA_FILE).is_file());
    }

    #[tokio::test]
    async fn test_declined_request_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(home.path().join("queries")).unwrap();
        std::fs::write(home.path().join("queries/login.gql"), "mutation Login {...}").unwrap();
        let mut session = session(&server, &home, Scripted::declining());

        let (status, out) = run_to_string(
            &mut session,
            &[Action::Request {
                file: "login.gql".into(),
                variables: json!({ "input": { "user": "a", "password": "b" } }),
            }],
        )
        .await;

        assert_eq!(status, Status::Success);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_hard_failure_stops_the_run() {
        let server = MockServer::start().await;
        let home = tempfile::tempdir().unwrap();
        write_cached_schema(home.path());
        let mut session = session(&server, &home, Scripted::accepting());

        let mut out = Vec::new();
        let result = run(
            &mut session,
            &[
                Action::Request {
                    file: "missing.gql".into(),
                    variables: json!({}),
                },
                Action::List(list::Listing::Types),
            ],
            &mut out,
        )
        .await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
