//! Client side of the `gql` tool: talks to one GraphQL endpoint, caches its
//! introspected schema and renders Markdown documentation from it.
//!
//! # Examples
//!
//! ## Fetch the schema and list its queries
//!
//! ```no_run
//! use gql_client::{list_queries, Endpoint, HttpTransport, IntrospectionClient, SchemaCache};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::new("api.example.com/graphql", Some("my-token".into()));
//!     let client = IntrospectionClient::new(
//!         HttpTransport::new(endpoint)?,
//!         SchemaCache::in_dir(Path::new("/home/me/.config/graphql")),
//!     );
//!
//!     let schema = client.get_schema(false).await?;
//!     for name in list_queries(schema.schema()) {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Render documentation for whatever a name refers to
//!
//! ```
//! use gql_client::{get_docs, Schema};
//!
//! let schema: Schema = serde_json::from_str(
//!     r#"{"queryType": null, "mutationType": null, "types": []}"#,
//! ).unwrap();
//!
//! match get_docs("Widget", &schema) {
//!     Ok(markdown) => println!("{markdown}"),
//!     Err(not_found) => println!("{}", not_found.to_markdown()),
//! }
//! ```

mod cache;
mod client;
mod docs;
mod error;
mod lookup;
mod query;
mod transport;
mod types;

pub use cache::{SchemaCache, SCHEMA_FILE};
pub use client::IntrospectionClient;
pub use docs::{
    get_docs, render_mutation, render_query, render_type, DocKind, NotFound, NOT_FOUND,
};
pub use error::{ClientError, Result};
pub use lookup::{list_mutations, list_queries, list_types};
pub use query::{introspection_body, INTROSPECTION_QUERY};
pub use transport::{Endpoint, HttpTransport, RawResponse};
pub use types::*;
