//! Introspection client backed by the schema cache.

use crate::query::introspection_body;
use crate::{ClientError, HttpTransport, Result, SchemaCache, SchemaDocument};

/// Fetches the schema of an endpoint, going through the [`SchemaCache`].
///
/// ```no_run
/// use gql_client::{Endpoint, HttpTransport, IntrospectionClient, SchemaCache};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new(Endpoint::new("api.example.com/graphql", None))?;
/// let client = IntrospectionClient::new(transport, SchemaCache::in_dir(Path::new("/tmp/gql")));
///
/// // Served from the cache when possible.
/// let schema = client.get_schema(false).await?;
/// println!("Schema has {} types", schema.schema().types.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    transport: HttpTransport,
    cache: SchemaCache,
}

impl IntrospectionClient {
    #[must_use]
    pub const fn new(transport: HttpTransport, cache: SchemaCache) -> Self {
        Self { transport, cache }
    }

    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    #[must_use]
    pub const fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Returns the cached schema, or fetches and caches it.
    ///
    /// With `force_refresh` the cache is ignored and always overwritten.
    #[tracing::instrument(skip(self))]
    pub async fn get_schema(&self, force_refresh: bool) -> Result<SchemaDocument> {
        if !force_refresh {
            if let Some(schema) = self.cache.load()? {
                return Ok(schema);
            }
        }

        let schema = self.fetch().await?;
        self.cache.save(&schema)?;
        Ok(schema)
    }

    /// Sends the introspection query and parses the response.
    async fn fetch(&self) -> Result<SchemaDocument> {
        if self.transport.endpoint().bearer().is_none() {
            tracing::warn!("No bearer token configured; the endpoint may reject introspection");
        }

        tracing::info!("Sending introspection query");
        let response = self.transport.post(&introspection_body()).await?;

        if !response.is_success() {
            tracing::error!(status = response.status, body = %response.body, "HTTP error response");
            return Err(ClientError::Http(response.status, response.body));
        }

        let schema = serde_json::from_str(&response.body)
            .and_then(SchemaDocument::from_json)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to parse introspection response");
                ClientError::MalformedSchema(e.to_string())
            })?;

        tracing::info!(
            types = schema.schema().types.len(),
            "Introspection successful"
        );
        Ok(schema)
    }
}
