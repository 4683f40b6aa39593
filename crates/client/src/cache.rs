//! On-disk cache of the last fetched schema.
//!
//! The cache is a single pretty-printed JSON file, `<home>/schema.json`. It has
//! no expiry; it is replaced whenever the schema is fetched again.

use crate::{ClientError, Result, SchemaDocument};
use std::path::{Path, PathBuf};

/// Name of the cache file inside the home directory.
pub const SCHEMA_FILE: &str = "schema.json";

/// Schema cache backed by one file.
#[derive(Debug, Clone)]
pub struct SchemaCache {
    path: PathBuf,
}

impl SchemaCache {
    /// A cache stored at `<home>/schema.json`.
    #[must_use]
    pub fn in_dir(home: &Path) -> Self {
        Self {
            path: home.join(SCHEMA_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the cached schema.
    ///
    /// Returns `Ok(None)` when nothing has been cached yet. A file that exists
    /// but does not hold a schema is an error.
    pub fn load(&self) -> Result<Option<SchemaDocument>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cached schema");
                return Ok(None);
            }
            Err(e) => return Err(ClientError::io(&self.path, e)),
        };

        let schema = serde_json::from_str(&content)
            .and_then(SchemaDocument::from_json)
            .map_err(|source| ClientError::CorruptCache {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "Using cached schema");
        Ok(Some(schema))
    }

    /// Stores a schema as it was fetched, replacing any previous one.
    ///
    /// The JSON is written to a sibling temporary file and renamed into place.
    pub fn save(&self, schema: &SchemaDocument) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ClientError::io(dir, e))?;
        }

        let json = serde_json::to_string_pretty(schema.as_json())
            .map_err(|e| ClientError::MalformedSchema(e.to_string()))?;

        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json).map_err(|e| ClientError::io(&staging, e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| ClientError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "Cached schema");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> SchemaDocument {
        SchemaDocument::from_json(json!({
            "data": { "__schema": {
                "queryType": { "name": "Query", "fields": [] },
                "mutationType": null,
                "types": [ { "kind": "SCALAR", "name": "String", "description": null } ]
            } }
        }))
        .unwrap()
    }

    #[test]
    fn test_cache_miss() {
        let temp = tempdir().unwrap();
        let cache = SchemaCache::in_dir(temp.path());
        assert!(!cache.exists());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_cache_save_and_load() {
        let temp = tempdir().unwrap();
        let cache = SchemaCache::in_dir(temp.path());

        cache.save(&sample()).unwrap();

        assert!(cache.exists());
        assert_eq!(cache.load().unwrap(), Some(sample()));
        assert!(!temp.path().join("schema.json.tmp").exists());
    }

    #[test]
    fn test_cache_file_is_pretty_printed() {
        let temp = tempdir().unwrap();
        let cache = SchemaCache::in_dir(temp.path());
        cache.save(&sample()).unwrap();

        let content = std::fs::read_to_string(cache.path()).unwrap();
        assert!(content.starts_with("{\n  \"data\""));
    }

    #[test]
    fn test_cache_creates_home_directory() {
        let temp = tempdir().unwrap();
        let home = temp.path().join("nested").join("graphql");
        let cache = SchemaCache::in_dir(&home);

        cache.save(&sample()).unwrap();
        assert!(home.join(SCHEMA_FILE).is_file());
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let temp = tempdir().unwrap();
        let cache = SchemaCache::in_dir(temp.path());
        std::fs::write(cache.path(), "{ not json").unwrap();

        assert!(matches!(
            cache.load(),
            Err(ClientError::CorruptCache { .. })
        ));
    }

    #[test]
    fn test_json_that_is_not_a_schema_is_corrupt() {
        let temp = tempdir().unwrap();
        let cache = SchemaCache::in_dir(temp.path());
        std::fs::write(cache.path(), r#"{"data": {"__schema": {"types": [{"kind": "GALAXY"}]}}}"#)
            .unwrap();

        assert!(matches!(
            cache.load(),
            Err(ClientError::CorruptCache { .. })
        ));
    }
}
