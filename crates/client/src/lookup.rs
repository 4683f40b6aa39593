//! Name listings over a schema.

use crate::Schema;
use std::collections::BTreeSet;

/// Prefix reserved for GraphQL's own introspection types.
const META_PREFIX: &str = "__";

/// Names of all schema types except the `__` meta types, sorted and deduplicated.
#[must_use]
pub fn list_types(schema: &Schema) -> Vec<String> {
    sorted_unique(
        schema
            .types
            .iter()
            .map(crate::SchemaType::name)
            .filter(|name| !name.starts_with(META_PREFIX)),
    )
}

/// Names of the query root fields, sorted and deduplicated.
#[must_use]
pub fn list_queries(schema: &Schema) -> Vec<String> {
    sorted_unique(schema.query_fields().iter().map(|f| f.name.as_str()))
}

/// Names of the mutation root fields, sorted and deduplicated.
#[must_use]
pub fn list_mutations(schema: &Schema) -> Vec<String> {
    sorted_unique(schema.mutation_fields().iter().map(|f| f.name.as_str()))
}

fn sorted_unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
