//! The introspection query sent to the endpoint.

/// Introspection query used to populate the schema cache.
///
/// This query fetches:
/// - The query and mutation root types, including their fields
/// - All type definitions with fields, arguments, input fields, interfaces,
///   enum values and possible types
///
/// Type references are expanded two `ofType` levels deep, which covers a single
/// wrapper such as `String!` or `[String]` fully.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType {
      name
      fields {
        ...Field
      }
    }
    mutationType {
      name
      fields {
        ...Field
      }
    }
    types {
      ...FullType
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields {
    ...Field
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues {
    name
    description
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment Field on __Field {
  name
  description
  args {
    ...InputValue
  }
  type {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
    }
  }
}
";

/// Request body for the introspection query.
#[must_use]
pub fn introspection_body() -> serde_json::Value {
    serde_json::json!({
        "query": INTROSPECTION_QUERY
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introspection_query_is_valid() {
        assert!(INTROSPECTION_QUERY.contains("IntrospectionQuery"));
        assert!(INTROSPECTION_QUERY.contains("__schema"));
        assert!(INTROSPECTION_QUERY.contains("queryType"));
        assert!(INTROSPECTION_QUERY.contains("mutationType"));
        assert!(INTROSPECTION_QUERY.contains("possibleTypes"));
    }

    #[test]
    fn test_type_ref_depth_is_two_levels() {
        assert_eq!(INTROSPECTION_QUERY.matches("ofType").count(), 2);
    }

    #[test]
    fn test_body_has_no_variables() {
        let body = introspection_body();
        assert_eq!(body["query"], INTROSPECTION_QUERY);
        assert!(body.get("variables").is_none());
    }
}
