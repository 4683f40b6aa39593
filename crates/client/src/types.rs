//! Type definitions for the cached introspection document.
//!
//! These types mirror the shape of the introspection query in [`crate::query`].
//! Types are tagged by their `kind`, so a response that does not match the
//! expected shape fails to deserialize instead of being walked as an untyped
//! tree. [`SchemaDocument`] keeps the JSON exactly as the endpoint sent it next
//! to the typed view, so the cache and `--schema` output lose nothing.

use serde::{Deserialize, Deserializer, Serialize};

/// A fetched introspection result: the JSON as received and its typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    raw: serde_json::Value,
    response: IntrospectionResponse,
}

impl SchemaDocument {
    /// Parses a raw introspection result, keeping the original JSON.
    pub fn from_json(raw: serde_json::Value) -> serde_json::Result<Self> {
        let response = IntrospectionResponse::deserialize(&raw)?;
        Ok(Self { raw, response })
    }

    /// The document exactly as the endpoint returned it.
    #[must_use]
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.raw
    }

    #[must_use]
    pub const fn response(&self) -> &IntrospectionResponse {
        &self.response
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.response.data.schema
    }
}

/// Treats an explicit `null` like a missing value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Top-level introspection response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: Schema,
}

/// The schema as returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub query_type: Option<RootType>,
    pub mutation_type: Option<RootType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<SchemaType>,
}

/// A root operation type (`Query` or `Mutation`) together with its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SchemaType {
    #[serde(rename = "SCALAR")]
    Scalar(ScalarType),
    #[serde(rename = "OBJECT")]
    Object(ObjectType),
    #[serde(rename = "INTERFACE")]
    Interface(InterfaceType),
    #[serde(rename = "UNION")]
    Union(UnionType),
    #[serde(rename = "ENUM")]
    Enum(EnumType),
    #[serde(rename = "INPUT_OBJECT")]
    InputObject(InputObjectType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enum_values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_fields: Vec<InputValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
}

/// A possibly wrapped reference to a type.
///
/// Named types carry `name`; the `LIST` and `NON_NULL` wrappers carry `ofType`
/// instead. The introspection query only asks for two levels of `ofType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(default)]
    pub kind: Option<TypeKind>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// The introspection spelling of the kind, e.g. `INPUT_OBJECT`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SchemaType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(t) => t.description.as_deref(),
            Self::Object(t) => t.description.as_deref(),
            Self::Interface(t) => t.description.as_deref(),
            Self::Union(t) => t.description.as_deref(),
            Self::Enum(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Output fields. Empty for kinds that have none.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Object(t) => &t.fields,
            Self::Interface(t) => &t.fields,
            _ => &[],
        }
    }

    /// Input fields. Only input objects have them.
    #[must_use]
    pub fn input_fields(&self) -> &[InputValue] {
        match self {
            Self::InputObject(t) => &t.input_fields,
            _ => &[],
        }
    }
}

impl Schema {
    /// Finds a type by exact name.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub fn query_fields(&self) -> &[Field] {
        self.query_type.as_ref().map_or(&[], |root| &root.fields)
    }

    #[must_use]
    pub fn mutation_fields(&self) -> &[Field] {
        self.mutation_type.as_ref().map_or(&[], |root| &root.fields)
    }
}

/// Placeholder for an inner type name that sits deeper than one wrapper.
const UNRESOLVED: &str = "?";

impl TypeRef {
    /// A named, unwrapped reference.
    #[must_use]
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// A `kind` wrapper around `inner`.
    #[must_use]
    pub fn wrapping(kind: TypeKind, inner: Self) -> Self {
        Self {
            kind: Some(kind),
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Human-readable type string used in documentation tables.
    ///
    /// A named reference prints its name. Wrappers unwrap exactly one level:
    /// - `LIST` of `Foo` prints `List of Foo`
    /// - `NON_NULL` of `Foo` prints `Foo (required)`
    ///
    /// Doubly wrapped references such as `[Foo!]!` have no name one level down
    /// and print `?` for it (`? (required)`).
    ///
    /// ```
    /// # use gql_client::{TypeKind, TypeRef};
    /// let list = TypeRef::wrapping(TypeKind::List, TypeRef::named(TypeKind::Object, "Foo"));
    /// assert_eq!(list.display_name(), "List of Foo");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        let inner = self
            .of_type
            .as_ref()
            .and_then(|inner| inner.name.as_deref())
            .unwrap_or(UNRESOLVED);

        match self.kind {
            Some(TypeKind::List) => format!("List of {inner}"),
            Some(TypeKind::NonNull) => format!("{inner} (required)"),
            _ => inner.to_string(),
        }
    }

    /// The innermost named type, following every `ofType` link present.
    ///
    /// The introspection query stops after two `ofType` levels, so a reference
    /// wrapped three times, such as `[Widget!]!`, arrives without its name and
    /// this returns `None`.
    #[must_use]
    pub fn named_type(&self) -> Option<&str> {
        match (&self.name, &self.of_type) {
            (Some(name), _) => Some(name),
            (None, Some(inner)) => inner.named_type(),
            (None, None) => None,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}
