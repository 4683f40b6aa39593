//! Markdown documentation for types, queries and mutations.
//!
//! Each renderer looks its entry up by exact name. A miss is reported as
//! [`NotFound`], which still renders to a small Markdown document so callers can
//! print it.

use crate::{Field, InputValue, Schema, TypeRef};
use std::fmt::{self, Write as _};

/// Body of a document for a name that is not in the schema.
pub const NOT_FOUND: &str = "_Not found_";

/// Body of an empty table.
const EMPTY_TABLE: &str = "_None_";

/// What a documentation lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Type,
    Query,
    Mutation,
}

impl DocKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

/// A documentation lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub kind: DocKind,
    pub name: String,
}

impl NotFound {
    fn new(kind: DocKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }

    /// The "not found" document for this lookup.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("# {}: {}\n\n{NOT_FOUND}\n", self.kind.label(), self.name)
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` not found", self.kind.label(), self.name)
    }
}

impl std::error::Error for NotFound {}

/// One row of a field table.
struct Row<'a> {
    name: &'a str,
    type_ref: &'a TypeRef,
    description: Option<&'a str>,
}

impl<'a> From<&'a Field> for Row<'a> {
    fn from(field: &'a Field) -> Self {
        Self {
            name: &field.name,
            type_ref: &field.type_ref,
            description: field.description.as_deref(),
        }
    }
}

impl<'a> From<&'a InputValue> for Row<'a> {
    fn from(value: &'a InputValue) -> Self {
        Self {
            name: &value.name,
            type_ref: &value.type_ref,
            description: value.description.as_deref(),
        }
    }
}

/// Renders a type: its kind, description, input fields and output fields.
pub fn render_type(name: &str, schema: &Schema) -> Result<String, NotFound> {
    let ty = schema
        .find_type(name)
        .ok_or_else(|| NotFound::new(DocKind::Type, name))?;

    let mut doc = format!("# {}: {} ({})\n", DocKind::Type.label(), ty.name(), ty.kind());
    push_description(&mut doc, ty.description());
    push_section(&mut doc, "Input", ty.input_fields().iter().map(Row::from));
    push_section(&mut doc, "Output", ty.fields().iter().map(Row::from));
    Ok(doc)
}

/// Renders a query root field.
pub fn render_query(name: &str, schema: &Schema) -> Result<String, NotFound> {
    render_operation(DocKind::Query, schema.query_fields(), name, schema)
}

/// Renders a mutation root field.
pub fn render_mutation(name: &str, schema: &Schema) -> Result<String, NotFound> {
    render_operation(DocKind::Mutation, schema.mutation_fields(), name, schema)
}

/// Renders the first of type, query or mutation named `term`.
///
/// When nothing matches, the type lookup's [`NotFound`] is returned.
pub fn get_docs(term: &str, schema: &Schema) -> Result<String, NotFound> {
    render_type(term, schema)
        .or_else(|not_found| render_query(term, schema).map_err(|_| not_found))
        .or_else(|not_found| render_mutation(term, schema).map_err(|_| not_found))
}

fn render_operation(
    kind: DocKind,
    fields: &[Field],
    name: &str,
    schema: &Schema,
) -> Result<String, NotFound> {
    let field = fields
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| NotFound::new(kind, name))?;

    let mut doc = format!("# {}: {}\n", kind.label(), field.name);
    push_description(&mut doc, field.description.as_deref());
    push_section(&mut doc, "Arguments", field.args.iter().map(Row::from));

    let returned = field
        .type_ref
        .named_type()
        .and_then(|type_name| schema.find_type(type_name))
        .map_or(&[][..], crate::SchemaType::fields);
    push_section(
        &mut doc,
        &format!("Returns `{}`", field.type_ref.display_name()),
        returned.iter().map(Row::from),
    );
    Ok(doc)
}

fn push_description(doc: &mut String, description: Option<&str>) {
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        let _ = write!(doc, "\n_{description}_\n");
    }
}

fn push_section<'a>(doc: &mut String, title: &str, rows: impl ExactSizeIterator<Item = Row<'a>>) {
    let _ = write!(doc, "\n## {title}\n\n");
    if rows.len() == 0 {
        doc.push_str(EMPTY_TABLE);
        doc.push('\n');
        return;
    }

    doc.push_str("| Name | Type | Description |\n");
    doc.push_str("| ---- | ---- | ----------- |\n");
    for row in rows {
        let description = row.description.map_or_else(|| "-".to_string(), cell);
        let _ = writeln!(
            doc,
            "| {} | {} | {} |",
            cell(row.name),
            cell(&row.type_ref.display_name()),
            description
        );
    }
}

/// Keeps text inside a single table cell: pipes are escaped, newlines become `<br>`.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}
