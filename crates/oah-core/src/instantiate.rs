//! Example-value synthesis from JSON Schema fragments.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::parse::schema::{Schema, SchemaOrRef, SchemaType, TypeSet};

/// Synthesizes one example value conforming to a schema fragment.
///
/// The shared schema table travels as an explicit field so fragments never
/// need to be mutated to make their internal `$ref`s resolvable. `section`
/// names the table's pointer section: `definitions` for Swagger 2.0,
/// `components/schemas` for OpenAPI 3.
pub struct Instantiator<'a> {
    section: &'a str,
    schemas: &'a IndexMap<String, SchemaOrRef>,
    visited: HashSet<String>,
}

impl<'a> Instantiator<'a> {
    pub fn new(section: &'a str, schemas: &'a IndexMap<String, SchemaOrRef>) -> Self {
        Self {
            section,
            schemas,
            visited: HashSet::new(),
        }
    }

    /// Produce an example value for the fragment. Total over parsed input:
    /// unresolvable and circular references yield `Null` instead of an
    /// error.
    pub fn instantiate(&mut self, schema: &SchemaOrRef) -> Value {
        match schema {
            SchemaOrRef::Ref { ref_path } => {
                if self.visited.contains(ref_path) {
                    return Value::Null; // circular reference
                }
                let Some(target) = self.lookup(ref_path) else {
                    log::warn!("unresolved schema reference {ref_path}");
                    return Value::Null;
                };
                self.visited.insert(ref_path.clone());
                let value = self.instantiate(target);
                self.visited.remove(ref_path);
                value
            }
            SchemaOrRef::Schema(schema) => self.instantiate_schema(schema),
        }
    }

    fn lookup(&self, ref_path: &str) -> Option<&'a SchemaOrRef> {
        let name = ref_path
            .strip_prefix("#/")?
            .strip_prefix(self.section)?
            .strip_prefix('/')?;
        self.schemas.get(name)
    }

    fn instantiate_schema(&mut self, schema: &Schema) -> Value {
        if let Some(value) = &schema.const_value {
            return value.clone();
        }
        if let Some(value) = &schema.default_value {
            return value.clone();
        }
        if let Some(value) = schema.enum_values.first() {
            return value.clone();
        }

        if !schema.all_of.is_empty() {
            let mut merged = Map::new();
            for sub in &schema.all_of {
                if let Value::Object(fields) = self.instantiate(sub) {
                    merged.extend(fields);
                }
            }
            return Value::Object(merged);
        }
        if let Some(sub) = schema.one_of.first() {
            return self.instantiate(sub);
        }
        if let Some(sub) = schema.any_of.first() {
            return self.instantiate(sub);
        }

        match effective_type(schema) {
            SchemaType::String => Value::String(String::new()),
            SchemaType::Number | SchemaType::Integer => Value::from(0),
            SchemaType::Boolean => Value::Bool(false),
            SchemaType::Null => Value::Null,
            SchemaType::Array => {
                let len = schema.min_items.unwrap_or(0) as usize;
                match &schema.items {
                    Some(items) if len > 0 => {
                        Value::Array((0..len).map(|_| self.instantiate(items)).collect())
                    }
                    _ => Value::Array(Vec::new()),
                }
            }
            SchemaType::Object => {
                let mut fields = Map::new();
                for (name, sub) in &schema.properties {
                    fields.insert(name.clone(), self.instantiate(sub));
                }
                Value::Object(fields)
            }
        }
    }
}

/// The type a schema instantiates as. Untyped schemas fall back on their
/// structural keywords, defaulting to object.
fn effective_type(schema: &Schema) -> SchemaType {
    if let Some(t) = schema.schema_type.as_ref().and_then(TypeSet::primary) {
        return t;
    }
    if schema.items.is_some() {
        return SchemaType::Array;
    }
    SchemaType::Object
}
