//! Backend-neutral document filters

use serde_json::Value;

/// A single field predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `field == value`
    Eq(String, Value),
    /// `field` equals any of the values
    In(String, Vec<Value>),
}

/// Conjunction of clauses; an empty filter matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Shorthand for a single equality clause
    pub fn by(field: &str, value: impl Into<Value>) -> Self {
        Self::default().eq(field, value)
    }

    /// Add an equality clause
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::Eq(field.to_string(), value.into()));
        self
    }

    /// Add a membership clause
    pub fn any_of<V: Into<Value>>(mut self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.clauses.push(Clause::In(field.to_string(), values));
        self
    }

    /// Evaluate the filter against a JSON document
    ///
    /// A missing field compares equal to `null`.
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Eq(field, expected) => field_value(document, field) == expected,
            Clause::In(field, candidates) => {
                let actual = field_value(document, field);
                candidates.iter().any(|c| c == actual)
            }
        })
    }

    /// Render as a MongoDB query document
    #[cfg(feature = "mongodb_backend")]
    pub fn to_document(&self) -> anyhow::Result<mongodb::bson::Document> {
        use mongodb::bson::{Document, doc, to_bson};

        let mut query = Document::new();
        for clause in &self.clauses {
            match clause {
                Clause::Eq(field, value) => {
                    query.insert(field.clone(), to_bson(value)?);
                }
                Clause::In(field, values) => {
                    query.insert(field.clone(), doc! { "$in": to_bson(values)? });
                }
            }
        }
        Ok(query)
    }
}

fn field_value<'a>(document: &'a Value, field: &str) -> &'a Value {
    document.get(field).unwrap_or(&Value::Null)
}
