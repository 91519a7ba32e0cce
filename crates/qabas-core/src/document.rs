// Document model shared by every storage backend
//
// A document is a flat JSON object stored under (collection, id). The id is not
// part of the stored body: typed records carry it as an `id` field that is
// injected on read and stripped on write.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// Field map of a stored document
pub type Fields = Map<String, Value>;

/// A typed record bound to one collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
}

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Convert into a typed record, exposing the document id as `id`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut data = self.data.clone();
        data.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}

/// Serialize a record into storable fields (the `id` field is dropped)
pub fn to_fields<T: Serialize>(collection: &str, value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        _ => Err(StoreError::NotAnObject(collection.to_string())),
    }
}

/// Shallow merge: every patch key replaces the target value
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Equality filter on a top-level field
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &Fields) -> bool {
        data.get(&self.field) == Some(&self.value)
    }
}

/// True when every filter matches
pub fn matches_all(filters: &[Filter], data: &Fields) -> bool {
    filters.iter().all(|f| f.matches(data))
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Collection query: equality filters, one ordering field, optional limit.
///
/// Documents missing the ordering field are excluded from ordered results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(field, value));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, data: &Fields) -> bool {
        matches_all(&self.filters, data)
            && self
                .order_by
                .as_ref()
                .map_or(true, |o| data.contains_key(&o.field))
    }

    /// Evaluate the query over documents held in memory
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut out: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.matches(&doc.data))
            .collect();

        match &self.order_by {
            Some(order) => out.sort_by(|a, b| {
                let ord = match (a.get(&order.field), b.get(&order.field)) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    _ => Ordering::Equal,
                };
                let ord = match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                };
                ord.then_with(|| a.id.cmp(&b.id))
            }),
            None => out.sort_by(|a, b| a.id.cmp(&b.id)),
        }

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Total order over JSON values used for sorting.
///
/// Values of different types order by type (null, bool, number, string, array,
/// object). RFC 3339 strings compare as instants.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => match (parse_timestamp(x), parse_timestamp(y)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x.cmp(y),
        },
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// A single write inside a batch
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document
    Set {
        collection: String,
        id: String,
        data: Fields,
    },
    /// Merge fields into an existing document; fails the batch if it is missing
    Update {
        collection: String,
        id: String,
        patch: Fields,
    },
    /// Delete a document; missing documents are ignored
    Delete { collection: String, id: String },
    /// Add `delta` to an integer field (missing counts as 0); fails the batch if the document is missing
    Increment {
        collection: String,
        id: String,
        field: String,
        delta: i64,
    },
    /// Merge fields into every document matching the filters, as seen at commit time
    UpdateWhere {
        collection: String,
        filters: Vec<Filter>,
        patch: Fields,
    },
    /// Delete every document matching the filters, as seen at commit time
    DeleteWhere {
        collection: String,
        filters: Vec<Filter>,
    },
}

/// Writes committed atomically: either all apply or none do
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: &str, id: &str, data: Fields) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        });
        self
    }

    pub fn update(&mut self, collection: &str, id: &str, patch: Fields) -> &mut Self {
        self.ops.push(WriteOp::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            patch,
        });
        self
    }

    pub fn delete(&mut self, collection: &str, id: &str) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn increment(&mut self, collection: &str, id: &str, field: &str, delta: i64) -> &mut Self {
        self.ops.push(WriteOp::Increment {
            collection: collection.to_string(),
            id: id.to_string(),
            field: field.to_string(),
            delta,
        });
        self
    }

    pub fn update_where(&mut self, collection: &str, filters: Vec<Filter>, patch: Fields) -> &mut Self {
        self.ops.push(WriteOp::UpdateWhere {
            collection: collection.to_string(),
            filters,
            patch,
        });
        self
    }

    pub fn delete_where(&mut self, collection: &str, filters: Vec<Filter>) -> &mut Self {
        self.ops.push(WriteOp::DeleteWhere {
            collection: collection.to_string(),
            filters,
        });
        self
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
