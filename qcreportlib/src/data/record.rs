//! Typed field values and positional row casting.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Declared type of one field in a module's record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Int,
    Float,
    Text,
}

impl FieldType {
    /// Cast one raw field. The error is a human-readable reason.
    pub fn cast(self, raw: &str) -> Result<Value, String> {
        match self {
            FieldType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("expected integer, found '{}'", raw)),
            FieldType::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("expected number, found '{}'", raw)),
            FieldType::Text => Ok(Value::Text(raw.to_string())),
        }
    }
}

/// One typed cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the value; text is never numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Total order used for sorting and pivot keys.
    ///
    /// Numbers compare numerically across int/float and sort before text.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
            (a, b) => {
                // Both numeric here.
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One data row cast to a module's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tab-joined text form, as the row would appear in a report.
    pub fn to_line(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Cast a tokenized row against a shape.
///
/// The row must have exactly one field per declared type.
pub fn cast_row(fields: &[String], shape: &[FieldType]) -> Result<Record, String> {
    if fields.len() != shape.len() {
        return Err(format!(
            "expected {} fields, found {}",
            shape.len(),
            fields.len()
        ));
    }

    let values = fields
        .iter()
        .zip(shape)
        .map(|(raw, ty)| ty.cast(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Record::new(values))
}
