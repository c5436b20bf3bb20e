pub mod postgres;
pub mod procedures;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

pub use postgres::PgGateway;

/// A single result-set row, keyed by column name
pub type Row = Map<String, Value>;

/// Errors raised by a gateway implementation. Anything here is unexpected
/// from the handler's point of view; expected failures come back as
/// `ProcedureOutcome::Failed`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Failed to decode row from {procedure}: {message}")]
    Decode { procedure: String, message: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Typed stored procedure parameter. `None` is passed through as SQL NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(Option<i64>),
    Text(Option<String>),
    Bit(Option<bool>),
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(Some(v))
    }
}

impl From<Option<i64>> for ParamValue {
    fn from(v: Option<i64>) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(Some(v.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(Some(v))
    }
}

impl From<Option<String>> for ParamValue {
    fn from(v: Option<String>) -> Self {
        ParamValue::Text(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bit(Some(v))
    }
}

impl From<Option<bool>> for ParamValue {
    fn from(v: Option<bool>) -> Self {
        ParamValue::Bit(v)
    }
}

/// A named procedure invocation with ordered, named parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    pub procedure: &'static str,
    pub params: Vec<(&'static str, ParamValue)>,
}

impl ProcedureCall {
    pub fn new(procedure: &'static str) -> Self {
        Self {
            procedure,
            params: Vec::new(),
        }
    }

    /// Builder-style parameter binding, mirrors `request().input(name, type, value)`
    pub fn input(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// One or more result sets returned by a call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSets {
    sets: Vec<Vec<Row>>,
}

impl ResultSets {
    pub fn single(rows: Vec<Row>) -> Self {
        Self { sets: vec![rows] }
    }

    /// Rows of the first result set (empty when the call produced none)
    pub fn rows(&self) -> &[Row] {
        self.sets.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.sets.into_iter().next().unwrap_or_default()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows().first()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Deserialize the first row of the first set into `T`
    pub fn first_as<T: DeserializeOwned>(&self, procedure: &str) -> Result<Option<T>, GatewayError> {
        self.first()
            .map(|row| decode_row(procedure, row))
            .transpose()
    }

    /// Deserialize every row of the first set into `T`
    pub fn rows_as<T: DeserializeOwned>(&self, procedure: &str) -> Result<Vec<T>, GatewayError> {
        self.rows().iter().map(|row| decode_row(procedure, row)).collect()
    }
}

fn decode_row<T: DeserializeOwned>(procedure: &str, row: &Row) -> Result<T, GatewayError> {
    serde_json::from_value(Value::Object(row.clone())).map_err(|e| GatewayError::Decode {
        procedure: procedure.to_string(),
        message: e.to_string(),
    })
}

/// Outcome of a procedure call: either data, or the failure the procedure
/// itself reported through its error indicator columns
#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureOutcome {
    Rows(ResultSets),
    Failed { number: i64, message: Option<String> },
}

impl ProcedureOutcome {
    /// Classify raw result sets. A first row with a set `ErrorNumber` (not
    /// null, zero, false or empty) is a failure report, not data.
    pub fn from_result_sets(sets: ResultSets) -> Self {
        if let Some(row) = sets.first() {
            if let Some(number) = row.get("ErrorNumber").and_then(error_number) {
                let message = row
                    .get("ErrorMessage")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                return ProcedureOutcome::Failed { number, message };
            }
        }
        ProcedureOutcome::Rows(sets)
    }
}

fn error_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => n.as_i64().or(Some(-1)),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.parse().unwrap_or(-1)),
        Value::Bool(true) => Some(-1),
        _ => None,
    }
}

/// Abstraction over the backing store: every stored procedure is a named
/// remote call. Implementations must be shareable across requests.
#[async_trait]
pub trait ProcedureGateway: Send + Sync {
    async fn call(&self, call: &ProcedureCall) -> Result<ProcedureOutcome, GatewayError>;

    /// Round-trip connectivity probe used by the health endpoint
    async fn ping(&self) -> Result<(), GatewayError>;
}
