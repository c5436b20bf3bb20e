use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::gateway::{GatewayError, ProcedureCall, ProcedureGateway, ProcedureOutcome, ResultSets, Row};

/// In-memory gateway answering each procedure with a canned outcome and
/// recording every call it receives
#[derive(Default)]
pub struct ScriptedGateway {
    outcomes: HashMap<&'static str, ProcedureOutcome>,
    calls: Mutex<Vec<ProcedureCall>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returns(mut self, procedure: &'static str, rows: Vec<Row>) -> Self {
        self.outcomes
            .insert(procedure, ProcedureOutcome::from_result_sets(ResultSets::single(rows)));
        self
    }

    pub fn fails(mut self, procedure: &'static str, number: i64) -> Self {
        self.outcomes.insert(
            procedure,
            ProcedureOutcome::Failed {
                number,
                message: Some(format!("scripted failure {}", number)),
            },
        );
        self
    }

    pub fn call_count(&self, procedure: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.procedure == procedure)
            .count()
    }

    /// Every call received, in order
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self, procedure: &str) -> Option<ProcedureCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.procedure == procedure)
            .cloned()
    }
}

#[async_trait]
impl ProcedureGateway for ScriptedGateway {
    async fn call(&self, call: &ProcedureCall) -> Result<ProcedureOutcome, GatewayError> {
        self.calls.lock().unwrap().push(call.clone());
        // Unscripted procedures behave like an empty result
        Ok(self
            .outcomes
            .get(call.procedure)
            .cloned()
            .unwrap_or_else(|| ProcedureOutcome::Rows(ResultSets::single(Vec::new()))))
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Turn a JSON array of objects into result-set rows
pub fn rows(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                other => panic!("row must be an object, got {}", other),
            })
            .collect(),
        other => panic!("rows must be an array, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ParamValue;
    use serde_json::json;

    #[tokio::test]
    async fn records_calls_and_replays_outcomes() {
        let gateway = ScriptedGateway::new().returns("usp_a", rows(json!([{ "id": 1 }])));

        let outcome = gateway.call(&ProcedureCall::new("usp_a").input("x", 1_i64)).await.unwrap();
        assert!(matches!(outcome, ProcedureOutcome::Rows(ref sets) if sets.rows().len() == 1));

        let outcome = gateway.call(&ProcedureCall::new("usp_b")).await.unwrap();
        assert!(matches!(outcome, ProcedureOutcome::Rows(ref sets) if sets.is_empty()));

        assert_eq!(gateway.call_count("usp_a"), 1);
        assert_eq!(gateway.last_call("usp_a").unwrap().param("x"), Some(&ParamValue::Int(Some(1))));
    }
}
