#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use project_roster_api::auth::{Claims, JwtKeys};
use project_roster_api::gateway::{
    GatewayError, ProcedureCall, ProcedureGateway, ProcedureOutcome, ResultSets, Row,
};
use project_roster_api::routes::{self, AppState};

pub const SECRET: &str = "integration-test-secret";

static TRACING: Once = Once::new();

/// Route server logs through the test harness; `RUST_LOG` picks the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Gateway double: canned outcome per procedure, every call recorded
#[derive(Default)]
pub struct FakeGateway {
    outcomes: Mutex<HashMap<String, ProcedureOutcome>>,
    calls: Mutex<Vec<ProcedureCall>>,
    healthy: Mutex<bool>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        let gateway = Self::default();
        *gateway.healthy.lock().unwrap() = true;
        Arc::new(gateway)
    }

    pub fn returns(&self, procedure: &str, rows: Value) {
        let rows: Vec<Row> = serde_json::from_value(rows).expect("rows must be an array of objects");
        self.outcomes.lock().unwrap().insert(
            procedure.to_string(),
            ProcedureOutcome::from_result_sets(ResultSets::single(rows)),
        );
    }

    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().unwrap() = healthy;
    }

    pub fn calls_to(&self, procedure: &str) -> Vec<ProcedureCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.procedure == procedure)
            .cloned()
            .collect()
    }

    pub fn procedures_called(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|c| c.procedure).collect()
    }
}

#[async_trait]
impl ProcedureGateway for FakeGateway {
    async fn call(&self, call: &ProcedureCall) -> Result<ProcedureOutcome, GatewayError> {
        self.calls.lock().unwrap().push(call.clone());
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .get(call.procedure)
            .cloned()
            .unwrap_or_else(|| ProcedureOutcome::Rows(ResultSets::single(Vec::new()))))
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        if *self.healthy.lock().unwrap() {
            Ok(())
        } else {
            Err(GatewayError::ConfigMissing("DATABASE_URL"))
        }
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve the real router in-process against `gateway`
pub async fn spawn_server(gateway: Arc<FakeGateway>) -> Result<TestServer> {
    init_tracing();

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let state = AppState::new(gateway as Arc<dyn ProcedureGateway>, JwtKeys::new(SECRET));
    let app = routes::app(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    })
}

/// Bearer token for a caller
pub fn token(user_id: i64, role: Option<&str>) -> String {
    let claims = Claims::new(user_id, role.map(str::to_string), None, 1).expect("claims");
    JwtKeys::new(SECRET).generate(&claims).expect("token")
}
