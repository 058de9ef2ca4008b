//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use store_gateway::config::{GatewayConfig, UpstreamConfig};
use store_gateway::http::HttpServer;
use store_gateway::lifecycle::Shutdown;

/// How the mock auth service answers `/auth/solve`.
#[derive(Clone)]
pub enum AuthBehavior {
    /// 200 with `{"idAccount": ...}`.
    Accept(&'static str),
    /// 200 with an empty body.
    EmptyBody,
    /// Non-success status.
    Reject(u16),
}

/// Observable state of the mock auth service.
pub struct MockAuth {
    /// Number of `/auth/solve` calls received.
    pub solve_calls: Arc<AtomicU32>,
    /// Token carried by the most recent `/auth/solve` call.
    pub last_token: Arc<Mutex<Option<String>>>,
}

impl MockAuth {
    pub fn solve_count(&self) -> u32 {
        self.solve_calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }
}

/// Start a mock auth service. Serves `/auth/solve` with the given
/// behavior and `/auth/register` as a plain open endpoint.
pub async fn start_mock_auth(addr: SocketAddr, behavior: AuthBehavior) -> MockAuth {
    let solve_calls = Arc::new(AtomicU32::new(0));
    let last_token = Arc::new(Mutex::new(None));

    let calls = solve_calls.clone();
    let tokens = last_token.clone();
    let app = Router::new()
        .route(
            "/auth/solve",
            post(move |Json(body): Json<Value>| {
                let calls = calls.clone();
                let tokens = tokens.clone();
                let behavior = behavior.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    *tokens.lock().unwrap() = body
                        .get("token")
                        .and_then(|t| t.as_str())
                        .map(|t| t.to_string());

                    let response: Response = match behavior {
                        AuthBehavior::Accept(id) => {
                            Json(json!({ "idAccount": id })).into_response()
                        }
                        AuthBehavior::EmptyBody => StatusCode::OK.into_response(),
                        AuthBehavior::Reject(status) => (
                            StatusCode::from_u16(status).unwrap(),
                            "credential rejected",
                        )
                            .into_response(),
                    };
                    response
                }
            }),
        )
        .route(
            "/auth/register",
            post(|| async { (StatusCode::CREATED, "registered") }),
        );

    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockAuth {
        solve_calls,
        last_token,
    }
}

/// Start a mock upstream that echoes method, path and headers back as
/// JSON, so tests can assert what the gateway forwarded.
pub async fn start_echo_upstream(addr: SocketAddr) {
    async fn echo(req: Request<Body>) -> Json<Value> {
        let headers: Value = req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    Value::from(value.to_str().unwrap_or("")),
                )
            })
            .collect::<serde_json::Map<String, Value>>()
            .into();

        Json(json!({
            "method": req.method().as_str(),
            "path": req.uri().path(),
            "headers": headers,
        }))
    }

    let app = Router::new().fallback(echo);
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

/// Gateway config wired to the given mock services.
pub fn gateway_config(bind: SocketAddr, auth: SocketAddr, store: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = bind.to_string();
    config.auth.service_url = format!("http://{}", auth);
    config.auth.timeout_secs = 2;
    config.upstreams = vec![
        UpstreamConfig {
            name: "auth".to_string(),
            path_prefix: "/auth".to_string(),
            address: auth.to_string(),
        },
        UpstreamConfig {
            name: "store".to_string(),
            path_prefix: "/store".to_string(),
            address: store.to_string(),
        },
    ];
    config
}

/// Start the gateway on its configured address. Returns the shutdown
/// handle; dropping it does not stop the server, triggering it does.
pub async fn start_gateway(config: GatewayConfig) -> Shutdown {
    let bind_address = config.listener.bind_address.clone();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind(&bind_address).await.unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    shutdown
}

/// Non-pooling client so tests never reuse a stale connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
