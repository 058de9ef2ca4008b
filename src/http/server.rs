//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (authorization gate, CORS, tracing, timeouts,
//!   request ID)
//! - Bind the server to a listener
//! - Dispatch authorized requests to upstream services
//!
//! # Design Decisions
//! - The authorization gate is the innermost layer: every route, local or
//!   proxied, passes through it before the handler runs
//! - CORS sits outside the gate so preflights are answered without
//!   consulting it
//! - One shared hyper client for upstream forwarding; no retries, the
//!   mesh's own resilience policy owns that

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{uri::Scheme, Request, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::meta;
use crate::observability::metrics;
use crate::routing::UpstreamTable;
use crate::security::delegate::DelegateSetupError;
use crate::security::{authorization_gate, cors, AuthClient, GateState, RouteRules};

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub upstreams: Arc<UpstreamTable>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the auth delegate client cannot be constructed from
    /// the configured service URL.
    pub fn new(config: GatewayConfig) -> Result<Self, DelegateSetupError> {
        // Compile the immutable request-path views
        let rules = Arc::new(RouteRules::from_config(&config.open_routes));
        let upstreams = Arc::new(UpstreamTable::from_config(&config.upstreams));

        tracing::info!(
            open_routes = rules.len(),
            upstreams = upstreams.len(),
            "Request tables compiled"
        );

        // Clients: one for the auth delegate, one for upstream forwarding
        let delegate = AuthClient::new(&config.auth)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState { upstreams, client };
        let gate = GateState { rules, delegate };

        let router = Self::build_router(&config, state, gate);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState, gate: GateState) -> Router {
        let router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .merge(meta::router());

        // Layers apply bottom-up: the gate is innermost, tracing outermost
        let mut router =
            router.layer(middleware::from_fn_with_state(gate, authorization_gate));
        if config.cors.enabled {
            router = router.layer(cors::cors_layer());
        }
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Dispatch handler for authorized traffic.
/// Looks up the upstream for the path and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path().to_string();
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // 1. Match upstream
    let route = match state.upstreams.match_path(&path) {
        Some(route) => route.clone(),
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No upstream matched");
            metrics::record_request(&method, 404, "none", start_time);
            return (StatusCode::NOT_FOUND, "No matching route found").into_response();
        }
    };

    // 2. Rewrite the URI to point at the upstream authority
    let (mut parts, body) = request.into_parts();
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(route.authority.clone());
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            metrics::record_request(&method, 502, &route.name, start_time);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    let outbound = Request::from_parts(parts, body);

    // 3. Forward. Headers (id-account, x-request-id included) travel as-is.
    match state.client.request(outbound).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(&method, status.as_u16(), &route.name, start_time);

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %route.name,
                error = %e,
                "Upstream error"
            );
            metrics::record_request(&method, 502, &route.name, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
