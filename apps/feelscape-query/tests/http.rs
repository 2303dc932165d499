use std::{
	future::IntoFuture,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use axum::{
	Json, Router,
	body::{self, Body},
	http::{Request, StatusCode},
	routing,
};
use serde_json::{Map, Value, json};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};
use tower::util::ServiceExt;

use feelscape_config::Analysis;
use feelscape_query::{routes, state::AppState};
use feelscape_service::{AnalysisProvider, BoxFuture};

struct CountingProvider {
	reply: Value,
	calls: AtomicUsize,
}
impl CountingProvider {
	fn new(reply: Value) -> Arc<Self> {
		Arc::new(Self { reply, calls: AtomicUsize::new(0) })
	}
}
impl AnalysisProvider for CountingProvider {
	fn analyze<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, feelscape_providers::Result<Value>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let reply = self.reply.clone();

		Box::pin(async move { Ok(reply) })
	}
}

async fn post_query(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/query")
				.header("content-type", "application/json")
				.body(body.into())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /query.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	(status, json)
}

async fn start_analysis_server(app: Router) -> (String, Sender<()>) {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind analysis server.");
	let addr = listener.local_addr().expect("Failed to read analysis server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}"), tx)
}

fn analysis_app(api_base: String) -> Router {
	let config = feelscape_config::Config {
		service: feelscape_config::Service {
			records_bind: "127.0.0.1:0".to_string(),
			query_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: feelscape_config::Storage {
			postgres: feelscape_config::Postgres {
				dsn_env: "FEELSCAPE_STORE_DSN".to_string(),
				pool_max_conns: 1,
				acquire_timeout_ms: 1_000,
			},
			collection: "emotion".to_string(),
		},
		analysis: Analysis { api_base, path: "/analyze".to_string(), default_headers: Map::new() },
		client: feelscape_config::Client::default(),
	};

	routes::router(AppState::new(&config).expect("Failed to build app state."))
}

#[tokio::test]
async fn health_responds() {
	let app = routes::router(AppState::from_provider(CountingProvider::new(json!([]))));
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("Failed to build."))
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_queries_are_400_without_upstream_calls() {
	let provider = CountingProvider::new(json!([]));

	for body in [
		json!({ "query": "" }).to_string(),
		json!({ "query": 123 }).to_string(),
		json!({}).to_string(),
		json!(["rain"]).to_string(),
		"not json".to_string(),
	] {
		let app = routes::router(AppState::from_provider(provider.clone()));
		let (status, json) = post_query(app, body).await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(json, json!({ "error": "Invalid query" }));
	}

	assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_list_is_returned_unchanged() {
	let points = json!([
		{ "location": "Chennai", "latitude": 13.08, "longitude": 80.27, "score": 0.42, "x": "kept" },
		{ "latitude": "bad" }
	]);
	let provider = CountingProvider::new(points.clone());
	let app = routes::router(AppState::from_provider(provider.clone()));
	let (status, json) = post_query(app, json!({ "query": "floods" }).to_string()).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, points);
	assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_list_upstream_is_502() {
	let provider = CountingProvider::new(json!({ "points": [] }));
	let app = routes::router(AppState::from_provider(provider));
	let (status, json) = post_query(app, json!({ "query": "floods" }).to_string()).await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert_eq!(json, json!({ "error": "Invalid response from analysis service" }));
}

#[tokio::test]
async fn upstream_errors_are_500_with_details() {
	let upstream = Router::new().route(
		"/analyze",
		routing::post(|| async {
			(StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": "model loading" })))
		}),
	);
	let (base, shutdown) = start_analysis_server(upstream).await;
	let (status, json) =
		post_query(analysis_app(base), json!({ "query": "floods" }).to_string()).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error"], "Analysis service error");
	assert_eq!(json["details"], json!({ "message": "model loading" }));

	let _ = shutdown.send(());
}

#[tokio::test]
async fn unreachable_upstream_is_500_with_a_message() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind probe.");
	let addr = listener.local_addr().expect("Failed to read probe address.");

	drop(listener);

	let (status, json) =
		post_query(analysis_app(format!("http://{addr}")), json!({ "query": "floods" }).to_string())
			.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error"], "Analysis service error");
	assert!(json["details"].as_str().is_some_and(|details| !details.is_empty()));
}

#[tokio::test]
async fn forwards_through_the_analysis_client() {
	let upstream = Router::new().route(
		"/analyze",
		routing::post(|Json(payload): Json<Value>| async move {
			Json(json!([
				{ "location": payload["query"], "latitude": 1, "longitude": 2, "score": -0.5 }
			]))
		}),
	);
	let (base, shutdown) = start_analysis_server(upstream).await;
	let (status, json) =
		post_query(analysis_app(base), json!({ "query": "drought" }).to_string()).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		json,
		json!([{ "location": "drought", "latitude": 1, "longitude": 2, "score": -0.5 }])
	);

	let _ = shutdown.send(());
}
