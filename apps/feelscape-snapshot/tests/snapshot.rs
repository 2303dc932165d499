use std::{future::IntoFuture, path::PathBuf};

use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use feelscape_map::{MapSettings, RelayClient};
use feelscape_snapshot::{Args, render, snapshot};

async fn start_relays() -> (String, Sender<()>) {
	let app = Router::new()
		.route(
			"/records",
			routing::get(|| async {
				Json(json!([
					{ "location": "Kochi", "latitude": 9.93, "longitude": 76.26, "Total_Score": 6.2 },
					{ "location": "Agra", "latitude": 27.17, "longitude": 78.0, "Total_Score": 2.5 }
				]))
			}),
		)
		.route(
			"/query",
			routing::post(|Json(payload): Json<Value>| async move {
				Json(json!([
					{ "location": payload["query"], "latitude": 26.9, "longitude": 75.8, "score": 0.1 }
				]))
			}),
		);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind relay server.");
	let addr = listener.local_addr().expect("Failed to read relay server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}"), tx)
}

fn args(query: Option<&str>, radius: Option<u32>, hide_base: bool) -> Args {
	Args {
		config: PathBuf::from("feelscape.toml"),
		query: query.map(str::to_string),
		radius,
		hide_base,
	}
}

#[tokio::test]
async fn renders_base_and_query_layers() {
	let (base, shutdown) = start_relays().await;
	let relay = RelayClient::with_urls(&format!("{base}/records"), &format!("{base}/query"))
		.expect("Client must build.");
	let map = render(&relay, MapSettings::default(), &args(Some("jaipur"), Some(55), false))
		.await
		.expect("Render must succeed.");
	let json = serde_json::to_value(snapshot(&map)).expect("Snapshot must serialize.");

	assert_eq!(json["state"], json!({ "state": "searching", "query": "jaipur" }));
	assert_eq!(json["radius"], 55);
	assert_eq!(json["base_visible"], true);
	assert_eq!(json["scene"]["search_box"], true);
	assert_eq!(map.backend().heatmap_count(), 2);
	assert_eq!(map.backend().marker_count(), 3);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn hides_the_base_layer_on_request() {
	let (base, shutdown) = start_relays().await;
	let relay = RelayClient::with_urls(&format!("{base}/records"), &format!("{base}/query"))
		.expect("Client must build.");
	let map = render(&relay, MapSettings::default(), &args(None, None, true))
		.await
		.expect("Render must succeed.");
	let json = serde_json::to_value(snapshot(&map)).expect("Snapshot must serialize.");

	assert_eq!(json["state"], json!({ "state": "idle" }));
	assert_eq!(json["base_visible"], false);
	assert_eq!(json["radius"], 40);
	assert_eq!(map.backend().visible_marker_count(), 0);

	let _ = shutdown.send(());
}
