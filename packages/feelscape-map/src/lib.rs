//! Map client for the mood map.
//!
//! [`MoodMap`] owns the rendering state: the base layer built from stored records, at most one
//! query layer, the shared heatmap radius and the base-layer visibility toggle. Drawing goes
//! through the [`MapBackend`] trait so the state machine runs without a browser; [`SceneBackend`]
//! is the in-memory implementation. [`RelayClient`] talks to the two relays.

pub mod backend;
pub mod mood_map;
pub mod relay;
pub mod scene;

mod error;

pub use backend::{
	GRADIENT, HeatmapSpec, LatLng, MapBackend, MapOptions, MarkerSpec, OverlayId, WeightedPoint,
};
pub use error::{Error, Result};
pub use mood_map::{MapSettings, MoodMap, SearchState, prepare_query};
pub use relay::RelayClient;
pub use scene::SceneBackend;
