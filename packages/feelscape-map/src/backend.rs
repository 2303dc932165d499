use serde::Serialize;

use crate::Result;

/// Heatmap colour stops, transparent green through dark red.
pub const GRADIENT: [&str; 8] = [
	"rgba(0, 255, 0, 0)",
	"rgba(0, 255, 0, 1)",
	"rgba(173, 255, 47, 1)",
	"rgba(255, 255, 0, 1)",
	"rgba(255, 165, 0, 1)",
	"rgba(255, 69, 0, 1)",
	"rgba(255, 0, 0, 1)",
	"rgba(139, 0, 0, 1)",
];
pub const HEATMAP_OPACITY: f64 = 0.7;
pub const MARKER_ICON_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OverlayId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
	pub lat: f64,
	pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
	pub center: LatLng,
	pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPoint {
	pub position: LatLng,
	pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSpec {
	pub points: Vec<WeightedPoint>,
	pub radius: u32,
	pub opacity: f64,
	pub gradient: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
	pub position: LatLng,
	pub title: String,
	pub icon: &'static str,
	pub icon_size: u32,
	/// Text shown when the marker is clicked.
	pub info: String,
}

/// The interactive map widget.
///
/// Overlays are created visible. Removing or hiding an unknown overlay is a no-op.
pub trait MapBackend {
	fn create_map(&mut self, options: &MapOptions) -> Result<()>;

	fn add_heatmap_layer(&mut self, spec: HeatmapSpec) -> Result<OverlayId>;

	fn add_marker(&mut self, spec: MarkerSpec) -> Result<OverlayId>;

	/// Attaches the places search box to the map.
	fn create_search_box(&mut self) -> Result<()>;

	fn remove_overlay(&mut self, id: OverlayId);

	fn set_overlay_visible(&mut self, id: OverlayId, visible: bool);

	fn set_heatmap_radius(&mut self, id: OverlayId, radius: u32);

	fn focus(&mut self, center: LatLng, zoom: u8);
}
