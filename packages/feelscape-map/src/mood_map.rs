use serde::Serialize;

use feelscape_domain::{
	EmotionRecord, Mood, QueryResultPoint, ScoredPoint, classify_query_score,
	classify_stored_score,
};

use crate::{
	Error, MapBackend, RelayClient, Result,
	backend::{
		GRADIENT, HEATMAP_OPACITY, HeatmapSpec, LatLng, MARKER_ICON_SIZE, MapOptions, MarkerSpec,
		OverlayId, WeightedPoint,
	},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
	pub center: LatLng,
	pub zoom: u8,
	pub focus_zoom: u8,
	pub initial_radius: u32,
	pub min_radius: u32,
	pub max_radius: u32,
}
impl MapSettings {
	pub fn from_config(cfg: &feelscape_config::Client) -> Self {
		Self {
			center: LatLng { lat: cfg.center_lat, lng: cfg.center_lng },
			zoom: cfg.zoom,
			focus_zoom: cfg.focus_zoom,
			initial_radius: cfg.radius.initial,
			min_radius: cfg.radius.min,
			max_radius: cfg.radius.max,
		}
	}
}
impl Default for MapSettings {
	fn default() -> Self {
		Self::from_config(&feelscape_config::Client::default())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
	Idle,
	Searching { query: String },
}

/// A heatmap layer together with the emoji markers drawn for the same points.
#[derive(Debug)]
struct LayerGroup {
	heatmap: OverlayId,
	markers: Vec<OverlayId>,
}
impl LayerGroup {
	fn overlays(&self) -> impl Iterator<Item = OverlayId> + '_ {
		std::iter::once(self.heatmap).chain(self.markers.iter().copied())
	}
}

/// Rendering state of one map instance.
pub struct MoodMap<B> {
	backend: B,
	settings: MapSettings,
	radius: u32,
	base: Option<LayerGroup>,
	base_visible: bool,
	query: Option<LayerGroup>,
	state: SearchState,
}
impl<B> MoodMap<B>
where
	B: MapBackend,
{
	/// Creates the map widget centred on the configured default view and attaches the places
	/// search box. A search box failure is logged and ignored.
	pub fn new(mut backend: B, settings: MapSettings) -> Result<Self> {
		if settings.min_radius > settings.max_radius {
			return Err(Error::InvalidSettings {
				message: format!(
					"min_radius {} exceeds max_radius {}.",
					settings.min_radius, settings.max_radius
				),
			});
		}

		backend.create_map(&MapOptions { center: settings.center, zoom: settings.zoom })?;

		if let Err(err) = backend.create_search_box() {
			tracing::warn!(error = %err, "Failed to attach the places search box.");
		}

		let radius = settings.initial_radius.clamp(settings.min_radius, settings.max_radius);

		Ok(Self {
			backend,
			settings,
			radius,
			base: None,
			base_visible: true,
			query: None,
			state: SearchState::Idle,
		})
	}

	/// Draws the base layer from stored records, replacing any previous one.
	///
	/// Records without a usable latitude, longitude and score are skipped. Returns the number of
	/// points drawn; zero points means no base layer.
	pub fn load_records(&mut self, records: &[EmotionRecord]) -> Result<usize> {
		let points: Vec<ScoredPoint> = records.iter().filter_map(EmotionRecord::to_point).collect();
		let dropped = records.len() - points.len();

		if dropped > 0 {
			tracing::debug!(dropped, "Skipped records without coordinates or score.");
		}

		if let Some(base) = self.base.take() {
			self.dispose(base);
		}
		if !points.is_empty() {
			let group = self.draw_group(&points, classify_stored_score)?;

			self.base = Some(group);
			self.base_visible = true;
			self.focus_on(&points[0]);
		}

		Ok(points.len())
	}

	/// Fetches stored records from the data relay and draws them. Fetch failures draw nothing.
	pub async fn load_from(&mut self, relay: &RelayClient) -> Result<usize> {
		let records = relay.fetch_records().await;

		self.load_records(&records)
	}

	/// Replaces the query layer with one built from `results`.
	///
	/// An empty or fully unusable result set leaves the map and the search state as they were.
	/// Otherwise the previous query layer and its markers are removed before anything new is
	/// drawn. If drawing fails part way the map is left without a query layer and the state
	/// returns to `Idle`. Returns the number of points drawn.
	pub fn show_query_results(
		&mut self,
		query: &str,
		results: &[QueryResultPoint],
	) -> Result<usize> {
		let points: Vec<ScoredPoint> =
			results.iter().filter_map(QueryResultPoint::to_point).collect();

		if points.is_empty() {
			tracing::warn!(query, received = results.len(), "No renderable query points.");

			return Ok(0);
		}

		if let Some(previous) = self.query.take() {
			self.dispose(previous);
		}

		let group = match self.draw_group(&points, classify_query_score) {
			Ok(group) => group,
			Err(err) => {
				self.state = SearchState::Idle;

				return Err(err);
			},
		};

		self.query = Some(group);
		self.state = SearchState::Searching { query: query.to_string() };
		self.focus_on(&points[0]);

		tracing::info!(query, count = points.len(), "Rendered query points.");

		Ok(points.len())
	}

	/// Submits `text` to the query relay and renders the response.
	///
	/// Blank text is ignored without a request. Fetch failures are logged and render nothing.
	pub async fn search(&mut self, relay: &RelayClient, text: &str) -> Result<usize> {
		let Some(query) = prepare_query(text) else {
			return Ok(0);
		};
		let results = relay.fetch_query(query).await;

		self.show_query_results(query, &results)
	}

	/// Tears down the query layer and returns to the base view.
	pub fn dismiss_query(&mut self) {
		if let Some(query) = self.query.take() {
			self.dispose(query);
		}

		self.state = SearchState::Idle;

		if let Some(base) = &self.base {
			let visible = self.base_visible;
			let overlays: Vec<OverlayId> = base.overlays().collect();

			for id in overlays {
				self.backend.set_overlay_visible(id, visible);
			}
		}
	}

	/// Flips visibility of the base heatmap and its markers. Returns the new visibility, or
	/// `None` when there is no base layer.
	pub fn toggle_base(&mut self) -> Option<bool> {
		let base = self.base.as_ref()?;
		let visible = !self.base_visible;

		for id in base.overlays() {
			self.backend.set_overlay_visible(id, visible);
		}

		self.base_visible = visible;

		Some(visible)
	}

	/// Sets the heatmap radius on every existing layer. Values are clamped to the configured
	/// range; the applied radius is returned.
	pub fn set_radius(&mut self, radius: u32) -> u32 {
		let radius = radius.clamp(self.settings.min_radius, self.settings.max_radius);

		self.radius = radius;

		for group in [&self.base, &self.query].into_iter().flatten() {
			self.backend.set_heatmap_radius(group.heatmap, radius);
		}

		radius
	}

	pub fn state(&self) -> &SearchState {
		&self.state
	}

	pub fn is_searching(&self) -> bool {
		matches!(self.state, SearchState::Searching { .. })
	}

	pub fn radius(&self) -> u32 {
		self.radius
	}

	pub fn base_visible(&self) -> bool {
		self.base_visible
	}

	pub fn has_base_layer(&self) -> bool {
		self.base.is_some()
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	pub fn into_backend(self) -> B {
		self.backend
	}

	fn draw_group(
		&mut self,
		points: &[ScoredPoint],
		classify: fn(f64) -> Mood,
	) -> Result<LayerGroup> {
		let heatmap = self.backend.add_heatmap_layer(HeatmapSpec {
			points: points
				.iter()
				.map(|point| WeightedPoint { position: position(point), weight: point.score })
				.collect(),
			radius: self.radius,
			opacity: HEATMAP_OPACITY,
			gradient: &GRADIENT,
		})?;
		let mut markers = Vec::with_capacity(points.len());

		for point in points {
			let spec = MarkerSpec {
				position: position(point),
				title: format!("Score: {}", point.score),
				icon: classify(point.score).icon_path(),
				icon_size: MARKER_ICON_SIZE,
				info: format!("Location: {}\nScore: {}", point.location_label(), point.score),
			};

			match self.backend.add_marker(spec) {
				Ok(id) => markers.push(id),
				Err(err) => {
					self.dispose(LayerGroup { heatmap, markers });

					return Err(err);
				},
			}
		}

		Ok(LayerGroup { heatmap, markers })
	}

	fn dispose(&mut self, group: LayerGroup) {
		for id in group.overlays() {
			self.backend.remove_overlay(id);
		}
	}

	fn focus_on(&mut self, point: &ScoredPoint) {
		self.backend.focus(position(point), self.settings.focus_zoom);
	}
}

/// Trimmed query text, or `None` when there is nothing to search for.
pub fn prepare_query(text: &str) -> Option<&str> {
	let query = text.trim();

	(!query.is_empty()).then_some(query)
}

fn position(point: &ScoredPoint) -> LatLng {
	LatLng { lat: point.latitude, lng: point.longitude }
}
