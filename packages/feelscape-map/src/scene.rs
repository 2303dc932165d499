use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
	Error, Result,
	backend::{HeatmapSpec, LatLng, MapBackend, MapOptions, MarkerSpec, OverlayId},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
	pub center: LatLng,
	pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
	Heatmap { spec: HeatmapSpec, visible: bool },
	Marker { spec: MarkerSpec, visible: bool },
}

/// A map widget that only records what would be drawn.
#[derive(Debug, Default, Serialize)]
pub struct SceneBackend {
	view: Option<View>,
	search_box: bool,
	overlays: BTreeMap<OverlayId, Overlay>,
	#[serde(skip)]
	next_id: u64,
}
impl SceneBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn view(&self) -> Option<&View> {
		self.view.as_ref()
	}

	pub fn has_search_box(&self) -> bool {
		self.search_box
	}

	pub fn heatmaps(&self) -> impl Iterator<Item = (OverlayId, &HeatmapSpec, bool)> {
		self.overlays.iter().filter_map(|(id, overlay)| match overlay {
			Overlay::Heatmap { spec, visible } => Some((*id, spec, *visible)),
			Overlay::Marker { .. } => None,
		})
	}

	pub fn markers(&self) -> impl Iterator<Item = (OverlayId, &MarkerSpec, bool)> {
		self.overlays.iter().filter_map(|(id, overlay)| match overlay {
			Overlay::Marker { spec, visible } => Some((*id, spec, *visible)),
			Overlay::Heatmap { .. } => None,
		})
	}

	pub fn heatmap_count(&self) -> usize {
		self.heatmaps().count()
	}

	pub fn marker_count(&self) -> usize {
		self.markers().count()
	}

	pub fn visible_marker_count(&self) -> usize {
		self.markers().filter(|(_, _, visible)| *visible).count()
	}

	fn insert(&mut self, overlay: Overlay) -> Result<OverlayId> {
		if self.view.is_none() {
			return Err(Error::MapNotCreated);
		}

		let id = OverlayId(self.next_id);

		self.next_id += 1;
		self.overlays.insert(id, overlay);

		Ok(id)
	}
}
impl MapBackend for SceneBackend {
	fn create_map(&mut self, options: &MapOptions) -> Result<()> {
		self.view = Some(View { center: options.center, zoom: options.zoom });

		Ok(())
	}

	fn add_heatmap_layer(&mut self, spec: HeatmapSpec) -> Result<OverlayId> {
		self.insert(Overlay::Heatmap { spec, visible: true })
	}

	fn add_marker(&mut self, spec: MarkerSpec) -> Result<OverlayId> {
		self.insert(Overlay::Marker { spec, visible: true })
	}

	fn create_search_box(&mut self) -> Result<()> {
		if self.view.is_none() {
			return Err(Error::MapNotCreated);
		}

		self.search_box = true;

		Ok(())
	}

	fn remove_overlay(&mut self, id: OverlayId) {
		self.overlays.remove(&id);
	}

	fn set_overlay_visible(&mut self, id: OverlayId, visible: bool) {
		let Some(overlay) = self.overlays.get_mut(&id) else {
			return;
		};

		match overlay {
			Overlay::Heatmap { visible: current, .. } | Overlay::Marker { visible: current, .. } =>
				*current = visible,
		}
	}

	fn set_heatmap_radius(&mut self, id: OverlayId, radius: u32) {
		if let Some(Overlay::Heatmap { spec, .. }) = self.overlays.get_mut(&id) {
			spec.radius = radius;
		}
	}

	fn focus(&mut self, center: LatLng, zoom: u8) {
		self.view = Some(View { center, zoom });
	}
}
