//! Record shapes exchanged between the relays and the map client.
//!
//! Both relays pass documents through untouched, so field names drift between sources. Each
//! record kind carries its own alias list; the first alias holding a non-null value wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const STORED_LATITUDE: &[&str] = &["latitude", "Latitude"];
const STORED_LONGITUDE: &[&str] = &["longitude", "Longitude"];
const STORED_SCORE: &[&str] = &["Total_Score", "total_score", "totalScore"];
const QUERY_LATITUDE: &[&str] = &["latitude"];
const QUERY_LONGITUDE: &[&str] = &["longitude"];
const QUERY_SCORE: &[&str] = &["score", "Total_Score"];
const LOCATION: &str = "location";

/// A persisted, geolocated sentiment score as read from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionRecord(Value);
impl EmotionRecord {
	pub fn new(doc: Value) -> Self {
		Self(doc)
	}

	pub fn as_value(&self) -> &Value {
		&self.0
	}

	pub fn into_value(self) -> Value {
		self.0
	}

	pub fn location(&self) -> Option<&str> {
		location(&self.0)
	}

	pub fn latitude(&self) -> Option<f64> {
		lookup(&self.0, STORED_LATITUDE).and_then(parse_number)
	}

	pub fn longitude(&self) -> Option<f64> {
		lookup(&self.0, STORED_LONGITUDE).and_then(parse_number)
	}

	pub fn score(&self) -> Option<f64> {
		lookup(&self.0, STORED_SCORE).and_then(parse_number)
	}

	/// Render-ready projection, or `None` when any coordinate or the score is unusable.
	pub fn to_point(&self) -> Option<ScoredPoint> {
		ScoredPoint::from_parts(self.latitude(), self.longitude(), self.score(), self.location())
	}
}
impl From<Value> for EmotionRecord {
	fn from(doc: Value) -> Self {
		Self(doc)
	}
}

/// An ephemeral, geolocated sentiment score returned by the analysis service for one query.
///
/// The score is on the [-1, 1] scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResultPoint(Value);
impl QueryResultPoint {
	pub fn new(doc: Value) -> Self {
		Self(doc)
	}

	pub fn as_value(&self) -> &Value {
		&self.0
	}

	pub fn location(&self) -> Option<&str> {
		location(&self.0)
	}

	pub fn latitude(&self) -> Option<f64> {
		lookup(&self.0, QUERY_LATITUDE).and_then(parse_number)
	}

	pub fn longitude(&self) -> Option<f64> {
		lookup(&self.0, QUERY_LONGITUDE).and_then(parse_number)
	}

	pub fn score(&self) -> Option<f64> {
		lookup(&self.0, QUERY_SCORE).and_then(parse_number)
	}

	pub fn to_point(&self) -> Option<ScoredPoint> {
		ScoredPoint::from_parts(self.latitude(), self.longitude(), self.score(), self.location())
	}
}
impl From<Value> for QueryResultPoint {
	fn from(doc: Value) -> Self {
		Self(doc)
	}
}

/// A point with every field parsed to a finite number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPoint {
	pub latitude: f64,
	pub longitude: f64,
	/// Raw score; also the heatmap weight.
	pub score: f64,
	pub location: Option<String>,
}
impl ScoredPoint {
	fn from_parts(
		latitude: Option<f64>,
		longitude: Option<f64>,
		score: Option<f64>,
		location: Option<&str>,
	) -> Option<Self> {
		Some(Self {
			latitude: latitude?,
			longitude: longitude?,
			score: score?,
			location: location.map(str::to_string),
		})
	}

	pub fn location_label(&self) -> &str {
		self.location.as_deref().unwrap_or("Unknown")
	}
}

/// Parses a JSON number or numeric string into a finite float.
pub fn parse_number(value: &Value) -> Option<f64> {
	let number = match value {
		Value::Number(number) => number.as_f64()?,
		Value::String(raw) => raw.trim().parse::<f64>().ok()?,
		_ => return None,
	};

	number.is_finite().then_some(number)
}

fn lookup<'a>(doc: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
	aliases.iter().filter_map(|name| doc.get(*name)).find(|value| !value.is_null())
}

fn location(doc: &Value) -> Option<&str> {
	doc.get(LOCATION).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_numbers_and_numeric_strings() {
		assert_eq!(parse_number(&json!(12.5)), Some(12.5));
		assert_eq!(parse_number(&json!(" 77.2 ")), Some(77.2));
		assert_eq!(parse_number(&json!("-3")), Some(-3.0));
		assert_eq!(parse_number(&json!("abc")), None);
		assert_eq!(parse_number(&json!("NaN")), None);
		assert_eq!(parse_number(&json!("inf")), None);
		assert_eq!(parse_number(&json!(true)), None);
		assert_eq!(parse_number(&Value::Null), None);
	}

	#[test]
	fn first_non_null_alias_wins() {
		let doc = json!({ "latitude": null, "Latitude": "19.07" });

		assert_eq!(lookup(&doc, STORED_LATITUDE), Some(&json!("19.07")));

		let doc = json!({ "Total_Score": 0, "total_score": 9 });

		assert_eq!(lookup(&doc, STORED_SCORE), Some(&json!(0)));
	}

	#[test]
	fn zero_is_a_valid_coordinate() {
		let record = EmotionRecord::new(json!({ "latitude": 0, "longitude": 0, "Total_Score": 0 }));

		assert_eq!(
			record.to_point(),
			Some(ScoredPoint { latitude: 0.0, longitude: 0.0, score: 0.0, location: None })
		);
	}

	#[test]
	fn non_object_documents_have_no_fields() {
		let record = EmotionRecord::new(json!([1, 2, 3]));

		assert_eq!(record.to_point(), None);
		assert_eq!(record.location(), None);
	}
}
