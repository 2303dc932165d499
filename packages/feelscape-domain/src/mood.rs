use serde::Serialize;

/// Emoji bucket for a sentiment score, most positive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
	SuperHappy,
	Happy,
	Neutral,
	Sad,
	SuperSad,
}
impl Mood {
	pub const ALL: [Mood; 5] = [Mood::SuperHappy, Mood::Happy, Mood::Neutral, Mood::Sad, Mood::SuperSad];

	pub fn as_str(self) -> &'static str {
		match self {
			Mood::SuperHappy => "super-happy",
			Mood::Happy => "happy",
			Mood::Neutral => "neutral",
			Mood::Sad => "sad",
			Mood::SuperSad => "super-sad",
		}
	}

	/// Marker icon asset for this bucket.
	pub fn icon_path(self) -> &'static str {
		match self {
			Mood::SuperHappy => "/emoji/super-happy.png",
			Mood::Happy => "/emoji/happy.png",
			Mood::Neutral => "/emoji/neutral.png",
			Mood::Sad => "/emoji/sad.png",
			Mood::SuperSad => "/emoji/super-sad.png",
		}
	}
}

/// Classifies a score read from a stored emotion record.
///
/// Stored scores are used as-is. Anything below 2, including non-finite input, is
/// [`Mood::SuperSad`].
pub fn classify_stored_score(score: f64) -> Mood {
	if score >= 6.0 {
		Mood::SuperHappy
	} else if score >= 5.0 {
		Mood::Happy
	} else if score >= 4.0 {
		Mood::Neutral
	} else if score >= 2.0 {
		Mood::Sad
	} else {
		Mood::SuperSad
	}
}

/// Maps a query score from the [-1, 1] sentiment range onto [0, 10].
pub fn normalize_query_score(score: f64) -> f64 {
	(score + 1.0) * 5.0
}

/// Classifies a score returned by the analysis service.
///
/// Query scores live on a different scale than stored scores, so they are normalized with
/// [`normalize_query_score`] before being bucketed against their own thresholds.
pub fn classify_query_score(score: f64) -> Mood {
	let normalized = normalize_query_score(score);

	if normalized >= 8.0 {
		Mood::SuperHappy
	} else if normalized >= 6.0 {
		Mood::Happy
	} else if normalized >= 4.0 {
		Mood::Neutral
	} else if normalized >= 2.0 {
		Mood::Sad
	} else {
		Mood::SuperSad
	}
}
