//! Review records as supplied by the feed.

pub mod loader;

pub use loader::{FeedSource, ReviewLoader};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One review from the feed. Fields are consumed permissively: missing or
/// null strings become empty, other scalars are shown as written, and an
/// unusable `stars` value becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_stars")]
    pub stars: Option<f64>,
    #[serde(default, deserialize_with = "lenient_reply")]
    pub reply: Option<String>,
}

impl ReviewRecord {
    /// The reply text, if it has any non-whitespace content.
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Rating as displayed, e.g. "4.0". Absent ratings show as "0.0".
    pub fn rating_label(&self) -> String {
        format_rating(self.stars.unwrap_or(0.0))
    }
}

/// Format a rating with exactly one decimal place.
///
/// Matches decimal rounding of the exact binary value; exact ties
/// (4.25, 4.75, ...) round away from zero.
pub fn format_rating(stars: f64) -> String {
    let scaled = stars * 10.0;
    if (stars * 4.0).fract() == 0.0 && scaled.fract() != 0.0 {
        format!("{:.1}", scaled.round() / 10.0)
    } else {
        format!("{:.1}", stars)
    }
}

fn lenient_stars<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let stars = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    };
    Ok(stars)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(display_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_reply<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(display_text(Value::deserialize(deserializer)?))
}

/// Text shown for a feed value. Null has none; arrays and objects keep their JSON form.
fn display_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
