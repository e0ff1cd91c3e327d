//! Batching configuration, read from the `[batching]` table of a TOML document.

use serde::Deserialize;

use crate::Result;


/// How a [`Batcher`](crate::Batcher) treats overlapping `run_all` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
	/// Windows opened through the same batcher never overlap.
	#[default]
	Serialized,
	/// Windows may nest; the host must reference-count pauses.
	Nested,
}

/// Batching options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
	/// Overlap policy for batching windows.
	pub policy: WindowPolicy,
}

#[derive(Deserialize)]
struct Document {
	#[serde(default)]
	batching: BatchConfig,
}

impl BatchConfig {
	/// Parses the `[batching]` table of `input`. Other tables are ignored and
	/// a missing table yields the defaults.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let document: Document = toml::from_str(input)?;
		Ok(document.batching)
	}
}
