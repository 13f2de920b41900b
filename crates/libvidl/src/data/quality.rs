//! Module for the user-facing quality selector and its format-expression mapping

use std::{
	fmt,
	str::FromStr,
};

/// Quality choice for a download request, mapped to a youtube-dl format-selection expression.
///
/// The mapping is a fixed lookup, see [`QualitySelector::format_expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualitySelector {
	/// Best combined video+audio available, prefer mp4 containers
	Best,
	/// Best audio, extracted and converted to mp3
	AudioOnly,
	/// Best combined video+audio with a vertical-resolution ceiling (like 720 for "720p")
	MaxHeight(u16),
}

impl QualitySelector {
	/// Get the `-f` format-selection expression for this selector
	#[must_use]
	pub fn format_expression(&self) -> String {
		return match self {
			Self::Best => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_owned(),
			Self::AudioOnly => "bestaudio".to_owned(),
			Self::MaxHeight(height) => {
				format!("bestvideo[height<={height}][ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best")
			},
		};
	}

	/// Get whether this selector requires the audio-extraction arguments (`-x --audio-format mp3`)
	#[must_use]
	pub fn is_audio_only(&self) -> bool {
		return matches!(self, Self::AudioOnly);
	}
}

impl Default for QualitySelector {
	fn default() -> Self {
		return Self::Best;
	}
}

impl fmt::Display for QualitySelector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		return match self {
			Self::Best => write!(f, "best"),
			Self::AudioOnly => write!(f, "audio"),
			Self::MaxHeight(height) => write!(f, "{height}p"),
		};
	}
}

impl FromStr for QualitySelector {
	// String, because this is primarily used by the clap value parser
	type Err = String;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let lower = input.trim().to_lowercase();

		match lower.as_str() {
			"best" => return Ok(Self::Best),
			"audio" | "audio-only" | "audioonly" => return Ok(Self::AudioOnly),
			_ => (),
		}

		// accept both "720p" and a plain "720"
		let digits = lower.strip_suffix('p').unwrap_or(&lower);

		return match digits.parse::<u16>() {
			Ok(height) if height > 0 => Ok(Self::MaxHeight(height)),
			_ => Err(format!(
				"Invalid quality \"{input}\", expected \"best\", \"audio\" or a height like \"720p\""
			)),
		};
	}
}
