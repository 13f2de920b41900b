//! Module for classifying yt-dlp output lines

use std::sync::LazyLock;

use regex::Regex;

/// Regex for progress lines, capturing the percentage
/// cap1: percentage (without trailing "%")
static DOWNLOAD_PERCENTAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?m)^\[download\]\s+([0-9]{1,3}(?:\.[0-9]+)?)%").unwrap();
});

/// Line types a yt-dlp invocation emits that are relayed as progress.
/// Lines not matching any variant are ignored.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LineType {
	/// Variant for a "[download]" line carrying a percentage
	Download,
	/// Variant for a "[ExtractAudio]" post-processing line
	ExtractAudio,
	/// Variant for a "[Merger]" post-processing line
	Merger,
}

impl LineType {
	/// Try to get the correct Variant for a input line
	/// Recognized in order: download percentage, audio extraction, stream merging
	pub fn try_from_line(input: &str) -> Option<Self> {
		if DOWNLOAD_PERCENTAGE_REGEX.is_match(input) {
			return Some(Self::Download);
		}

		if input.contains("[ExtractAudio]") {
			return Some(Self::ExtractAudio);
		}

		if input.contains("[Merger]") {
			return Some(Self::Merger);
		}

		return None;
	}

	/// Try to get the download percentage from the input
	/// Returns [`None`] if not a download line or the number does not parse
	pub fn try_get_download_percent(self, input: &str) -> Option<f64> {
		if self != Self::Download {
			return None;
		}

		let cap = DOWNLOAD_PERCENTAGE_REGEX.captures(input)?;

		return cap[1].parse::<f64>().ok();
	}
}

#[cfg(test)]
mod test {
	use super::*;

	mod try_from_line {
		use super::*;

		#[test]
		fn should_parse_download_lines() {
			let input = "[download]   0.0% of 78.44MiB at 207.76KiB/s ETA 06:27";
			assert_eq!(Some(LineType::Download), LineType::try_from_line(input));

			let input = "[download]  42.5% of 78.44MiB at 2.30MiB/s ETA 00:33";
			assert_eq!(Some(LineType::Download), LineType::try_from_line(input));

			let input = "[download] 100% of 78.44MiB in 00:38";
			assert_eq!(Some(LineType::Download), LineType::try_from_line(input));
		}

		#[test]
		fn should_ignore_download_lines_without_percentage() {
			let input = "[download] Destination: /tmp/some video.mp4";
			assert_eq!(None, LineType::try_from_line(input));

			let input = "[download] Downloading playlist: someplaylist";
			assert_eq!(None, LineType::try_from_line(input));
		}

		#[test]
		fn should_parse_postprocess_lines() {
			let input = "[ExtractAudio] Destination: /tmp/some audio.mp3";
			assert_eq!(Some(LineType::ExtractAudio), LineType::try_from_line(input));

			let input = "[Merger] Merging formats into \"/tmp/some video.mp4\"";
			assert_eq!(Some(LineType::Merger), LineType::try_from_line(input));
		}

		#[test]
		fn should_return_none_for_unknown_lines() {
			let input = "[youtube] someid: Downloading webpage";
			assert_eq!(None, LineType::try_from_line(input));

			let input = "Deleting original file some video.f616.mp4 (pass -k to keep)";
			assert_eq!(None, LineType::try_from_line(input));

			let input = "";
			assert_eq!(None, LineType::try_from_line(input));
		}
	}

	mod try_get_download_percent {
		use super::*;

		#[test]
		fn should_get_percentages() {
			let input = "[download]   0.0% of 78.44MiB at 207.76KiB/s ETA 06:27";
			assert_eq!(Some(0.0), LineType::Download.try_get_download_percent(input));

			let input = "[download]  42.5% of 78.44MiB at 2.30MiB/s ETA 00:33";
			assert_eq!(Some(42.5), LineType::Download.try_get_download_percent(input));

			let input = "[download] 100% of 78.44MiB in 00:38";
			assert_eq!(Some(100.0), LineType::Download.try_get_download_percent(input));
		}

		#[test]
		fn should_not_clamp_percentages_above_100() {
			// yt-dlp can report over 100% on streams with a wrong estimated size
			let input = "[download] 250.5% of ~31.24MiB at 2.30MiB/s ETA 00:33";
			assert_eq!(Some(250.5), LineType::Download.try_get_download_percent(input));
		}

		#[test]
		fn should_return_none_for_other_linetypes() {
			let input = "[download]  42.5% of 78.44MiB at 2.30MiB/s ETA 00:33";
			assert_eq!(None, LineType::Merger.try_get_download_percent(input));
			assert_eq!(None, LineType::ExtractAudio.try_get_download_percent(input));
		}

		#[test]
		fn should_return_none_without_percentage() {
			let input = "[download] Destination: /tmp/some video.mp4";
			assert_eq!(None, LineType::Download.try_get_download_percent(input));
		}
	}
}
