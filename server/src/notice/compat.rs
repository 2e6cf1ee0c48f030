//! Addon compatibility table and minimum supported version lookup

use super::version;

/// Addon releases mapped to the oldest addon version they remain compatible with.
///
/// Order matters: the lookup scans from the top and takes the first release
/// older than the installed one.
pub const ADDON_SUPPORTED_VERSIONS: &[(&str, &str)] = &[
	("4.1.6", "4.1.0"),
	("4.0.2", "4.0.0"),
	("3.9.4", "3.9.2"),
	("3.9.1", "3.9.0"),
	("3.8.5", "3.6.11"),
	("3.8.4", "3.6.10"),
	("3.8.2", "3.6.3"),
	("3.7.4", "3.6.2"),
	("3.7.3", "3.6.0"),
	("3.6.9", "3.5.8"),
	("3.6.7", "3.5.5"),
	("3.6.4", "3.5.0"),
	("3.4.8", "3.4.2"),
	("3.4.2", "3.4.0"),
	("3.3.3", "3.3.2"),
	("3.3.2", "3.3.1"),
	("3.3.1", "3.3.0"),
	("3.2.0", "3.1.0"),
	("3.0.3", "3.0.0"),
];

/// Minimum supported version for an installed addon version.
///
/// An installed version below `floor` short-circuits to the floor. Otherwise
/// an exact key match wins, then the first key (in table order) lower than
/// the installed version. `None` when nothing matches.
pub fn min_supported_version<'a>(
	table: &'a [(&'a str, &'a str)],
	installed: &str,
	floor: Option<&'a str>,
) -> Option<&'a str> {
	if let Some(floor) = floor
		&& version::is_lower(installed, floor)
	{
		return Some(floor);
	}

	if let Some((_, supported)) = table.iter().find(|(release, _)| *release == installed) {
		return Some(*supported);
	}

	table
		.iter()
		.find(|(release, _)| version::is_lower(release, installed))
		.map(|(_, supported)| *supported)
}

#[cfg(test)]
mod tests {
	use super::*;

	const SHORT_TABLE: &[(&str, &str)] = &[("4.1.6", "4.1.0"), ("4.0.2", "4.0.0")];

	#[test]
	fn test_exact_match() {
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "3.8.4", None), Some("3.6.10"));
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "4.1.6", None), Some("4.1.0"));
	}

	#[test]
	fn test_first_lower_release_in_table_order() {
		// 4.1.6 is newer than 4.0.5, so the scan settles on 4.0.2
		assert_eq!(min_supported_version(SHORT_TABLE, "4.0.5", None), Some("4.0.0"));
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "3.8.3", None), Some("3.6.3"));
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "5.0.0", None), Some("4.1.0"));
	}

	#[test]
	fn test_floor_short_circuits() {
		assert_eq!(min_supported_version(SHORT_TABLE, "4.0.5", Some("4.1.0")), Some("4.1.0"));
		// At or above the floor the table decides
		assert_eq!(min_supported_version(SHORT_TABLE, "4.0.5", Some("4.0.5")), Some("4.0.0"));
	}

	#[test]
	fn test_no_match() {
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "2.9.0", None), None);
		assert_eq!(min_supported_version(ADDON_SUPPORTED_VERSIONS, "3.0.3", None), Some("3.0.0"));
		assert_eq!(min_supported_version(&[], "1.0.0", None), None);
	}

	#[test]
	fn test_table_order_is_kept() {
		let releases: Vec<&str> = ADDON_SUPPORTED_VERSIONS.iter().map(|(r, _)| *r).collect();
		assert_eq!(releases.first(), Some(&"4.1.6"));
		assert_eq!(releases.last(), Some(&"3.0.3"));
		assert_eq!(releases.len(), 19);
	}
}

// vim: ts=4
