use serde::{Serialize, Deserialize};

use super::PackageVersion;
use super::VersionNumber;

/// The category marking a package as a modpack.
/// 
/// Modpacks pin their dependencies to the exact versions they list.
pub const MODPACK_CATEGORY: &str = "Modpacks";

/// A package in the registry and all of it's published versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
	pub name: String,
	/// `Namespace-Name`, unique within a [`Catalog`](super::Catalog).
	pub full_name: String,
	#[serde(default)]
	pub owner: String,
	#[serde(default)]
	pub categories: Vec<String>,
	/// Versions in the order the registry lists them, newest first by convention.
	pub versions: Vec<PackageVersion>,
}

impl Package {
	pub fn full_name(&self) -> &str {
		&self.full_name
	}

	pub fn versions(&self) -> &[PackageVersion] {
		&self.versions
	}

	pub fn is_modpack(&self) -> bool {
		self.categories.iter().any(|c| c == MODPACK_CATEGORY)
	}

	/// The first listed version.
	/// 
	/// The registry lists newest first, but this is not checked. Use [`newest()`](Package::newest()) to compare version numbers.
	pub fn latest(&self) -> Option<&PackageVersion> {
		self.versions.first()
	}

	/// The version with the greatest version number.
	/// 
	/// When two versions share a number the one listed later wins.
	pub fn newest(&self) -> Option<&PackageVersion> {
		self.versions.iter().reduce(|one, two| {
			if one.version_number().is_newer_than(two.version_number()) { one } else { two }
		})
	}

	pub fn get_version(&self, version: &VersionNumber) -> Option<&PackageVersion> {
		self.versions.iter().find(|v| v.version_number() == version)
	}
}
