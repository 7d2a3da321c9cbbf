use serde::{Serialize, Deserialize};

use super::VersionNumber;

/// A single published version of a [`Package`](super::Package).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVersion {
	pub name: String,
	/// `Namespace-Name-Major.Minor.Patch`
	pub full_name: String,
	pub version_number: VersionNumber,
	/// Dependency tokens in the form `Namespace-Name-Major.Minor.Patch`.
	#[serde(default)]
	pub dependencies: Vec<String>,
	pub download_url: String,
}

impl PackageVersion {
	pub fn version_number(&self) -> &VersionNumber {
		&self.version_number
	}

	pub fn dependencies(&self) -> &[String] {
		&self.dependencies
	}

	/// Checks if any dependency token of this version names the package `package_full_name`, ignoring the version part.
	pub fn depends_on(&self, package_full_name: &str) -> bool {
		self.dependencies.iter().any(|d| is_token_for_package(d, package_full_name))
	}
}

/// Checks if `token` has the form `<package_full_name>-<anything>`.
pub fn is_token_for_package(token: &str, package_full_name: &str) -> bool {
	token.strip_prefix(package_full_name).is_some_and(|rest| rest.starts_with('-'))
}
