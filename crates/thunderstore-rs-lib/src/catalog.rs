//! # Catalog
//! 
//! An in-memory, read-only list of every package the registry offers.
//! 
//! Fetching the list is left to the caller, the catalog only needs the registry's
//! package list JSON which can be given with [`Catalog::from_json_str()`] or [`Catalog::load_from_file()`].

use std::path::Path;

use serde::{Serialize, Deserialize};

mod version_number;
pub use version_number::VersionNumber;

mod package_version;
pub use package_version::PackageVersion;
pub use package_version::is_token_for_package;

mod package;
pub use package::Package;
pub use package::MODPACK_CATEGORY;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
	packages: Vec<Package>,
}

impl Catalog {
	pub fn new(packages: Vec<Package>) -> Self {
		Self { packages }
	}

	/// # Errors
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the input isn't a package list.
	pub fn from_json_str(s: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	/// # Errors
	/// - [`IO`](crate::Error::IO) when opening the file.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't a package list.
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::io::BufReader::new(std::fs::File::open(path)?);
		Ok(serde_json::from_reader(file)?)
	}

	pub fn packages(&self) -> &[Package] {
		&self.packages
	}

	pub fn get_package(&self, full_name: &str) -> Option<&Package> {
		self.packages.iter().find(|p| p.full_name == full_name)
	}

	pub fn find_version(&self, full_name: &str, version: &VersionNumber) -> Option<(&Package, &PackageVersion)> {
		let package = self.get_package(full_name)?;
		package.get_version(version).map(|v| (package, v))
	}

	/// Finds the package a dependency token refers to.
	/// 
	/// The first package in catalog order whose `full_name` followed by `-` prefixes the token is returned.
	pub fn find_dependency_provider(&self, token: &str) -> Option<&Package> {
		self.packages.iter().find(|p| is_token_for_package(token, &p.full_name))
	}
}
