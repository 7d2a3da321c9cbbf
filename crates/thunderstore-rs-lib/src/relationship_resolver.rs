//! Utilities for getting the set of packages required to install a package.
//! 
//! # Usage
//! 1. [`build_dependency_set()`] for the package being installed, choosing a [`SelectionPolicy`].
//! 1. [`sort_dependency_order()`] to get an install order.
//! 1. Or use [`plan_updates()`] to get the installed packages with newer versions available.
//! 
//! Dependency tokens naming packages that aren't in the catalog are skipped, not reported.

use crate::catalog::*;

mod dependency_set;
pub use dependency_set::build_dependency_set;
pub use dependency_set::extend_dependency_set;

mod install_order;
pub use install_order::sort_dependency_order;
pub use install_order::installs_after;

mod update_planner;
pub use update_planner::plan_updates;

/// A package paired with one of it's versions.
/// 
/// Two combos are the same package when their package full names match, whatever their versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo<'db> {
	pub package: &'db Package,
	pub version: &'db PackageVersion,
}

impl<'db> Combo<'db> {
	pub fn new(package: &'db Package, version: &'db PackageVersion) -> Self {
		Self { package, version }
	}

	pub fn full_name(&self) -> &'db str {
		&self.package.full_name
	}

	pub fn version_number(&self) -> &'db VersionNumber {
		&self.version.version_number
	}

	pub fn is_same_package(&self, other: &Combo) -> bool {
		self.package.full_name == other.package.full_name
	}
}

impl std::fmt::Display for Combo<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-{}", self.package.full_name, self.version.version_number)
	}
}

/// How a dependency token is turned into a concrete version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
	/// Use the version written in the token, skipping the token if that version isn't published.
	Exact,
	/// Ignore the version in the token and use the newest published version.
	Latest,
}

impl SelectionPolicy {
	/// Modpacks pin their dependencies, everything else gets the newest dependencies.
	pub fn for_package(package: &Package) -> Self {
		if package.is_modpack() {
			SelectionPolicy::Exact
		} else {
			SelectionPolicy::Latest
		}
	}

	/// Picks the version of `package` that `token` resolves to.
	fn select<'db>(&self, package: &'db Package, token: &str) -> Option<&'db PackageVersion> {
		match self {
			SelectionPolicy::Exact => {
				let version = token
					.strip_prefix(package.full_name.as_str())
					.and_then(|rest| rest.strip_prefix('-'))?;
				let version = VersionNumber::parse(version).ok()?;
				package.get_version(&version)
			},
			SelectionPolicy::Latest => package.newest(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn version(full_name: &str, version: &str) -> PackageVersion {
		PackageVersion {
			name: full_name.to_string(),
			full_name: format!("{}-{}", full_name, version),
			version_number: VersionNumber::parse(version).unwrap(),
			dependencies: vec![],
			download_url: String::new(),
		}
	}

	fn package(categories: &[&str]) -> Package {
		Package {
			name: "Bar".to_string(),
			full_name: "Foo-Bar".to_string(),
			owner: "Foo".to_string(),
			categories: categories.iter().map(|c| c.to_string()).collect(),
			versions: vec![version("Foo-Bar", "1.2.3"), version("Foo-Bar", "1.3.0")],
		}
	}

	#[test] fn exact_selects_token_version() { assert_eq!(SelectionPolicy::Exact.select(&package(&[]), "Foo-Bar-1.2.3").unwrap().version_number, VersionNumber::new(1, 2, 3)) }
	#[test] fn exact_skips_unpublished_version() { assert!(SelectionPolicy::Exact.select(&package(&[]), "Foo-Bar-1.2.4").is_none()) }
	#[test] fn exact_skips_unparsable_version() { assert!(SelectionPolicy::Exact.select(&package(&[]), "Foo-Bar-latest").is_none()) }
	#[test] fn latest_ignores_token_version() { assert_eq!(SelectionPolicy::Latest.select(&package(&[]), "Foo-Bar-1.2.3").unwrap().version_number, VersionNumber::new(1, 3, 0)) }
	#[test] fn modpacks_use_exact() { assert_eq!(SelectionPolicy::for_package(&package(&["Modpacks"])), SelectionPolicy::Exact) }
	#[test] fn mods_use_latest() { assert_eq!(SelectionPolicy::for_package(&package(&["Mods"])), SelectionPolicy::Latest) }

	#[test]
	fn combo_displays_name_and_version() {
		let p = package(&[]);
		assert_eq!(Combo::new(&p, &p.versions[0]).to_string(), "Foo-Bar-1.2.3");
	}

	#[test]
	fn combos_of_different_versions_are_same_package() {
		let p = package(&[]);
		assert!(Combo::new(&p, &p.versions[0]).is_same_package(&Combo::new(&p, &p.versions[1])));
	}
}
