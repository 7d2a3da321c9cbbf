use std::collections::HashMap;

use super::*;
use crate::profile::InstalledEntry;

/// Finds the installed packages that have a different latest version in the catalog.
/// 
/// For each installed package the first listed version is taken as the latest and it's
/// [`Latest`](SelectionPolicy::Latest) dependency set is gathered. Everything found is merged by package,
/// a package found more than once keeps the last combo found for it. Only packages that are installed
/// and whose version differs from the installed version are returned.
/// 
/// Installed packages missing from the catalog are ignored.
pub fn plan_updates<'db>(installed: &[InstalledEntry], catalog: &'db Catalog) -> Vec<Combo<'db>> {
	let mut dependencies = Vec::<Combo>::new();
	for entry in installed {
		let package = match catalog.get_package(&entry.name) {
			Some(p) => p,
			None => {
				log::debug!("Installed package {} is not in the catalog.", entry.name);
				continue;
			},
		};
		let latest = match package.latest() {
			Some(v) => v,
			None => continue,
		};

		let combo = Combo::new(package, latest);
		dependencies = extend_dependency_set(combo, catalog, SelectionPolicy::Latest, dependencies);
		dependencies.push(combo);
	}

	/* Merged by first appearance, last write wins. */
	let mut merged = Vec::<Combo>::new();
	let mut positions = HashMap::<&str, usize>::new();
	for combo in dependencies {
		match positions.get(combo.full_name()).copied() {
			Some(i) => merged[i] = combo,
			None => {
				positions.insert(combo.full_name(), merged.len());
				merged.push(combo);
			},
		}
	}

	merged.into_iter().filter(|combo| {
		installed.iter()
			.find(|entry| entry.name == combo.full_name())
			.is_some_and(|entry| &entry.version != combo.version_number())
	}).collect()
}
