use super::*;

/// Finds every package `root` transitively depends on.
/// 
/// The returned set holds one combo per package in discovery order. the dependencies of a version
/// are all added before any of them are expanded. The first combo found for a package is kept,
/// later tokens naming the same package are dropped without being expanded which also stops cycles.
/// 
/// `root` itself is never part of the set, even when a dependency depends back on it.
/// 
/// # Parameters
/// - `root` - The package being installed.
/// - `catalog` - Packages available to satisfy dependencies.
/// - `policy` - How the version of each dependency is chosen.
pub fn build_dependency_set<'db>(root: Combo<'db>, catalog: &'db Catalog, policy: SelectionPolicy) -> Vec<Combo<'db>> {
	extend_dependency_set(root, catalog, policy, Vec::new())
}

/// Like [`build_dependency_set()`] but adds to an existing `set`.
/// 
/// Packages already in `set` count as found and are neither added again nor expanded.
pub fn extend_dependency_set<'db>(root: Combo<'db>, catalog: &'db Catalog, policy: SelectionPolicy, set: Vec<Combo<'db>>) -> Vec<Combo<'db>> {
	log::trace!("Building {:?} dependency set for {}", policy, root);
	expand(root.version, root.full_name(), catalog, policy, set)
}

fn expand<'db>(version: &'db PackageVersion, root: &str, catalog: &'db Catalog, policy: SelectionPolicy, mut set: Vec<Combo<'db>>) -> Vec<Combo<'db>> {
	let mut found = Vec::<Combo>::new();

	for token in version.dependencies() {
		let package = match catalog.find_dependency_provider(token) {
			Some(p) => p,
			None => {
				log::debug!("Dependency {} of {} is not in the catalog, skipping.", token, version.full_name);
				continue;
			},
		};

		let selected = match policy.select(package, token) {
			Some(v) => v,
			None => {
				log::debug!("Dependency {} of {} has no matching version, skipping.", token, version.full_name);
				continue;
			},
		};

		let already_added = package.full_name == root
			|| set.iter().chain(found.iter()).any(|c| c.full_name() == package.full_name);
		if already_added {
			continue;
		}

		found.push(Combo::new(package, selected));
	}

	set.extend(found.iter().copied());
	for combo in found {
		set = expand(combo.version, root, catalog, policy, set);
	}
	set
}
