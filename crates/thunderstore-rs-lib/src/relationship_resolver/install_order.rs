use super::*;

/// `a` installs after `b` when one of `a`'s dependency tokens names `b`'s package.
pub fn installs_after(a: &Combo, b: &Combo) -> std::cmp::Ordering {
	if a.version.depends_on(b.full_name()) {
		std::cmp::Ordering::Greater
	} else {
		std::cmp::Ordering::Less
	}
}

/// Orders `combos` so that packages tend to come after the packages they depend on.
/// 
/// This is an insertion sort driven by [`installs_after()`], which only compares two combos at a time.
/// It is not a topological sort, a dependency reached through a package in between may still
/// come later in the list. Nothing here relies on the order being complete.
pub fn sort_dependency_order(combos: &mut [Combo]) {
	/* XXX: `installs_after` is not a total order so `slice::sort_by` is not an option, it may panic on inconsistent orderings. */
	for i in 1..combos.len() {
		let mut j = i;
		while j > 0 && installs_after(&combos[j - 1], &combos[j]) == std::cmp::Ordering::Greater {
			combos.swap(j - 1, j);
			j -= 1;
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn package(full_name: &str, deps: &[&str]) -> Package {
		Package {
			name: full_name.to_string(),
			full_name: full_name.to_string(),
			owner: String::new(),
			categories: vec![],
			versions: vec![PackageVersion {
				name: full_name.to_string(),
				full_name: format!("{}-1.0.0", full_name),
				version_number: VersionNumber::new(1, 0, 0),
				dependencies: deps.iter().map(|d| d.to_string()).collect(),
				download_url: String::new(),
			}],
		}
	}

	fn sorted(packages: &[Package]) -> Vec<&str> {
		let mut combos: Vec<_> = packages.iter().map(|p| Combo::new(p, &p.versions[0])).collect();
		sort_dependency_order(&mut combos);
		combos.iter().map(|c| c.full_name()).collect()
	}

	#[test]
	fn dependency_moves_before_dependant() {
		let packages = [package("A-A", &["B-B-1.0.0"]), package("B-B", &[])];
		assert_eq!(sorted(&packages), ["B-B", "A-A"]);
	}

	#[test]
	fn independent_packages_keep_their_order() {
		let packages = [package("A-A", &[]), package("B-B", &[]), package("C-C", &[])];
		assert_eq!(sorted(&packages), ["A-A", "B-B", "C-C"]);
	}

	#[test]
	fn dependency_moves_past_several_dependants() {
		let packages = [package("A-A", &["C-C-1.0.0"]), package("B-B", &["C-C-1.0.0"]), package("C-C", &[])];
		assert_eq!(sorted(&packages), ["C-C", "A-A", "B-B"]);
	}

	#[test]
	fn only_neighbouring_pairs_are_ordered() {
		/* B needs C but C stops as soon as it meets A which doesn't depend on it. */
		let packages = [package("A-A", &["B-B-1.0.0"]), package("B-B", &["C-C-1.0.0"]), package("C-C", &[])];
		assert_eq!(sorted(&packages), ["B-B", "A-A", "C-C"]);
	}

	#[test]
	fn empty_and_single_lists_are_untouched() {
		assert!(sorted(&[]).is_empty());
		assert_eq!(sorted(&[package("A-A", &["A-A-1.0.0"])]), ["A-A"]);
	}
}
