use thunderstore_rs::relationship_resolver::*;
use thunderstore_rs::Catalog;

const PACKAGE_LIST: &str = r#"[
	{
		"name": "R2API",
		"full_name": "tristanmcpherson-R2API",
		"owner": "tristanmcpherson",
		"categories": ["Libraries"],
		"versions": [
			{
				"name": "R2API",
				"full_name": "tristanmcpherson-R2API-4.4.1",
				"version_number": "4.4.1",
				"dependencies": ["RiskofThunder-R2API_Core-5.0.6", "RiskofThunder-HookGenPatcher-1.2.3", "Someone-Deleted-1.0.0"],
				"download_url": "https://registry.test/package/download/tristanmcpherson/R2API/4.4.1/"
			}
		]
	},
	{
		"name": "R2API_Core",
		"full_name": "RiskofThunder-R2API_Core",
		"owner": "RiskofThunder",
		"categories": ["Libraries"],
		"versions": [
			{
				"name": "R2API_Core",
				"full_name": "RiskofThunder-R2API_Core-5.0.7",
				"version_number": "5.0.7",
				"dependencies": ["bbepis-BepInExPack-5.4.2117"],
				"download_url": "https://registry.test/package/download/RiskofThunder/R2API_Core/5.0.7/"
			},
			{
				"name": "R2API_Core",
				"full_name": "RiskofThunder-R2API_Core-5.0.6",
				"version_number": "5.0.6",
				"dependencies": ["bbepis-BepInExPack-5.4.2113"],
				"download_url": "https://registry.test/package/download/RiskofThunder/R2API_Core/5.0.6/"
			}
		]
	},
	{
		"name": "HookGenPatcher",
		"full_name": "RiskofThunder-HookGenPatcher",
		"owner": "RiskofThunder",
		"categories": ["Libraries"],
		"versions": [
			{
				"name": "HookGenPatcher",
				"full_name": "RiskofThunder-HookGenPatcher-1.2.3",
				"version_number": "1.2.3",
				"dependencies": ["bbepis-BepInExPack-5.4.2113"],
				"download_url": "https://registry.test/package/download/RiskofThunder/HookGenPatcher/1.2.3/"
			}
		]
	},
	{
		"name": "BepInExPack",
		"full_name": "bbepis-BepInExPack",
		"owner": "bbepis",
		"categories": ["Libraries"],
		"versions": [
			{
				"name": "BepInExPack",
				"full_name": "bbepis-BepInExPack-5.4.2117",
				"version_number": "5.4.2117",
				"download_url": "https://registry.test/package/download/bbepis/BepInExPack/5.4.2117/"
			},
			{
				"name": "BepInExPack",
				"full_name": "bbepis-BepInExPack-5.4.2113",
				"version_number": "5.4.2113",
				"download_url": "https://registry.test/package/download/bbepis/BepInExPack/5.4.2113/"
			}
		]
	}
]"#;

fn resolve(policy: SelectionPolicy) -> Vec<String> {
	let catalog = Catalog::from_json_str(PACKAGE_LIST).expect("package list should parse");
	let r2api = catalog.get_package("tristanmcpherson-R2API").expect("R2API should be in the catalog");
	let root = Combo::new(r2api, r2api.latest().expect("R2API should have a version"));

	let mut dependencies = build_dependency_set(root, &catalog, policy);
	sort_dependency_order(&mut dependencies);
	dependencies.iter().map(|c| c.to_string()).collect()
}

#[test]
fn resolve_exact_dependencies() {
	assert_eq!(resolve(SelectionPolicy::Exact), [
		"bbepis-BepInExPack-5.4.2113",
		"RiskofThunder-R2API_Core-5.0.6",
		"RiskofThunder-HookGenPatcher-1.2.3",
	]);
}

#[test]
fn resolve_latest_dependencies() {
	assert_eq!(resolve(SelectionPolicy::Latest), [
		"bbepis-BepInExPack-5.4.2117",
		"RiskofThunder-R2API_Core-5.0.7",
		"RiskofThunder-HookGenPatcher-1.2.3",
	]);
}
