//! Download behaviour settings.
//! 
//! The config is passed explicitly to anything that needs it, nothing here is global.

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Root of the managers data, the download cache lives in `<mod_root>/cache`.
	mod_root: PathBuf,
	/// Download packages even when an extracted copy is already in the cache.
	ignore_cache: bool,
	https_only: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			mod_root: Self::platform_data_dir().join("thunderstore-rs"),
			ignore_cache: false,
			https_only: true,
		}
	}
}

impl Config {
	/// Creates a config rooted at `mod_root` with every other setting left at its default.
	pub fn new(mod_root: impl Into<PathBuf>) -> Self {
		Self {
			mod_root: mod_root.into(),
			..Default::default()
		}
	}

	#[cfg(target_os = "windows")]
	fn platform_data_dir() -> PathBuf {
		std::env::var("APPDATA").map(PathBuf::from).unwrap_or_default()
	}

	#[cfg(not(target_os = "windows"))]
	fn platform_data_dir() -> PathBuf {
		if let Ok(e) = std::env::var("XDG_DATA_HOME") {
			PathBuf::from(e)
		} else {
			std::env::var("HOME").map(PathBuf::from).unwrap_or_default().join(".local/share")
		}
	}

	#[cfg(target_os = "windows")]
	fn platform_config_dir() -> PathBuf {
		Self::platform_data_dir()
	}

	#[cfg(not(target_os = "windows"))]
	fn platform_config_dir() -> PathBuf {
		if let Ok(e) = std::env::var("XDG_CONFIG_HOME") {
			PathBuf::from(e)
		} else {
			std::env::var("HOME").map(PathBuf::from).unwrap_or_default().join(".config")
		}
	}

	/// Where [`load_from_disk()`](Config::load_from_disk()) and [`save_to_disk()`](Config::save_to_disk()) keep the config.
	pub fn default_path() -> PathBuf {
		Self::platform_config_dir().join("thunderstore-rs").join("config.json")
	}

	/// Loads the config from the default location.
	/// 
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file is missing or unreadable.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't a valid config.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::default_path())
	}

	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(file)?)
	}

	/// Saves the config to the default location, creating parent directories as required.
	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::default_path())
	}

	pub fn save_to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		let path = path.as_ref();
		std::fs::create_dir_all(path.with_file_name(""))?;
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	/* Fields */

	pub fn mod_root(&self) -> &Path {
		&self.mod_root
	}
	pub fn set_mod_root(&mut self, mod_root: PathBuf) {
		self.mod_root = mod_root;
	}

	/// The download cache directory, `<mod_root>/cache`.
	pub fn cache_dir(&self) -> PathBuf {
		self.mod_root.join("cache")
	}

	pub fn ignore_cache(&self) -> bool {
		self.ignore_cache
	}
	pub fn set_ignore_cache(&mut self, ignore_cache: bool) {
		self.ignore_cache = ignore_cache;
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}
	pub fn set_https_only(&mut self, https_only: bool) {
		self.https_only = https_only;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test] fn cache_dir_is_under_mod_root() { assert_eq!(Config::new("/mods").cache_dir(), PathBuf::from("/mods/cache")) }
	#[test] fn new_config_uses_cache() { assert!(!Config::new("/mods").ignore_cache()) }

	#[test]
	fn config_survives_save_and_load() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("config.json");

		let mut config = Config::new(dir.path());
		config.set_ignore_cache(true);
		config.set_https_only(false);
		config.save_to_file(&path).unwrap();

		assert_eq!(Config::load_from_file(&path).unwrap(), config);
	}

	#[test]
	fn missing_fields_fall_back_to_defaults() {
		let config: Config = serde_json::from_str(r#"{ "mod_root": "/mods" }"#).unwrap();
		assert_eq!(config.mod_root(), Path::new("/mods"));
		assert!(config.https_only());
		assert!(!config.ignore_cache());
	}
}
