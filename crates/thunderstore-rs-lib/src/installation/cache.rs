//! The download cache.
//! 
//! # Layout
//! - `<root>/<full name>/<version>.zip` - the downloaded archive, only present until extracted.
//! - `<root>/<full name>/<version>/` - the extracted package.
//! 
//! No hashes are kept or checked. An extracted directory that can be listed is a cache hit.
//! 
//! The cache is not locked, only one downloader should use a root at a time.

use std::path::{Path, PathBuf};

use crate::relationship_resolver::Combo;
use super::content::{ArchiveExtractor, ContentError};
use super::download::DownloadError;

#[derive(Debug, Clone)]
pub struct DownloadCache {
	root: PathBuf,
}

impl DownloadCache {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn from_config(config: &crate::Config) -> Self {
		Self::new(config.cache_dir())
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn package_dir(&self, combo: &Combo) -> PathBuf {
		self.root.join(combo.full_name())
	}

	pub fn archive_path(&self, combo: &Combo) -> PathBuf {
		self.package_dir(combo).join(combo.version_number().to_string() + ".zip")
	}

	pub fn extracted_path(&self, combo: &Combo) -> PathBuf {
		self.package_dir(combo).join(combo.version_number().to_string())
	}

	/// Checks if the extracted package is present.
	pub async fn is_cached(&self, combo: &Combo<'_>) -> bool {
		tokio::fs::read_dir(self.extracted_path(combo)).await.is_ok()
	}

	/// Writes a downloaded archive into the cache and extracts it.
	/// 
	/// # Errors
	/// - [`CacheWrite`](DownloadError::CacheWrite) when creating the package directory or writing the archive fails.
	/// - [`Extract`](DownloadError::Extract) when `extractor` fails. Extraction runs on tokio's blocking pool.
	pub async fn store(&self, combo: &Combo<'_>, content: &[u8], extractor: &impl ArchiveExtractor) -> Result<(), DownloadError> {
		let archive = self.archive_path(combo);

		let write = async {
			tokio::fs::create_dir_all(self.package_dir(combo)).await?;
			tokio::fs::write(&archive, content).await?;
			Ok::<_, std::io::Error>(())
		};
		write.await.map_err(|source| DownloadError::CacheWrite { name: combo.full_name().to_string(), source })?;

		log::trace!("Wrote {} bytes to {}", content.len(), archive.display());

		let extractor = extractor.clone();
		let destination = self.extracted_path(combo);
		let extraction = tokio::task::spawn_blocking(move || extractor.extract_and_delete(&archive, &destination)).await;
		extraction
			.map_err(ContentError::from)
			.and_then(|r| r)
			.map_err(|source| DownloadError::Extract { name: combo.full_name().to_string(), source })
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::catalog::*;

	fn package() -> Package {
		Package {
			name: "Bar".to_string(),
			full_name: "Foo-Bar".to_string(),
			owner: "Foo".to_string(),
			categories: vec![],
			versions: vec![PackageVersion {
				name: "Bar".to_string(),
				full_name: "Foo-Bar-1.2.3".to_string(),
				version_number: VersionNumber::new(1, 2, 3),
				dependencies: vec![],
				download_url: String::new(),
			}],
		}
	}

	#[derive(Clone)]
	struct FailingExtractor;
	impl ArchiveExtractor for FailingExtractor {
		fn extract_and_delete(&self, _: &Path, _: &Path) -> Result<(), ContentError> {
			Err(std::io::Error::new(std::io::ErrorKind::Other, "extractor broke").into())
		}
	}

	/// Records the thread it extracts on.
	#[derive(Clone, Default)]
	struct ThreadRecorder(std::sync::Arc<std::sync::Mutex<Option<std::thread::ThreadId>>>);
	impl ArchiveExtractor for ThreadRecorder {
		fn extract_and_delete(&self, _: &Path, destination: &Path) -> Result<(), ContentError> {
			*self.0.lock().unwrap() = Some(std::thread::current().id());
			std::fs::create_dir_all(destination)?;
			Ok(())
		}
	}

	#[test]
	fn paths_follow_layout() {
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		let cache = DownloadCache::new("/mods/cache");
		assert_eq!(cache.archive_path(&combo), PathBuf::from("/mods/cache/Foo-Bar/1.2.3.zip"));
		assert_eq!(cache.extracted_path(&combo), PathBuf::from("/mods/cache/Foo-Bar/1.2.3"));
	}

	#[tokio::test]
	async fn extracted_directory_is_a_hit() {
		let dir = tempfile::tempdir().unwrap();
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		let cache = DownloadCache::new(dir.path());

		assert!(!cache.is_cached(&combo).await);
		std::fs::create_dir_all(cache.extracted_path(&combo)).unwrap();
		assert!(cache.is_cached(&combo).await);
	}

	#[tokio::test]
	async fn stray_archive_is_not_a_hit() {
		let dir = tempfile::tempdir().unwrap();
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		let cache = DownloadCache::new(dir.path());

		std::fs::create_dir_all(cache.package_dir(&combo)).unwrap();
		std::fs::write(cache.archive_path(&combo), b"half written").unwrap();
		assert!(!cache.is_cached(&combo).await);
	}

	#[tokio::test]
	async fn extraction_failure_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		let cache = DownloadCache::new(dir.path());

		let result = cache.store(&combo, b"zip", &FailingExtractor).await;
		assert!(matches!(result, Err(DownloadError::Extract { .. })));
		assert!(cache.archive_path(&combo).exists());
		assert!(!cache.is_cached(&combo).await);
	}

	#[tokio::test]
	async fn unwritable_cache_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		/* A file where the cache root should be makes every directory creation fail. */
		let root = dir.path().join("cache");
		std::fs::write(&root, b"").unwrap();
		let cache = DownloadCache::new(&root);

		let result = cache.store(&combo, b"zip", &FailingExtractor).await;
		assert!(matches!(result, Err(DownloadError::CacheWrite { .. })));
	}

	#[tokio::test]
	async fn extraction_runs_off_the_runtime_thread() {
		let dir = tempfile::tempdir().unwrap();
		let p = package();
		let combo = Combo::new(&p, &p.versions[0]);
		let cache = DownloadCache::new(dir.path());
		let recorder = ThreadRecorder::default();

		cache.store(&combo, b"zip", &recorder).await.unwrap();

		let extracted_on = recorder.0.lock().unwrap().expect("extractor should have run");
		assert_ne!(extracted_on, std::thread::current().id());
		assert!(cache.is_cached(&combo).await);
	}
}
