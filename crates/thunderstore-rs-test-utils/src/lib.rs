//! Helpers shared by the `thunderstore-rs` tests.
//! 
//! Catalogs are built in memory, archives are served by [`MockFetcher`] and the cache lives in a temporary directory.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use thunderstore_rs::catalog::*;
use thunderstore_rs::installation::fetch::{Fetcher, FetchError};
use thunderstore_rs::installation::{DownloadEvent, ItemStatus};
use thunderstore_rs::Config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("zip error: {0}")]
	Zip(#[from] zip::result::ZipError),
}

/// A config whose mod root is a fresh temporary directory.
/// 
/// The directory is deleted when the returned [`tempfile::TempDir`] is dropped.
pub fn temp_config() -> Result<(tempfile::TempDir, Config), Error> {
	let dir = tempfile::tempdir()?;
	let config = Config::new(dir.path());
	Ok((dir, config))
}

/// The url [`package()`] gives each version.
pub fn download_url(full_name: &str, version: &str) -> String {
	format!("https://registry.test/package/download/{}/{}/", full_name, version)
}

/// Creates a catalog package.
/// 
/// # Parameters
/// - `full_name` - `Namespace-Name` of the package.
/// - `categories` - Use `"Modpacks"` for a modpack.
/// - `versions` - Pairs of version string and dependency tokens, in the order the registry would list them.
/// 
/// # Panics
/// When a version string isn't `major.minor.patch`.
pub fn package(full_name: &str, categories: &[&str], versions: &[(&str, &[&str])]) -> Package {
	let name = full_name.split_once('-').map(|(_, n)| n).unwrap_or(full_name);
	Package {
		name: name.to_string(),
		full_name: full_name.to_string(),
		owner: full_name.split('-').next().unwrap_or_default().to_string(),
		categories: categories.iter().map(|c| c.to_string()).collect(),
		versions: versions.iter().map(|(version, dependencies)| PackageVersion {
			name: name.to_string(),
			full_name: format!("{}-{}", full_name, version),
			version_number: VersionNumber::parse(version).expect("test package version should be valid"),
			dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
			download_url: download_url(full_name, version),
		}).collect(),
	}
}

/// Builds a zip archive in memory.
pub fn zip_payload(files: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
	let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::<u8>::new()));
	for (name, content) in files {
		zip.start_file(*name, zip::write::FileOptions::default())?;
		zip.write_all(content.as_bytes())?;
	}
	Ok(zip.finish()?.into_inner())
}

/// An in-memory [`Fetcher`] serving canned responses and recording every request.
/// 
/// Progress is reported in four steps. Urls without a response fail with a 404.
#[derive(Debug, Default)]
pub struct MockFetcher {
	responses: HashMap<String, Result<Vec<u8>, String>>,
	requests: Mutex<Vec<String>>,
}

impl MockFetcher {
	pub fn new() -> Self {
		Default::default()
	}

	/// Serves a zip for every version in `catalog` containing a `manifest.json` with the version's full name.
	pub fn for_catalog(catalog: &Catalog) -> Result<Self, Error> {
		let mut fetcher = Self::new();
		for package in catalog.packages() {
			for version in package.versions() {
				let manifest = format!("{{\"name\": \"{}\"}}", version.full_name);
				let payload = zip_payload(&[("manifest.json", manifest.as_str())])?;
				fetcher = fetcher.with_response(&version.download_url, payload);
			}
		}
		Ok(fetcher)
	}

	pub fn with_response(mut self, url: &str, content: Vec<u8>) -> Self {
		self.responses.insert(url.to_string(), Ok(content));
		self
	}

	pub fn with_failure(mut self, url: &str, message: &str) -> Self {
		self.responses.insert(url.to_string(), Err(message.to_string()));
		self
	}

	/// Every url requested so far, in order.
	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().map(|r| r.clone()).unwrap_or_default()
	}
}

impl Fetcher for MockFetcher {
	async fn fetch(&self, url: &str, on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send)) -> Result<Vec<u8>, FetchError> {
		if let Ok(mut requests) = self.requests.lock() {
			requests.push(url.to_string());
		}

		match self.responses.get(url) {
			Some(Ok(content)) => {
				let total = content.len() as u64;
				for step in 1..=4 {
					on_progress(total * step / 4, Some(total));
				}
				Ok(content.clone())
			},
			Some(Err(message)) => Err(FetchError::Unavailable(message.clone())),
			None => Err(FetchError::HttpStatus { url: url.to_string(), status: 404 }),
		}
	}
}

/// Takes every event already sent on `events`.
pub fn collect_events<'db>(events: &mut tokio::sync::mpsc::UnboundedReceiver<DownloadEvent<'db>>) -> Vec<DownloadEvent<'db>> {
	let mut collected = Vec::new();
	while let Ok(event) = events.try_recv() {
		collected.push(event);
	}
	collected
}

/// The overall percentages of every progress event, in order.
pub fn percents(events: &[DownloadEvent]) -> Vec<f64> {
	events.iter().filter_map(|e| match e {
		DownloadEvent::Progress(p) => Some(p.percent),
		DownloadEvent::Complete(_) => None,
	}).collect()
}

/// `full_name-version` of every combo in each completion event.
pub fn completions(events: &[DownloadEvent]) -> Vec<Vec<String>> {
	events.iter().filter_map(|e| match e {
		DownloadEvent::Complete(combos) => Some(combos.iter().map(|c| c.to_string()).collect()),
		DownloadEvent::Progress(_) => None,
	}).collect()
}

/// Labels of the packages that reported a failure.
pub fn failures(events: &[DownloadEvent]) -> Vec<String> {
	events.iter().filter_map(|e| match e {
		DownloadEvent::Progress(p) if matches!(p.status, ItemStatus::Failure(_)) => Some(p.label.clone()),
		_ => None,
	}).collect()
}
