//! Downloads packages into the cache one at a time.
//!
//! # Events
//! Progress is reported as a stream of [`DownloadEvent`]s sent in order over an unbounded channel.
//! - [`Progress`](DownloadEvent::Progress) is sent many times per package with the overall percentage.
//! - [`Complete`](DownloadEvent::Complete) is sent once, only after every package succeeded.
//!   It is always preceded by exactly one [`Success`](ItemStatus::Success) progress at 100%.
//!
//! A failed package is reported with [`ItemStatus::Failure`] at 0% and the queue stops there.
//! Nothing is retried, it is up to the caller to start another download.

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::Catalog;
use crate::profile::{InstalledEntry, InstalledPackages};
use crate::relationship_resolver::*;
use super::cache::DownloadCache;
use super::content::{ArchiveExtractor, ContentError, ZipExtractor};
use super::fetch::{Fetcher, FetchError, HttpFetcher};

/// Why a single package failed to download.
#[derive(Debug, Error)]
pub enum DownloadError {
	#[error("failed to download mod {name}: {source}")]
	Fetch { name: String, source: FetchError },
	#[error("failed to write downloaded zip of {name} to the cache directory: {source}. try running with elevated permissions.")]
	CacheWrite { name: String, source: std::io::Error },
	#[error("failed to extract {name}: {source}")]
	Extract { name: String, source: ContentError },
	/// The profile's installed packages couldn't be read so no download was started.
	#[error("failed to get the installed package list: {0}")]
	InstalledList(crate::Error),
}

#[derive(Debug)]
pub enum ItemStatus {
	Pending,
	Success,
	Failure(DownloadError),
}

#[derive(Debug)]
pub struct Progress {
	/// Overall progress of the whole download from 0 to 100.
	pub percent: f64,
	/// Name of the package the update is about.
	pub label: String,
	pub status: ItemStatus,
}

#[derive(Debug)]
pub enum DownloadEvent<'db> {
	Progress(Progress),
	/// Every package is in the cache, in install order.
	Complete(Vec<Combo<'db>>),
}

pub type EventSender<'db> = UnboundedSender<DownloadEvent<'db>>;

fn emit<'db>(events: &EventSender<'db>, event: DownloadEvent<'db>) {
	if events.send(event).is_err() {
		log::trace!("Download event receiver dropped.");
	}
}

/// Combines the progress of the current item with the items already completed.
///
/// # Parameters
/// - `progress` - Progress of the current item from 0 to 100.
/// - `completed` - Number of items already completed.
/// - `total` - Number of slots the 100% is split between.
pub fn overall_percent(progress: f64, completed: usize, total: usize) -> f64 {
	/* Same as `completed / total * 100 + progress / total` but exact when the last item finishes. */
	((completed as f64 * 100.0 + progress) / total as f64).min(100.0)
}

/// Drives packages through fetch, cache write and extraction.
pub struct Downloader<F, X> {
	cache: DownloadCache,
	ignore_cache: bool,
	fetcher: F,
	extractor: X,
}

impl Downloader<HttpFetcher, ZipExtractor> {
	/// Creates a downloader fetching over HTTP and extracting zips.
	///
	/// # Errors
	/// - [`Reqwest`](FetchError::Reqwest) when the HTTP client can't be built.
	pub fn from_config(config: &crate::Config) -> Result<Self, FetchError> {
		Ok(Self::new(config, HttpFetcher::new(config)?, ZipExtractor))
	}
}

impl<F: Fetcher, X: ArchiveExtractor> Downloader<F, X> {
	pub fn new(config: &crate::Config, fetcher: F, extractor: X) -> Self {
		Self {
			cache: DownloadCache::from_config(config),
			ignore_cache: config.ignore_cache(),
			fetcher,
			extractor,
		}
	}

	pub fn cache(&self) -> &DownloadCache {
		&self.cache
	}

	pub fn fetcher(&self) -> &F {
		&self.fetcher
	}

	/// Downloads a package with it's dependencies.
	///
	/// Modpacks get the exact dependency versions they list, anything else gets the newest version
	/// of each dependency and skips dependencies the profile already has installed.
	///
	/// `root` is downloaded after it's dependencies and is last in the completed list.
	///
	/// # Parameters
	/// - `catalog` - Packages available to satisfy dependencies.
	/// - `profile` - The installed packages of the profile being installed to.
	/// - `root` - The package to install.
	/// - `events` - Receives progress and the completed list.
	pub async fn download<'db>(&self, catalog: &'db Catalog, profile: &(impl InstalledPackages + ?Sized), root: Combo<'db>, events: &EventSender<'db>) {
		let installed = match profile.installed_packages() {
			Ok(v) => v,
			Err(e) => {
				log::error!("Failed to get installed packages before downloading {}: {}", root, e);
				emit(events, DownloadEvent::Progress(Progress {
					percent: 0.0,
					label: root.package.name.clone(),
					status: ItemStatus::Failure(DownloadError::InstalledList(e)),
				}));
				return;
			},
		};

		let policy = SelectionPolicy::for_package(root.package);
		let mut dependencies = build_dependency_set(root, catalog, policy);
		sort_dependency_order(&mut dependencies);

		if policy == SelectionPolicy::Latest {
			/* Installed dependencies are left alone, updating them is `download_latest_of_all`'s job. */
			dependencies.retain(|dep| !installed.iter().any(|i| i.name == dep.full_name()));
		}

		let slots = dependencies.len() + 1;
		let mut queue = dependencies;
		queue.push(root);

		log::info!("Downloading {} with {} dependencies", root, queue.len() - 1);
		self.process_queue(queue, slots, events).await
	}

	/// Updates every installed package that has a newer version, along with the newest versions of their dependencies.
	///
	/// See [`plan_updates()`] for how updates are chosen.
	pub async fn download_latest_of_all<'db>(&self, catalog: &'db Catalog, installed: &[InstalledEntry], events: &EventSender<'db>) {
		let updates = plan_updates(installed, catalog);
		let mut dependencies = updates.clone();
		for update in &updates {
			dependencies = extend_dependency_set(*update, catalog, SelectionPolicy::Latest, dependencies);
		}
		sort_dependency_order(&mut dependencies);

		log::info!("Updating {} packages, {} downloads in total", updates.len(), dependencies.len());
		let slots = dependencies.len() + 1;
		self.process_queue(dependencies, slots, events).await
	}

	/// Downloads exactly the listed packages and versions, such as a list exported from another profile.
	///
	/// No dependencies are resolved. Entries whose version isn't in the catalog are skipped.
	pub async fn download_imported<'db>(&self, catalog: &'db Catalog, mods: &[InstalledEntry], events: &EventSender<'db>) {
		let mut queue = Vec::<Combo>::new();
		for entry in mods {
			match catalog.find_version(&entry.name, &entry.version) {
				Some((package, version)) => queue.push(Combo::new(package, version)),
				None => log::warn!("Imported package {}-{} is not in the catalog, skipping.", entry.name, entry.version),
			}
		}

		let slots = queue.len() + 1;
		self.process_queue(queue, slots, events).await
	}

	/// Downloads `queue` in order, stopping at the first failure.
	///
	/// `slots` is the number of parts the overall percentage is split into, it may be larger than the queue.
	async fn process_queue<'db>(&self, queue: Vec<Combo<'db>>, slots: usize, events: &EventSender<'db>) {
		let mut completed = 0usize;
		let mut last_label = String::new();

		for combo in &queue {
			let label = combo.package.name.clone();

			let result = {
				let mut on_progress = |progress: f64| {
					emit(events, DownloadEvent::Progress(Progress {
						percent: overall_percent(progress, completed, slots),
						label: label.clone(),
						status: ItemStatus::Pending,
					}));
				};
				self.download_and_save(*combo, &mut on_progress).await
			};

			match result {
				Ok(()) => {
					emit(events, DownloadEvent::Progress(Progress {
						percent: overall_percent(100.0, completed, slots),
						label: label.clone(),
						status: ItemStatus::Success,
					}));
					completed += 1;
				},
				Err(e) => {
					log::error!("Download of {} failed: {}", combo, e);
					emit(events, DownloadEvent::Progress(Progress {
						percent: 0.0,
						label,
						status: ItemStatus::Failure(e),
					}));
					return;
				},
			}

			last_label = label;
		}

		/* The last item only reaches 100% itself when there is no spare slot. */
		if completed < slots {
			emit(events, DownloadEvent::Progress(Progress {
				percent: 100.0,
				label: last_label,
				status: ItemStatus::Success,
			}));
		}
		emit(events, DownloadEvent::Complete(queue));
	}

	/// Gets a single package into the cache.
	///
	/// Returns immediately when the package is already cached unless the config ignores the cache.
	/// `on_progress` receives the download progress of this package from 0 to 100.
	///
	/// # Errors
	/// - [`Fetch`](DownloadError::Fetch) when the fetcher fails.
	/// - [`CacheWrite`](DownloadError::CacheWrite) and [`Extract`](DownloadError::Extract) from [`DownloadCache::store()`].
	pub async fn download_and_save(&self, combo: Combo<'_>, on_progress: &mut (dyn FnMut(f64) + Send)) -> Result<(), DownloadError> {
		if !self.ignore_cache && self.cache.is_cached(&combo).await {
			log::debug!("Package {} is already in the cache, skipping.", combo);
			return Ok(());
		}

		log::info!("Downloading package {} from {}", combo, combo.version.download_url);
		let content = self.fetcher
			.fetch(&combo.version.download_url, &mut |loaded: u64, total: Option<u64>| {
				if let Some(total) = total.filter(|t| *t > 0) {
					on_progress(loaded as f64 / total as f64 * 100.0);
				}
			})
			.await
			.map_err(|source| DownloadError::Fetch { name: combo.version.full_name.clone(), source })?;
		on_progress(100.0);

		log::info!("Writing package download to cache: {}", combo);
		self.cache.store(&combo, &content, &self.extractor).await
	}
}
