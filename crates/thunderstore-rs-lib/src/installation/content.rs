//! Package archive extraction.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("zip error: {0}")]
	Zip(#[from] zip::result::ZipError),
	#[error("extraction task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

/// Extraction runs on the blocking thread pool so extractors are moved there by value.
pub trait ArchiveExtractor: Clone + Send + 'static {
	/// Extracts `archive` into `destination` then deletes `archive`.
	/// 
	/// If extraction fails `destination` must be left as it was, the cache treats it's existence as a complete download.
	fn extract_and_delete(&self, archive: &Path, destination: &Path) -> Result<(), ContentError>;
}

/// Extracts zip archives, the only format the registry serves.
/// 
/// The archive is extracted next to `destination` first and only moved into place once complete,
/// so a failed extraction never touches a package that was already extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
	fn extract_and_delete(&self, archive: &Path, destination: &Path) -> Result<(), ContentError> {
		let partial = partial_path(destination);
		log::trace!("Extracting {} to {}", archive.display(), partial.display());

		if let Err(e) = extract_zip(archive, &partial) {
			if partial.exists() {
				if let Err(cleanup) = std::fs::remove_dir_all(&partial) {
					log::warn!("Failed to remove partially extracted {}: {}", partial.display(), cleanup);
				}
			}
			return Err(e);
		}

		if destination.exists() {
			log::debug!("Replacing previously extracted {}", destination.display());
			std::fs::remove_dir_all(destination)?;
		}
		std::fs::rename(&partial, destination)?;

		std::fs::remove_file(archive)?;
		Ok(())
	}
}

/// `<destination>.partial`, the directory an archive is extracted into before it's complete.
fn partial_path(destination: &Path) -> PathBuf {
	let mut name = destination.as_os_str().to_owned();
	name.push(".partial");
	PathBuf::from(name)
}

fn extract_zip(archive: &Path, destination: &Path) -> Result<(), ContentError> {
	let mut zip = zip::ZipArchive::new(
		std::fs::File::open(archive)?
	)?;
	if destination.exists() {
		/* Left over from an interrupted extraction. */
		std::fs::remove_dir_all(destination)?;
	}
	std::fs::create_dir_all(destination)?;
	zip.extract(destination)?;
	Ok(())
}
