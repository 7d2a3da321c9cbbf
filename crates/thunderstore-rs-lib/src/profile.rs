//! The packages already installed to a profile.
//! 
//! Only the name and version of each installed package is needed. They are used to find updates
//! and to avoid replacing dependencies the profile already has.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::catalog::VersionNumber;

/// A package installed to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledEntry {
	/// The package's `Namespace-Name`.
	pub name: String,
	pub version: VersionNumber,
}

impl InstalledEntry {
	pub fn new(name: impl Into<String>, version: VersionNumber) -> Self {
		Self { name: name.into(), version }
	}
}

/// Source of a profile's installed package list.
pub trait InstalledPackages {
	/// # Errors
	/// Any error reading the list. Callers starting a download report it as a failure without starting the queue.
	fn installed_packages(&self) -> crate::Result<Vec<InstalledEntry>>;
}

impl InstalledPackages for [InstalledEntry] {
	fn installed_packages(&self) -> crate::Result<Vec<InstalledEntry>> {
		Ok(self.to_vec())
	}
}

impl InstalledPackages for Vec<InstalledEntry> {
	fn installed_packages(&self) -> crate::Result<Vec<InstalledEntry>> {
		Ok(self.clone())
	}
}

/// A JSON file holding a profile's list of [`InstalledEntry`].
/// 
/// The file is read each time the list is requested so it always reflects the profile on disk.
#[derive(Debug, Clone)]
pub struct ProfileModList {
	path: PathBuf,
}

impl ProfileModList {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Replaces the list on disk.
	pub fn save(&self, entries: &[InstalledEntry]) -> crate::Result<()> {
		std::fs::create_dir_all(self.path.with_file_name(""))?;
		let file = std::fs::File::create(&self.path)?;
		serde_json::to_writer_pretty(file, entries)?;
		Ok(())
	}
}

impl InstalledPackages for ProfileModList {
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file can't be opened.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't a valid list.
	fn installed_packages(&self) -> crate::Result<Vec<InstalledEntry>> {
		let file = std::io::BufReader::new(std::fs::File::open(&self.path)?);
		Ok(serde_json::from_reader(file)?)
	}
}
