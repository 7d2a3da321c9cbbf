//! Handles getting packages into the download cache.
//! 
//! Packages are downloaded one at a time, written to `<cache>/<full name>/<version>.zip`
//! and extracted to `<cache>/<full name>/<version>/`. The extracted directory existing is
//! what marks a package as cached, the archive is deleted once extracted.

pub mod fetch;
pub mod content;
pub mod cache;
pub mod download;

pub use download::Downloader;
pub use download::DownloadEvent;
pub use download::DownloadError;
pub use download::ItemStatus;
pub use download::Progress;
