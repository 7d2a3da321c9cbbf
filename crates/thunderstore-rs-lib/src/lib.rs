pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod catalog;
pub use catalog::Catalog;

pub mod profile;
pub mod relationship_resolver;
pub use relationship_resolver::Combo;

pub mod installation;
