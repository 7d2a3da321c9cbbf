//! Package version numbers.

use serde::{Serialize, Deserialize};

/// The version of a published package.
/// 
/// # Format
/// 
/// `MAJOR`.`MINOR`.`PATCH`, all three components are required.
/// 
/// # Eq & Ord
/// 
/// Ordered lexicographically by `major`, `minor` then `patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber {
	major: u32,
	minor: u32,
	patch: u32,
}

impl VersionNumber {
	pub fn new(major: u32, minor: u32, patch: u32) -> Self {
		Self { major, minor, patch }
	}

	/// Parses a version string such as `"1.2.3"`.
	/// 
	/// # Errors
	/// Returns a [`Parse`](crate::Error::Parse) error when
	/// - The input doesn't have exactly three components.
	/// - A component can't be parsed as a non-negative integer.
	pub fn parse(s: impl AsRef<str>) -> crate::Result<Self> {
		use crate::Error::Parse;
		let s = s.as_ref();
		let components = s.split('.').collect::<Vec<_>>();
		if components.len() != 3 { return Err(Parse(format!("version \"{}\" should have exactly three components", s))) }

		let mut parsed = [0u32; 3];
		for (i, component) in components.iter().enumerate() {
			if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
				return Err(Parse(format!("version component \"{}\" of \"{}\" is not a number", component, s)))
			}
			parsed[i] = component.parse::<u32>().map_err(|_| Parse(format!("version component \"{}\" of \"{}\" is out of range", component, s)))?;
		}

		Ok(Self::new(parsed[0], parsed[1], parsed[2]))
	}

	/// Strictly greater, an equal version is not newer.
	pub fn is_newer_than(&self, other: &Self) -> bool {
		self > other
	}

	pub fn major(&self) -> u32 { self.major }
	pub fn minor(&self) -> u32 { self.minor }
	pub fn patch(&self) -> u32 { self.patch }
}

impl std::str::FromStr for VersionNumber {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<&str> for VersionNumber {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl TryFrom<String> for VersionNumber {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(value) }
}

impl From<VersionNumber> for String {
	fn from(value: VersionNumber) -> Self { value.to_string() }
}

impl std::fmt::Display for VersionNumber {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}
