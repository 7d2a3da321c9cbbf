//! Fetching package archives.

use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("{url} responded with HTTP {status}")]
	HttpStatus { url: String, status: u16 },
	/// Used by fetchers that don't talk HTTP.
	#[error("{0}")]
	Unavailable(String),
}

/// Retrieves the content behind a download url.
pub trait Fetcher {
	/// Fetches the whole body at `url`.
	/// 
	/// `on_progress` is called as the body arrives with the bytes received so far and the total size when known.
	fn fetch(&self, url: &str, on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send)) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

pub struct HttpFetcher {
	client: reqwest::Client,
}

impl HttpFetcher {
	/// # Errors
	/// - [`Reqwest`](FetchError::Reqwest) when the client can't be built.
	pub fn new(config: &crate::Config) -> Result<Self, FetchError> {
		let client = reqwest::Client::builder()
			.https_only(config.https_only())
			.build()?;
		Ok(Self { client })
	}

	pub fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

impl Fetcher for HttpFetcher {
	async fn fetch(&self, url: &str, on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send)) -> Result<Vec<u8>, FetchError> {
		let mut response = self.client
			.get(url)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::HttpStatus { url: url.to_string(), status: status.as_u16() });
		}

		let total = response.content_length();
		let mut content = Vec::<u8>::new();
		while let Some(chunk) = response.chunk().await? {
			content.extend_from_slice(&chunk);
			on_progress(content.len() as u64, total);
		}

		Ok(content)
	}
}
