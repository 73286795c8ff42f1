//! Question sources.
//!
//! A store only fetches the raw payload; parsing and shape checks happen in
//! [`QuestionSet::from_json`](super::QuestionSet::from_json) so every source
//! fails the same way on bad data.

use std::path::PathBuf;

use reqwest::Client;
use url::Url;

use crate::error::LoadError;

/// Read-only source of the question payload.
pub trait QuestionStore {
    /// Human-readable location, used in logs and error messages.
    fn location(&self) -> String;

    /// Fetch the raw JSON payload.
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Questions stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct FileQuestionStore {
    path: PathBuf,
}

impl FileQuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionStore for FileQuestionStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Questions served over HTTP(S).
///
/// `fetch` drives its own runtime, so it must not be called from inside an
/// async context.
#[derive(Debug, Clone)]
pub struct HttpQuestionStore {
    url: Url,
    client: Client,
}

impl HttpQuestionStore {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }

    async fn fetch_async(&self) -> Result<String, LoadError> {
        let url = self.url.to_string();
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|source| LoadError::Http { url, source })
    }
}

impl QuestionStore for HttpQuestionStore {
    fn location(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let runtime = tokio::runtime::Runtime::new().map_err(LoadError::Runtime)?;
        runtime.block_on(self.fetch_async())
    }
}

/// Pick a store for a configured location.
///
/// `http://` and `https://` URLs are fetched over the network, `file://`
/// URLs and anything that does not parse as a URL are treated as paths.
pub fn question_store_for(location: &str) -> Box<dyn QuestionStore> {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Box::new(HttpQuestionStore::new(url))
        }
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => Box::new(FileQuestionStore::new(path)),
            Err(()) => Box::new(FileQuestionStore::new(location)),
        },
        _ => Box::new(FileQuestionStore::new(location)),
    }
}
