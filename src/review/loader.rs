//! Feed fetching and parsing.
//!
//! A [`ReviewLoader`] resolves a relative feed path through a [`Fetcher`]
//! (HTTP or local directory), checks the status and parses the body into
//! an ordered list of [`ReviewRecord`]s.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::ReviewRecord;
use crate::error::LoadError;

/// Raw result of a feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to retrieve the feed
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable location of `path`, used in logs and failure notices
    fn describe(&self, path: &str) -> String;

    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError>;
}

/// Fetches the feed relative to an http(s) base URL.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base
            .join(path)
            .map_err(|e| LoadError::InvalidLocation(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn describe(&self, path: &str) -> String {
        self.resolve(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.to_string())
    }

    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let url = self.resolve(path)?;
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        Ok(FetchResponse { status, body })
    }
}

/// Reads the feed from a directory, answering like a static file server:
/// a missing file is a 404.
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    fn describe(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }

    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let full = self.root.join(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Ok(FetchResponse {
                status: 403,
                body: String::new(),
            }),
            Err(e) => Err(LoadError::Transport(format!("{}: {}", full.display(), e))),
        }
    }
}

/// Where the feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(Url),
    Directory(PathBuf),
}

impl FeedSource {
    /// Interpret `base` as a URL when it has an http(s) scheme, otherwise as a directory.
    pub fn parse(base: &str) -> Result<Self, LoadError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let mut url =
                Url::parse(base).map_err(|e| LoadError::InvalidLocation(format!("{}: {}", base, e)))?;
            // Url::join replaces the last segment unless the base ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(FeedSource::Http(url))
        } else {
            Ok(FeedSource::Directory(PathBuf::from(base)))
        }
    }

    pub fn fetcher(&self) -> Arc<dyn Fetcher> {
        match self {
            FeedSource::Http(url) => Arc::new(HttpFetcher::new(url.clone())),
            FeedSource::Directory(dir) => Arc::new(FileFetcher::new(dir.clone())),
        }
    }
}

pub struct ReviewLoader {
    fetcher: Arc<dyn Fetcher>,
}

impl ReviewLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub fn from_source(source: &FeedSource) -> Self {
        Self::new(source.fetcher())
    }

    pub fn describe(&self, data_path: &str) -> String {
        self.fetcher.describe(data_path)
    }

    /// Fetch and parse the feed at `data_path`. Records keep feed order.
    pub async fn load(&self, data_path: &str) -> Result<Vec<ReviewRecord>, LoadError> {
        tracing::debug!("Fetching review feed from {}", self.describe(data_path));
        let response = self.fetcher.fetch(data_path).await?;

        if !response.is_success() {
            return Err(LoadError::HttpStatus(response.status));
        }

        let records = parse_feed(&response.body)?;
        tracing::info!("Loaded {} reviews from {}", records.len(), data_path);
        Ok(records)
    }
}

/// Parse a feed body. The top level must be an array of objects.
pub fn parse_feed(body: &str) -> Result<Vec<ReviewRecord>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LoadError::MalformedData(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(LoadError::MalformedData(
            "top-level value is not an array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(LoadError::MalformedData(format!(
                    "review {} is not an object",
                    index
                )));
            }
            serde_json::from_value(item)
                .map_err(|e| LoadError::MalformedData(format!("review {}: {}", index, e)))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Fetcher returning a canned response.
    pub(crate) struct StaticFetcher(pub Result<FetchResponse, LoadError>);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        fn describe(&self, path: &str) -> String {
            format!("static:{}", path)
        }

        async fn fetch(&self, _path: &str) -> Result<FetchResponse, LoadError> {
            self.0.clone()
        }
    }

    pub(crate) fn loader_with(status: u16, body: &str) -> ReviewLoader {
        ReviewLoader::new(Arc::new(StaticFetcher(Ok(FetchResponse {
            status,
            body: body.to_string(),
        }))))
    }

    #[tokio::test]
    async fn test_load_preserves_feed_order() {
        let loader = loader_with(
            200,
            r#"[{"text":"a","stars":5},{"text":"b","stars":1},{"text":"c","stars":3}]"#,
        );
        let records = loader.load("assets/reviews.json").await.unwrap();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_http_404_is_status_error() {
        let loader = loader_with(404, "Not Found");
        let err = loader.load("assets/reviews.json").await.unwrap_err();
        assert_eq!(err, LoadError::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_not_json_is_malformed() {
        let loader = loader_with(200, "not json");
        let err = loader.load("assets/reviews.json").await.unwrap_err();
        assert!(matches!(err, LoadError::MalformedData(_)));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let loader = ReviewLoader::new(Arc::new(StaticFetcher(Err(LoadError::Transport(
            "connection refused".to_string(),
        )))));
        let err = loader.load("x.json").await.unwrap_err();
        assert_eq!(err, LoadError::Transport("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_empty_array_is_ok() {
        let loader = loader_with(200, "[]");
        assert!(loader.load("x.json").await.unwrap().is_empty());
    }

    #[test]
    fn test_object_top_level_is_malformed() {
        let err = parse_feed(r#"{"reviews": []}"#).unwrap_err();
        assert_eq!(
            err,
            LoadError::MalformedData("top-level value is not an array".to_string())
        );
    }

    #[test]
    fn test_loosely_typed_fields_are_accepted() {
        let records = parse_feed(
            r#"[
                {"text":"Great job","author":null,"date":"May 2024","stars":5},
                {"text":"Fine","author":"Jo","date":2024,"stars":"four"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author, "");
        assert_eq!(records[1].date, "2024");
        assert_eq!(records[1].stars, None);
    }

    #[test]
    fn test_non_object_element_is_malformed() {
        let err = parse_feed(r#"[{"text":"ok"}, 42]"#).unwrap_err();
        assert_eq!(err, LoadError::MalformedData("review 1 is not an object".to_string()));
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_feed() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("assets")).unwrap();
        std::fs::write(
            temp_dir.path().join("assets/reviews.json"),
            r#"[{"text":"Lovely","author":"Bo","date":"2024","stars":4}]"#,
        )
        .unwrap();

        let loader = ReviewLoader::new(Arc::new(FileFetcher::new(temp_dir.path())));
        let records = loader.load("assets/reviews.json").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "Bo");
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_file_is_404() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ReviewLoader::new(Arc::new(FileFetcher::new(temp_dir.path())));
        let err = loader.load("assets/reviews.json").await.unwrap_err();
        assert_eq!(err, LoadError::HttpStatus(404));
    }

    #[test]
    fn test_feed_source_parse() {
        let source = FeedSource::parse("https://example.com/site").unwrap();
        let FeedSource::Http(url) = &source else {
            panic!("expected http source");
        };
        assert_eq!(url.as_str(), "https://example.com/site/");

        let fetcher = source.fetcher();
        assert_eq!(
            fetcher.describe("assets/reviews.json"),
            "https://example.com/site/assets/reviews.json"
        );

        assert_eq!(
            FeedSource::parse("public").unwrap(),
            FeedSource::Directory(PathBuf::from("public"))
        );
    }
}
