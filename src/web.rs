use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, span, Level};
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("not a local file URL: {0}")]
    FilePath(Url),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` addresses are fetched, `file://` URLs and
    /// anything else are read from disk.
    pub fn parse(location: &str) -> Result<Self, FetchError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Ok(Source::Url(Url::parse(location)?));
        }
        if location.starts_with("file://") {
            let url = Url::parse(location)?;
            let path = url
                .to_file_path()
                .map_err(|()| FetchError::FilePath(url.clone()))?;
            return Ok(Source::File(path));
        }
        Ok(Source::File(PathBuf::from(location)))
    }

    /// Open the document for reading
    pub fn open(&self) -> Result<Box<dyn Read>, FetchError> {
        let span = span!(Level::DEBUG, "Loading resource", source = %self);
        let _enter = span.enter();
        match self {
            Source::File(path) => {
                let file = File::open(path).map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(file))
            }
            Source::Url(url) => {
                let resp = reqwest::blocking::get(url.as_str())?.error_for_status()?;
                debug!(status = %resp.status(), "Received response");
                Ok(Box::new(resp))
            }
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            Source::parse("https://example.com/a?b=c").unwrap(),
            Source::Url(Url::parse("https://example.com/a?b=c").unwrap())
        );
        assert_eq!(
            Source::parse("file:///tmp/page.html").unwrap(),
            Source::File(PathBuf::from("/tmp/page.html"))
        );
        assert_eq!(
            Source::parse("pages/index.html").unwrap(),
            Source::File(PathBuf::from("pages/index.html"))
        );
        assert!(matches!(Source::parse("http://"), Err(FetchError::Url(_))));
    }

    #[test]
    fn test_file_url_is_decoded() {
        assert_eq!(
            Source::parse("file:///tmp/my%20page.html").unwrap(),
            Source::File(PathBuf::from("/tmp/my page.html"))
        );
        assert!(matches!(
            Source::parse("file://remote.example/page.html"),
            Err(FetchError::FilePath(_))
        ));
    }

    #[test]
    fn test_open_file() {
        let path = std::env::temp_dir().join(format!("tagpath-web-{}.html", std::process::id()));
        File::create(&path)
            .unwrap()
            .write_all(b"<p>hello</p>")
            .unwrap();
        let mut text = String::new();
        Source::File(path.clone())
            .open()
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "<p>hello</p>");
    }

    #[test]
    fn test_missing_file() {
        let err = Source::parse("/definitely/not/here.html")
            .unwrap()
            .open()
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().starts_with("/definitely/not/here.html: "));
    }
}
