use std::time::Duration;

use blogmark_logging::{bm_debug, bm_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

use crate::decode::decode_body;
use crate::{FailureKind, FetchError, FetchMetadata, FetchedPage};

/// A desktop Chrome identification string; some sites refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_bytes: 10 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// HTTP fetcher sharing one connection pool across every conversion.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Reject a response before its body is read.
    fn check_headers(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(declared) = response.content_length() {
            self.ensure_within_limit(declared)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        match content_type.as_deref() {
            Some(ct) if !self.accepts(ct) => Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: ct.to_string(),
                },
                "unsupported content type",
            )),
            _ => Ok(content_type),
        }
    }

    fn accepts(&self, content_type: &str) -> bool {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    }

    fn ensure_within_limit(&self, len: u64) -> Result<(), FetchError> {
        if len <= self.settings.max_bytes {
            return Ok(());
        }
        Err(FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(len),
            },
            "response too large",
        ))
    }

    /// Stream the body, giving up as soon as it passes `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(classify)?;
            self.ensure_within_limit((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let requested = parsed.to_string();

        bm_info!("Fetching content from {}", url);
        let response = self.client.get(parsed).send().await.map_err(classify)?;
        let content_type = self.check_headers(&response)?;
        let final_url = response.url().to_string();
        let body = self.read_body(response).await?;

        let decoded = decode_body(&body, content_type.as_deref());
        if decoded.had_replacements {
            bm_debug!(
                "{} is not valid {}; malformed bytes were replaced",
                final_url,
                decoded.encoding_label
            );
        }
        bm_debug!(
            "Fetched {} bytes from {} as {}",
            body.len(),
            final_url,
            decoded.encoding_label
        );

        Ok(FetchedPage {
            html: decoded.html,
            metadata: FetchMetadata {
                original_url: url.to_string(),
                redirected: final_url != requested,
                final_url,
                content_type,
                encoding: decoded.encoding_label,
                decoded_lossily: decoded.had_replacements,
                byte_len: body.len() as u64,
            },
        })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
