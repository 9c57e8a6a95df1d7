use async_trait::async_trait;

use crate::error::ScrapeError;

/// Retrieves a page body. One attempt per call; status codes are not judged
/// here because block pages are often served with 200.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// `Fetcher` backed by a shared `reqwest::Client` that advertises a fixed
/// user agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let transport = |e| ScrapeError::Transport {
            url: url.to_string(),
            source: e,
        };

        let resp = self.client.get(url).send().await.map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!("GET {url} returned {status}, passing body through");
        }

        resp.text().await.map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request with `response` and hand back the raw request head.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/jobs", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_non_success_status_returns_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 403 Forbidden\r\nContent-Length: 7\r\nConnection: close\r\n\r\nblocked",
        )
        .await;
        let fetcher = HttpFetcher::new("TestAgent/9").unwrap();

        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, "blocked");
        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /jobs "));
        assert!(request.contains("user-agent: testagent/9"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/jobs", listener.local_addr().unwrap());
        drop(listener);
        let fetcher = HttpFetcher::new("TestAgent/9").unwrap();

        match fetcher.fetch(&url).await {
            Err(ScrapeError::Transport { url: failed, .. }) => assert_eq!(failed, url),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_agent_is_client_error() {
        match HttpFetcher::new("bad\nagent") {
            Err(e @ ScrapeError::Client(_)) => {
                assert!(e.to_string().starts_with("Failed to build HTTP client"));
            }
            Err(other) => panic!("expected client error, got {other:?}"),
            Ok(_) => panic!("expected client error"),
        }
    }
}
