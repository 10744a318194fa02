//! Blocking HTTP GET over libcurl with a cooperative abort token.
//!
//! Used for both the catalog document and product pages. Runs in the
//! current thread; call from `spawn_blocking` if used from async code.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Error returned by [`http_get`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection refused, TLS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The abort token was set while the transfer was running.
    #[error("request aborted")]
    Aborted,
}

impl FetchError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra request headers (name -> value).
    pub headers: HashMap<String, String>,
    pub user_agent: Option<String>,
    pub connect_timeout: Option<Duration>,
}

impl FetchOptions {
    /// Headers asking every cache on the path to revalidate.
    pub fn no_cache() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        headers.insert("Pragma".to_string(), "no-cache".to_string());
        Self {
            headers,
            ..Self::default()
        }
    }
}

/// A successful response body.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub bytes: Vec<u8>,
}

impl FetchedBody {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Performs a GET and returns the body. Follows up to 10 redirects.
///
/// If `abort` is set (before or during the transfer), returns
/// [`FetchError::Aborted`] as soon as libcurl calls back.
pub fn http_get(
    url: &str,
    opts: &FetchOptions,
    abort: Option<&Arc<AtomicBool>>,
) -> Result<FetchedBody, FetchError> {
    let is_aborted = || abort.map(|a| a.load(Ordering::Relaxed)).unwrap_or(false);
    if is_aborted() {
        return Err(FetchError::Aborted);
    }

    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.accept_encoding("")?; // any encoding libcurl can decode
    easy.progress(true)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &opts.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !opts.headers.is_empty() {
        easy.http_headers(list)?;
    }

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if is_aborted() {
                return Ok(0); // abort transfer
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        // Also polled while waiting on DNS/connect, before any body bytes arrive.
        transfer.progress_function(|_, _, _, _| !is_aborted())?;
        transfer.perform()
    };

    if let Err(e) = perform_result {
        if is_aborted() && (e.is_write_error() || e.is_aborted_by_callback()) {
            return Err(FetchError::Aborted);
        }
        return Err(FetchError::Curl(e));
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http(status));
    }
    Ok(FetchedBody { bytes: body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cache_sets_both_headers() {
        let opts = FetchOptions::no_cache();
        assert_eq!(opts.headers.get("Cache-Control").unwrap(), "no-cache");
        assert_eq!(opts.headers.get("Pragma").unwrap(), "no-cache");
        assert!(opts.user_agent.is_none());
    }

    #[test]
    fn preset_abort_token_skips_request() {
        let abort = Arc::new(AtomicBool::new(true));
        // Unroutable URL: would hang or fail if the request were attempted.
        let err = http_get("http://10.255.255.1/", &FetchOptions::default(), Some(&abort))
            .unwrap_err();
        assert!(err.is_aborted());
    }

    #[test]
    fn abort_token_stops_stalled_transfer() {
        use std::io::Read;
        use std::net::TcpListener;
        use std::time::Instant;

        // Accepts the connection, reads the request and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/stall", listener.local_addr().unwrap());
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = stream.set_read_timeout(Some(Duration::from_secs(10)));
                let mut buf = [0u8; 1024];
                while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
            }
        });

        let abort = Arc::new(AtomicBool::new(false));
        let setter = Arc::clone(&abort);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(200));
            setter.store(true, Ordering::Relaxed);
        });

        let started = Instant::now();
        let err = http_get(&url, &FetchOptions::default(), Some(&abort)).unwrap_err();
        assert!(err.is_aborted(), "expected Aborted, got {err}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn invalid_url_is_curl_error() {
        let err = http_get("not a url", &FetchOptions::default(), None).unwrap_err();
        assert!(matches!(err, FetchError::Curl(_)));
    }

    #[test]
    fn fetched_body_text_is_lossy() {
        let body = FetchedBody {
            bytes: vec![b'o', b'k', 0xff],
        };
        assert_eq!(body.text(), "ok\u{fffd}");
    }

    #[test]
    fn error_display() {
        assert_eq!(FetchError::Http(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::Aborted.to_string(), "request aborted");
    }
}
