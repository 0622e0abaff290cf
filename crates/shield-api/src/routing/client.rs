// bgpview.io HTTP client
//
// Wraps `reqwest::Client` with URL construction, the fixed backoff retry
// loop, and envelope unwrapping. Callers only ever see the typed `data`
// payload; the envelope is stripped (and its status checked) here.

use std::net::IpAddr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::models::{AsnPrefixesResponse, AsnResponse, Envelope, IpLookupResponse};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Public bgpview.io endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.bgpview.io";

/// Delays between attempts. After the last delay the next failure is final.
///
/// Each delay buys one retry, so this schedule allows five attempts in
/// total, one more than a "one attempt per delay" reading would give.
pub const DEFAULT_BACKOFF_SCHEDULE: [Duration; 4] = [
    Duration::from_secs(1),
    Duration::from_secs(3),
    Duration::from_secs(5),
    Duration::from_secs(10),
];

/// Read-only client for the bgpview.io routing API.
///
/// Transport failures and non-200 responses are retried following the
/// backoff schedule; a `status != "ok"` envelope is a logical error and is
/// returned immediately.
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: Url,
    backoff: Vec<Duration>,
}

impl RoutingClient {
    /// Create a client from a `TransportConfig` with the default backoff.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            backoff: DEFAULT_BACKOFF_SCHEDULE.to_vec(),
        }
    }

    /// Replace the backoff schedule. An empty schedule means a single attempt.
    pub fn with_backoff(mut self, backoff: Vec<Duration>) -> Self {
        self.backoff = backoff;
        self
    }

    /// The configured backoff schedule.
    pub fn backoff(&self) -> &[Duration] {
        &self.backoff
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Every routed prefix that contains `ip`, with the announcing ASN.
    pub async fn ip_lookup(&self, ip: IpAddr) -> Result<IpLookupResponse, Error> {
        self.get(&format!("ip/{ip}")).await
    }

    /// Descriptive metadata for an ASN.
    pub async fn asn_lookup(&self, asn: u32) -> Result<AsnResponse, Error> {
        self.get(&format!("asn/{asn}")).await
    }

    /// The IPv4 and IPv6 prefixes originated by an ASN.
    pub async fn asn_prefixes_lookup(&self, asn: u32) -> Result<AsnPrefixesResponse, Error> {
        self.get(&format!("asn/{asn}/prefixes")).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let body = self.send_with_retry(&url).await?;
        parse_envelope(&body)
    }

    /// Run the request, sleeping through the backoff schedule between
    /// transient failures.
    async fn send_with_retry(&self, url: &Url) -> Result<String, Error> {
        let mut delays = self.backoff.iter();
        let mut attempt = 1_u32;

        loop {
            match self.execute(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() => {
                    let Some(delay) = delays.next() else {
                        return Err(err);
                    };
                    warn!(%url, attempt, ?delay, error = %err, "request failed, retrying");
                    tokio::time::sleep(*delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn execute(&self, url: &Url) -> Result<String, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json; charset=utf-8")
            .send()
            .await?;

        // Only 200 counts as success, anything else is retried.
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.text().await?)
    }
}

/// Decode the envelope, check its status, then decode `data` into `T`.
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| deserialization(&e, body))?;

    if envelope.status != "ok" {
        return Err(Error::RoutingApi {
            message: envelope
                .status_message
                .unwrap_or_else(|| format!("status={}", envelope.status)),
        });
    }

    serde_json::from_value(envelope.data).map_err(|e| deserialization(&e, body))
}

fn deserialization(err: &serde_json::Error, body: &str) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body: body.to_owned(),
    }
}
