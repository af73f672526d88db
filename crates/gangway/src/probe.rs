//! Exponential-backoff readiness probing.
//!
//! Bridges "started" and "ready": a freshly started container accepts no
//! connections for a while, so the prober retries with increasing delays
//! until the endpoint answers or the caller's wait budget runs out. Time,
//! not attempt count, bounds the loop.

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use gangway_common::error::{GangwayError, Result};
use tokio::net::TcpStream;
use url::Url;

/// Probes `address` until it is reachable, for at most `within`.
///
/// `http`/`https` addresses are probed with a plain GET; any response at
/// all counts as ready. Every other scheme is treated as a raw protocol
/// and probed with a TCP connect to the address's host and port, closed as
/// soon as it is established.
pub(crate) async fn wait_ready(address: &str, within: Duration) -> Result<()> {
    let url = Url::parse(address).map_err(|_| GangwayError::InvalidAddress {
        address: address.to_string(),
    })?;
    if !is_http(&url) && raw_endpoint(&url).is_none() {
        return Err(GangwayError::InvalidAddress {
            address: address.to_string(),
        });
    }

    tracing::debug!(address, ?within, "waiting for endpoint");
    // The outer timeout keeps a single hanging probe from overshooting the
    // budget; the policy's max elapsed time ends the loop between probes.
    match tokio::time::timeout(within, probe_until_ready(&url, within)).await {
        Ok(true) => {
            tracing::debug!(address, "endpoint ready");
            Ok(())
        }
        Ok(false) | Err(_) => Err(GangwayError::ReadinessTimeout {
            address: address.to_string(),
            waited: within,
        }),
    }
}

async fn probe_until_ready(url: &Url, within: Duration) -> bool {
    let http = reqwest::Client::new();
    let mut policy = ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(within))
        .build();
    loop {
        if probe_once(&http, url).await {
            return true;
        }
        match policy.next_backoff() {
            Some(delay) => tokio::time::sleep(delay).await,
            None => return false,
        }
    }
}

async fn probe_once(http: &reqwest::Client, url: &Url) -> bool {
    if is_http(url) {
        // Transport-level success is readiness; the status code is not
        // interpreted.
        http.get(url.clone()).send().await.is_ok()
    } else if let Some((host, port)) = raw_endpoint(url) {
        TcpStream::connect((host, port)).await.is_ok()
    } else {
        false
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn raw_endpoint(url: &Url) -> Option<(&str, u16)> {
    Some((url.host_str()?, url.port()?))
}
