//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two limiters cover the abuse-prone endpoints:
//! - `auth_rate_limiter`: strict limits for login/registration (~10/min)
//! - `checkout_rate_limiter`: moderate limits for checkout (~20/min)

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Key extractor that prefers proxy headers over the socket peer address.
///
/// Both services sit behind a reverse proxy in deployment, so the peer
/// address is the proxy, not the client.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // X-Forwarded-For: first IP in the chain is the client
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        Err(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 token every 6 seconds, burst of 5. This slows brute
/// force attempts on login/registration.
///
/// # Panics
///
/// Does not panic: `per_second(6)`/`burst_size(5)` is always a valid
/// `GovernorConfigBuilder` configuration.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for checkout: ~20 requests per minute per IP.
///
/// # Panics
///
/// Does not panic: `per_second(3)`/`burst_size(10)` is always a valid
/// `GovernorConfigBuilder` configuration.
#[must_use]
pub fn checkout_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(3)
        .burst_size(10)
        .finish()
        .expect("rate limiter config with per_second(3) and burst_size(10) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_governor::key_extractor::KeyExtractor;

    fn request_with_header(name: &str, value: &str) -> Request<()> {
        Request::builder()
            .header(name, value)
            .body(())
            .expect("build request")
    }

    #[test]
    fn extracts_first_forwarded_ip() {
        let req = request_with_header("x-forwarded-for", "203.0.113.7, 10.0.0.1");
        let key = ProxyIpKeyExtractor.extract(&req).expect("extract");
        assert_eq!(key, "203.0.113.7".parse::<IpAddr>().expect("ip"));
    }

    #[test]
    fn falls_back_to_real_ip() {
        let req = request_with_header("x-real-ip", "198.51.100.4");
        let key = ProxyIpKeyExtractor.extract(&req).expect("extract");
        assert_eq!(key, "198.51.100.4".parse::<IpAddr>().expect("ip"));
    }

    #[test]
    fn missing_headers_is_an_error() {
        let req = Request::builder().body(()).expect("build request");
        assert!(ProxyIpKeyExtractor.extract(&req).is_err());
    }
}
