//! Payment gateway client.
//!
//! The gateway is a hosted-checkout service: we create a payment session
//! server-side and hand the customer its redirect URL; the gateway reports
//! the final state when we poll `payment_status`.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use apexdrive_core::{OrderNumber, PaymentStatus, Price};

use crate::config::GatewayConfig;

/// Errors from the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway rate-limited us; retry after the given seconds.
    #[error("gateway rate limited, retry after {0}s")]
    RateLimited(u64),

    /// The gateway rejected the request.
    #[error("gateway rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The gateway answered with something we couldn't parse.
    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

/// A created payment session.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSession {
    /// Gateway-side payment id; stored on the order as `payment_reference`.
    pub id: String,
    /// Hosted checkout page the customer is sent to.
    pub redirect_url: String,
}

/// Payment state reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayPaymentState {
    Pending,
    Paid,
    Failed,
}

impl From<GatewayPaymentState> for PaymentStatus {
    fn from(state: GatewayPaymentState) -> Self {
        match state {
            GatewayPaymentState::Pending => Self::Pending,
            GatewayPaymentState::Paid => Self::Paid,
            GatewayPaymentState::Failed => Self::Failed,
        }
    }
}

#[derive(Serialize)]
struct CreatePaymentRequest<'a> {
    amount: Decimal,
    currency: &'a str,
    reference: &'a str,
    return_url: &'a str,
}

#[derive(Deserialize)]
struct PaymentStatusResponse {
    status: GatewayPaymentState,
}

/// Client for the hosted-checkout payment gateway.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            inner: Arc::new(GatewayClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        })
    }

    /// Create a payment session for an order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails, is rate limited, or the
    /// gateway rejects it.
    #[instrument(skip(self, price), fields(reference = %reference))]
    pub async fn create_payment(
        &self,
        price: Price,
        reference: &OrderNumber,
        return_url: &str,
    ) -> Result<PaymentSession, GatewayError> {
        let body = CreatePaymentRequest {
            amount: price.amount,
            currency: price.currency_code.code(),
            reference: reference.as_str(),
            return_url,
        };

        let response = self
            .inner
            .client
            .post(format!("{}/v1/payments", self.inner.base_url))
            .bearer_auth(&self.inner.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let session = response
            .json::<PaymentSession>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        tracing::debug!(payment_id = %session.id, "payment session created");
        Ok(session)
    }

    /// Poll the state of a payment session.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails or the response is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn payment_status(
        &self,
        payment_id: &str,
    ) -> Result<GatewayPaymentState, GatewayError> {
        let response = self
            .inner
            .client
            .get(format!("{}/v1/payments/{payment_id}", self.inner.base_url))
            .bearer_auth(&self.inner.api_key)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let status = response
            .json::<PaymentStatusResponse>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(status.status)
    }

    /// Map non-success responses into gateway errors.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(GatewayError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %message.chars().take(500).collect::<String>(),
                "gateway returned non-success status"
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_state_parses_from_gateway_json() {
        let state: GatewayPaymentState =
            serde_json::from_str("\"paid\"").expect("parse gateway state");
        assert_eq!(state, GatewayPaymentState::Paid);

        let response: PaymentStatusResponse =
            serde_json::from_str(r#"{"status":"failed"}"#).expect("parse status response");
        assert_eq!(response.status, GatewayPaymentState::Failed);
    }

    #[test]
    fn gateway_states_map_onto_payment_statuses() {
        assert_eq!(
            PaymentStatus::from(GatewayPaymentState::Pending),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentStatus::from(GatewayPaymentState::Paid),
            PaymentStatus::Paid
        );
        assert_eq!(
            PaymentStatus::from(GatewayPaymentState::Failed),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn payment_session_parses() {
        let session: PaymentSession = serde_json::from_str(
            r#"{"id":"pay_123","redirect_url":"https://pay.test/checkout/pay_123"}"#,
        )
        .expect("parse session");
        assert_eq!(session.id, "pay_123");
        assert!(session.redirect_url.contains("pay_123"));
    }
}
