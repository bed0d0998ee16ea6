//! Submit a composed message to an SMTP relay, retrying on failure.
//!
//! The relay is behind the [`Relay`] trait so the retry loop can be tested
//! against stubs, and the inter-attempt sleep is injected the same way.
//! Every failed attempt is reported before the delay/retry decision; retry
//! is blind to the error class (an auth rejection and a dropped connection
//! are retried identically).

use std::time::Duration;

use lettre::address::Envelope as SmtpEnvelope;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{Address, SmtpTransport, Transport};

use crate::error::{MailcatError, Result};

/// Total submission attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause between consecutive attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Username/secret pair for relay authentication.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account name on the relay.
    pub username: String,
    /// Password or provider auth code.
    pub auth_code: String,
}

/// Bounds for the retry loop. No backoff, no jitter: a fixed delay between
/// a fixed number of attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Final result of a delivery, surfaced to the CLI.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// `true` once the relay accepted the message.
    pub succeeded: bool,
    /// Attempts consumed, successful one included. Zero only under a
    /// degenerate `max_attempts = 0` policy.
    pub attempts_used: u32,
    /// Error text of the last failed attempt, if any.
    pub last_error: Option<String>,
}

/// A submission endpoint that can accept the composed message bytes.
pub trait Relay {
    /// Stream `message` to the relay over an authenticated session.
    ///
    /// The buffer is read-only; each call must submit it from the start.
    fn submit(&mut self, message: &[u8]) -> Result<()>;
}

/// Production relay backed by lettre's synchronous SMTP transport.
///
/// TLS mode, port, and protocol variant are opaque here: they come encoded
/// in the endpoint URL (`smtps://host:465`, `smtp://host:587`, ...).
#[derive(Debug)]
pub struct SmtpRelay {
    transport: SmtpTransport,
    envelope: SmtpEnvelope,
}

impl SmtpRelay {
    /// Build a relay session description from an endpoint URL, credentials,
    /// and the envelope sender/recipient addresses.
    ///
    /// `to` may be a comma-joined list; each element becomes one envelope
    /// recipient. The header fields baked into the message are independent
    /// of these envelope addresses.
    pub fn open(endpoint: &str, credentials: &Credentials, from: &str, to: &str) -> Result<Self> {
        let sender = parse_address(from)?;
        let recipients = to
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_address)
            .collect::<Result<Vec<Address>>>()?;

        let envelope = SmtpEnvelope::new(Some(sender), recipients).map_err(|e| {
            MailcatError::InvalidAddress {
                address: to.to_string(),
                reason: e.to_string(),
            }
        })?;

        let transport = SmtpTransport::from_url(endpoint)
            .map_err(|e| MailcatError::Transport(e.to_string()))?
            .credentials(SmtpCredentials::new(
                credentials.username.clone(),
                credentials.auth_code.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            envelope,
        })
    }
}

impl Relay for SmtpRelay {
    fn submit(&mut self, message: &[u8]) -> Result<()> {
        self.transport
            .send_raw(&self.envelope, message)
            .map(|_| ())
            .map_err(|e| MailcatError::Transport(e.to_string()))
    }
}

fn parse_address(text: &str) -> Result<Address> {
    text.parse::<Address>()
        .map_err(|e| MailcatError::InvalidAddress {
            address: text.to_string(),
            reason: e.to_string(),
        })
}

/// Deliver `message` through `relay`, sleeping on the calling thread
/// between attempts.
pub fn deliver(relay: &mut dyn Relay, message: &[u8], policy: &RetryPolicy) -> DeliveryOutcome {
    deliver_with_sleep(relay, message, policy, &|delay| std::thread::sleep(delay))
}

/// Retry loop with an injected sleep, so tests run without real delays.
///
/// One `submit` per attempt, up to `policy.max_attempts`. Failures are
/// logged with the remaining-attempt count before the delay decision; the
/// delay is skipped after the final attempt.
pub fn deliver_with_sleep(
    relay: &mut dyn Relay,
    message: &[u8],
    policy: &RetryPolicy,
    sleep: &dyn Fn(Duration),
) -> DeliveryOutcome {
    let mut remaining = policy.max_attempts;
    let mut attempts_used = 0u32;
    let mut last_error: Option<String> = None;

    while remaining > 0 {
        attempts_used += 1;
        match relay.submit(message) {
            Ok(()) => {
                tracing::info!(attempts = attempts_used, "message accepted by relay");
                return DeliveryOutcome {
                    succeeded: true,
                    attempts_used,
                    last_error: None,
                };
            }
            Err(e) => {
                remaining -= 1;
                let text = e.to_string();
                tracing::warn!(error = %text, remaining, "delivery attempt failed");
                last_error = Some(text);
                if remaining > 0 {
                    sleep(policy.retry_delay);
                }
            }
        }
    }

    DeliveryOutcome {
        succeeded: false,
        attempts_used,
        last_error,
    }
}
