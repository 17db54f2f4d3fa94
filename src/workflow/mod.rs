use crate::gateway::{GatewayClient, GatewayError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of the check form: `Idle → Validating → InFlight → settle → Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckState {
    Idle,
    Validating,
    InFlight,
}

/// Classified result of the last submission. Persists on screen until
/// superseded by the next submission; there is no auto-expiry here, unlike
/// the rule-list alert banner.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

/// Manages the lifecycle of a single ad-hoc input check: validate, submit,
/// await, classify, reset.
///
/// Single-flight per instance: `submit` takes `&mut self`, so one workflow
/// can never have two requests outstanding. The presentation layer also
/// disables the input while `in_flight()` to keep the form honest.
pub struct InputCheckWorkflow {
    gateway: Arc<GatewayClient>,
    state: CheckState,
    result: Option<CheckResult>,
}

impl InputCheckWorkflow {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self {
            gateway,
            state: CheckState::Idle,
            result: None,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.state == CheckState::InFlight
    }

    pub fn last_result(&self) -> Option<&CheckResult> {
        self.result.as_ref()
    }

    /// Runs one full check lifecycle and returns the classified result.
    ///
    /// All-whitespace input settles locally without any network activity.
    /// Transport failures are converted to a connection-error message,
    /// distinct from a blocked-input message; nothing propagates as a fault.
    pub async fn submit(&mut self, raw_input: &str) -> CheckResult {
        self.state = CheckState::Validating;

        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            debug!("Rejecting empty input before any network call");
            return self.settle(CheckResult {
                ok: false,
                message: "❌ Input cannot be empty.".to_string(),
            });
        }

        self.state = CheckState::InFlight;

        let result = match self.gateway.submit_input(trimmed).await {
            Ok(outcome) if outcome.blocked => CheckResult {
                ok: false,
                message: format!("❌ Error {}: {}", outcome.status, outcome.message),
            },
            Ok(outcome) => CheckResult {
                ok: true,
                message: format!("✅ {}", outcome.message),
            },
            Err(e @ (GatewayError::Network(_) | GatewayError::Timeout)) => {
                warn!("Input check failed in transit: {}", e);
                CheckResult {
                    ok: false,
                    message: "❌ Error connecting to the server.".to_string(),
                }
            }
            Err(e) => {
                warn!("Input check failed: {}", e);
                CheckResult {
                    ok: false,
                    message: format!("❌ {}", e),
                }
            }
        };

        self.settle(result)
    }

    fn settle(&mut self, result: CheckResult) -> CheckResult {
        self.result = Some(result.clone());
        self.state = CheckState::Idle;
        result
    }
}
