use crate::gateway::GatewayClient;
use crate::registry::RuleRegistry;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Result of one toggle intent.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The mutation was confirmed by the server; `enabled` is the new value.
    Applied { enabled: bool },
    /// The rule was already busy. Rapid repeated clicks are debounced, not
    /// queued, and no error is surfaced.
    Dropped,
    /// The server rejected the mutation or the request failed in transit.
    /// The optimistic flip has been rolled back.
    Failed { message: String },
}

/// Serializes toggle mutations so at most one is in flight per rule, while
/// unrelated rules can still be toggled concurrently.
pub struct ToggleCoordinator {
    gateway: Arc<GatewayClient>,
    registry: Arc<RwLock<RuleRegistry>>,
    busy: Mutex<HashSet<String>>,
}

/// Scoped busy marker. Dropping the guard releases the rule on every exit
/// path, so a settled request can never leave its rule stuck busy.
struct BusyGuard<'a> {
    busy: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.lock().remove(&self.id);
    }
}

impl ToggleCoordinator {
    pub fn new(gateway: Arc<GatewayClient>, registry: Arc<RwLock<RuleRegistry>>) -> Self {
        Self {
            gateway,
            registry,
            busy: Mutex::new(HashSet::new()),
        }
    }

    pub fn registry(&self) -> &Arc<RwLock<RuleRegistry>> {
        &self.registry
    }

    /// Whether a mutation for `id` is currently in flight. The presentation
    /// layer uses this to disable the rule's switch.
    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.lock().contains(id)
    }

    /// Toggles rule `id` to the opposite of its current state.
    ///
    /// Per rule: `idle → busy → idle`, with `busy` reachable only from
    /// `idle`. The `enabled` field is flipped optimistically before the
    /// request goes out and rolled back to the captured previous value if
    /// the request settles in failure.
    ///
    /// An unknown rule id is a programming error and propagates as `Err`;
    /// network and HTTP failures are expected conditions reported through
    /// `ToggleOutcome::Failed`.
    pub async fn toggle(&self, id: &str) -> Result<ToggleOutcome> {
        let _guard = match self.try_acquire(id) {
            Some(guard) => guard,
            None => {
                debug!("Toggle intent for rule {} dropped: already busy", id);
                return Ok(ToggleOutcome::Dropped);
            }
        };

        let (desired, previous) = {
            let mut registry = self.registry.write().await;
            let current = registry
                .get(id)
                .map(|r| r.enabled)
                .ok_or_else(|| anyhow::anyhow!("unknown rule id: {}", id))?;
            let desired = !current;
            let previous = registry
                .apply_optimistic(id, desired)
                .context("optimistic flip failed")?;
            (desired, previous)
        };

        match self.gateway.set_rule_enabled(id, desired).await {
            Ok(()) => {
                debug!("Rule {} confirmed enabled={}", id, desired);
                Ok(ToggleOutcome::Applied { enabled: desired })
            }
            Err(e) => {
                warn!("Toggle of rule {} failed, rolling back: {}", id, e);
                self.registry.write().await.rollback(id, previous);
                Ok(ToggleOutcome::Failed {
                    message: format!("Failed to update rule. Please try again. ({})", e),
                })
            }
        }
    }

    fn try_acquire(&self, id: &str) -> Option<BusyGuard<'_>> {
        let mut busy = self.busy.lock();
        if !busy.insert(id.to_string()) {
            return None;
        }
        Some(BusyGuard {
            busy: &self.busy,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Rule;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rule(id: &str, enabled: bool) -> Rule {
        Rule {
            id: id.to_string(),
            name: "SQLi".to_string(),
            description: "blocks SQL injection".to_string(),
            enabled,
        }
    }

    async fn coordinator_for(server: &MockServer, rules: Vec<Rule>) -> ToggleCoordinator {
        let gateway =
            Arc::new(GatewayClient::new(&server.uri(), Duration::from_secs(2)).unwrap());
        let mut registry = RuleRegistry::new();
        registry.replace_all(rules);
        ToggleCoordinator::new(gateway, Arc::new(RwLock::new(registry)))
    }

    #[tokio::test]
    async fn test_toggle_applies_optimistically_and_confirms() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/protection-rules/r1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, vec![rule("r1", false)]).await;
        let outcome = coordinator.toggle("r1").await.unwrap();

        assert_eq!(outcome, ToggleOutcome::Applied { enabled: true });
        let registry = coordinator.registry().read().await;
        assert!(registry.get("r1").unwrap().enabled);
    }

    #[tokio::test]
    async fn test_toggle_rolls_back_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/protection-rules/r1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let coordinator = coordinator_for(&server, vec![rule("r1", true)]).await;
        let outcome = coordinator.toggle("r1").await.unwrap();

        assert!(matches!(outcome, ToggleOutcome::Failed { .. }));
        let registry = coordinator.registry().read().await;
        assert!(registry.get("r1").unwrap().enabled);
        assert!(!coordinator.is_busy("r1"));
    }

    #[tokio::test]
    async fn test_unknown_rule_id_is_an_error() {
        let server = MockServer::start().await;
        let coordinator = coordinator_for(&server, Vec::new()).await;

        assert!(coordinator.toggle("missing").await.is_err());
        assert!(!coordinator.is_busy("missing"));
    }

    #[tokio::test]
    async fn test_second_intent_on_busy_rule_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/protection-rules/r1"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .expect(1)
            .mount(&server)
            .await;

        let coordinator =
            Arc::new(coordinator_for(&server, vec![rule("r1", false)]).await);

        let first = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.toggle("r1").await.unwrap() })
        };

        // Let the first intent acquire the busy flag and go out on the wire.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(coordinator.is_busy("r1"));

        let second = coordinator.toggle("r1").await.unwrap();
        assert_eq!(second, ToggleOutcome::Dropped);

        let first = first.await.unwrap();
        assert_eq!(first, ToggleOutcome::Applied { enabled: true });
        assert!(!coordinator.is_busy("r1"));
    }

    #[tokio::test]
    async fn test_unrelated_rules_toggle_concurrently() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/protection-rules/r1"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/protection-rules/r2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let coordinator = Arc::new(
            coordinator_for(&server, vec![rule("r1", false), rule("r2", false)]).await,
        );

        let slow = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.toggle("r1").await.unwrap() })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(coordinator.is_busy("r1"));

        // r1 being busy must not block r2.
        let other = coordinator.toggle("r2").await.unwrap();
        assert_eq!(other, ToggleOutcome::Applied { enabled: true });

        assert_eq!(
            slow.await.unwrap(),
            ToggleOutcome::Applied { enabled: true }
        );
    }
}
