use crate::gateway::Rule;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// Internal consistency fault: the coordinator only ever mutates ids it
    /// read from this registry, so hitting this means a programming error,
    /// not a user-facing condition.
    #[error("unknown rule id: {0}")]
    UnknownRuleId(String),
}

/// In-memory mirror of the server-side rule list.
///
/// Supports optimistic mutation with rollback. `enabled` is always flipped
/// as a single assignment, so readers observe either the confirmed server
/// state or a pending optimistic guess, never a partial value.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total replacement on (re)load. Insertion order is preserved as
    /// received from the server.
    pub fn replace_all(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Flips `enabled` immediately and returns the prior value so the caller
    /// can roll back if the server rejects the mutation.
    pub fn apply_optimistic(&mut self, id: &str, enabled: bool) -> Result<bool, RegistryError> {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RegistryError::UnknownRuleId(id.to_string()))?;

        let previous = rule.enabled;
        rule.enabled = enabled;
        Ok(previous)
    }

    /// Restores `enabled` after a failed mutation. A missing id is ignored:
    /// the list may have been replaced by a reload while the request was in
    /// flight, and the reload already carries the authoritative state.
    pub fn rollback(&mut self, id: &str, previous: bool) {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
            rule.enabled = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> Vec<Rule> {
        vec![
            Rule {
                id: "r1".to_string(),
                name: "SQLi".to_string(),
                description: "blocks SQL injection".to_string(),
                enabled: true,
            },
            Rule {
                id: "r2".to_string(),
                name: "XSS".to_string(),
                description: "blocks cross-site scripting".to_string(),
                enabled: false,
            },
        ]
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.rules()[0].id, "r1");
        assert_eq!(registry.rules()[1].id, "r2");
        assert!(registry.get("r1").unwrap().enabled);
    }

    #[test]
    fn test_replace_all_discards_previous_rules() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());
        registry.replace_all(vec![Rule {
            id: "r3".to_string(),
            name: "Rate Limiting".to_string(),
            description: "per-IP limits".to_string(),
            enabled: true,
        }]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("r1").is_none());
        assert!(registry.get("r3").is_some());
    }

    #[test]
    fn test_apply_optimistic_returns_previous_value() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());

        let previous = registry.apply_optimistic("r2", true).unwrap();
        assert!(!previous);
        assert!(registry.get("r2").unwrap().enabled);
    }

    #[test]
    fn test_apply_optimistic_unknown_id() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());

        let err = registry.apply_optimistic("missing", true).unwrap_err();
        assert_eq!(err, RegistryError::UnknownRuleId("missing".to_string()));
    }

    #[test]
    fn test_rollback_restores_previous_value() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());

        let previous = registry.apply_optimistic("r1", false).unwrap();
        assert!(!registry.get("r1").unwrap().enabled);

        registry.rollback("r1", previous);
        assert!(registry.get("r1").unwrap().enabled);
    }

    #[test]
    fn test_rollback_after_reload_is_a_no_op() {
        let mut registry = RuleRegistry::new();
        registry.replace_all(sample_rules());
        registry.replace_all(Vec::new());

        registry.rollback("r1", true);
        assert!(registry.is_empty());
    }
}
