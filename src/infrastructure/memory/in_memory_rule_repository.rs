//! In-memory rule repository, loadable from a JSON rule file.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::domain::entities::RoutingRule;
use crate::domain::repositories::RoutingRuleRepository;
use crate::error::AppError;

/// Rules grouped by link, held in declaration order.
///
/// Used by tooling and tests in place of the product database. The JSON format is
/// an array of rules with camelCase fields, the same shape
/// [`RoutingRule`] serializes to.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleRepository {
    rules_by_link: HashMap<String, Vec<RoutingRule>>,
}

impl InMemoryRuleRepository {
    pub fn new(rules: Vec<RoutingRule>) -> Self {
        let mut rules_by_link: HashMap<String, Vec<RoutingRule>> = HashMap::new();
        for rule in rules {
            rules_by_link
                .entry(rule.link_id.clone())
                .or_default()
                .push(rule);
        }
        Self { rules_by_link }
    }

    /// Parses a JSON array of rules.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the document is not a valid rule array.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let rules: Vec<RoutingRule> = serde_json::from_str(raw).map_err(|e| {
            AppError::bad_request(
                "Invalid rule file",
                json!({ "reason": e.to_string(), "line": e.line(), "column": e.column() }),
            )
        })?;
        debug!(rules = rules.len(), "Loaded routing rules");
        Ok(Self::new(rules))
    }

    /// Reads and parses a JSON rule file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the file cannot be read and
    /// [`AppError::Validation`] if its content is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::not_found(
                "Rule file not readable",
                json!({ "path": path.display().to_string(), "reason": e.to_string() }),
            )
        })?;
        Self::from_json_str(&raw)
    }

    /// All rules of a link, disabled ones included.
    pub fn rules_for(&self, link_id: &str) -> &[RoutingRule] {
        self.rules_by_link
            .get(link_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Link ids with at least one rule, sorted.
    pub fn link_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rules_by_link.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl RoutingRuleRepository for InMemoryRuleRepository {
    async fn find_enabled_by_link(&self, link_id: &str) -> Result<Vec<RoutingRule>, AppError> {
        Ok(self
            .rules_for(link_id)
            .iter()
            .filter(|rule| rule.enabled)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"[
        {
            "id": "r1", "linkId": "lnk_a", "name": "Mobile",
            "destinationUrl": "https://m.example.com", "priority": 0,
            "conditions": [{ "variable": "device.type", "operator": "equals", "value": "mobile" }]
        },
        {
            "id": "r2", "linkId": "lnk_a", "name": "Old", "enabled": false,
            "destinationUrl": "https://old.example.com", "priority": 1,
            "conditions": [{ "variable": "geo.country", "operator": "in", "value": "ES" }]
        },
        {
            "id": "r3", "linkId": "lnk_b", "name": "Evening",
            "destinationUrl": "https://night.example.com", "priority": 0,
            "conditions": [{ "variable": "time.hour", "operator": "gte", "value": "18" }]
        }
    ]"#;

    #[tokio::test]
    async fn test_find_enabled_filters_disabled() {
        let repo = InMemoryRuleRepository::from_json_str(RULES).unwrap();

        let rules = repo.find_enabled_by_link("lnk_a").await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "r1");
        assert_eq!(repo.rules_for("lnk_a").len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_link_is_empty() {
        let repo = InMemoryRuleRepository::from_json_str(RULES).unwrap();

        let rules = repo.find_enabled_by_link("missing").await.unwrap();
        assert!(rules.is_empty());
        assert!(repo.rules_for("missing").is_empty());
    }

    #[test]
    fn test_link_ids_sorted() {
        let repo = InMemoryRuleRepository::from_json_str(RULES).unwrap();
        assert_eq!(repo.link_ids(), vec!["lnk_a", "lnk_b"]);
    }

    #[test]
    fn test_declaration_order_kept() {
        let rules = vec![
            RoutingRule::new("x2", "lnk", "second", "https://2", 0),
            RoutingRule::new("x1", "lnk", "first", "https://1", 0),
        ];
        let repo = InMemoryRuleRepository::new(rules);
        let ids: Vec<&str> = repo.rules_for("lnk").iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["x2", "x1"]);
    }

    #[test]
    fn test_invalid_json_is_validation_error() {
        let err = InMemoryRuleRepository::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = InMemoryRuleRepository::from_file("/nonexistent/rules.json").unwrap_err();
        assert_eq!(err.code(), "not_found");
    }
}
