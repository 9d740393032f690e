//! Rule loading: fetches the rule documents and normalizes them.
//!
//! The three per-tier documents are fetched concurrently and all of them
//! are awaited, whatever their outcome. A failed tier is dropped and logged,
//! never raised. Only when *no* tier document survives is the legacy
//! combined document fetched, and only its failure is fatal.

use crate::source::{DocumentSource, HttpSource, RoutingSource};
use futures::future::join_all;
use splitpay_config::{AppConfig, SourcesConfig};
use splitpay_core::{FetchError, RuleLoadError, RuleSet};
use splitpay_rules::{TIER_SLOTS, TierDocument, from_legacy_body, from_tier_documents};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Where each rule document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLocations {
    /// One location per positional slot; extra entries are ignored.
    pub tiers: Vec<String>,
    pub legacy: String,
}

impl From<&SourcesConfig> for RuleLocations {
    fn from(sources: &SourcesConfig) -> Self {
        Self {
            tiers: sources.tiers.clone(),
            legacy: sources.legacy.clone(),
        }
    }
}

/// Fetches and normalizes a [`RuleSet`].
pub struct RuleLoader {
    source: Arc<dyn DocumentSource>,
    locations: RuleLocations,
    force_localized_legal: bool,
}

impl RuleLoader {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        locations: RuleLocations,
        force_localized_legal: bool,
    ) -> Self {
        Self {
            source,
            locations,
            force_localized_legal,
        }
    }

    /// Build a loader that reads the configured locations over HTTP or
    /// from disk.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let http = HttpSource::new(Duration::from_secs(config.http.timeout_secs))?;
        Ok(Self::new(
            Arc::new(RoutingSource::new(http)),
            RuleLocations::from(&config.sources),
            config.force_localized_legal,
        ))
    }

    pub fn locations(&self) -> &RuleLocations {
        &self.locations
    }

    /// Resolve the rule set.
    pub async fn load(&self) -> Result<RuleSet, RuleLoadError> {
        let attempts = self
            .locations
            .tiers
            .iter()
            .take(TIER_SLOTS)
            .enumerate()
            .map(|(slot, location)| self.fetch_tier(slot, location));
        let settled = join_all(attempts).await;

        let mut slots: [Option<TierDocument>; TIER_SLOTS] = Default::default();
        for (slot, doc) in settled.into_iter().enumerate() {
            slots[slot] = doc;
        }

        if let Some(rules) = from_tier_documents(slots, self.force_localized_legal) {
            return Ok(rules);
        }

        warn!(
            source = self.source.name(),
            legacy = %self.locations.legacy,
            "No per-tier rule document available, falling back to legacy rules"
        );
        let body = self.source.fetch(&self.locations.legacy).await?;
        from_legacy_body(&self.locations.legacy, &body)
    }

    /// Fetch and parse one per-tier document. Failures yield `None`.
    async fn fetch_tier(&self, slot: usize, location: &str) -> Option<TierDocument> {
        if location.trim().is_empty() {
            debug!(slot, "No location configured for tier slot");
            return None;
        }

        let body = match self.source.fetch(location).await {
            Ok(body) => body,
            Err(e) => {
                warn!(slot, location, error = %e, "Tier document unavailable");
                return None;
            }
        };

        match TierDocument::from_json(&body) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(slot, location, error = %e, "Tier document malformed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Wraps a static source and records every location requested.
    struct RecordingSource {
        inner: StaticSource,
        requested: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn new(inner: StaticSource) -> Self {
            Self {
                inner,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        async fn fetch(&self, location: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(location.to_string());
            self.inner.fetch(location).await
        }
    }

    fn locations() -> RuleLocations {
        RuleLocations {
            tiers: vec!["t1.json".into(), "t2.json".into(), "t3.json".into()],
            legacy: "rules.json".into(),
        }
    }

    fn tier_body(range: serde_json::Value) -> String {
        json!({
            "range": range,
            "bands": [{"months": 3, "amount": 25}, {"months": "final", "amount": 25}],
            "legal_lines": "Supplied.",
            "apr_nominal": 0.1995,
            "apr_representative": 0.2168,
            "open_fee_monthly": 0.0
        })
        .to_string()
    }

    fn legacy_body() -> serde_json::Value {
        json!({"tabs": [
            {"range": {"max": 1250}, "columns": [{"purchase": 0, "rle": [[3, 25], [1, 12.5]]}]},
            {"range": {"min": 1250.01}, "legal_lines": ["Legacy", "text."]}
        ]})
    }

    fn loader(source: Arc<RecordingSource>, force: bool) -> RuleLoader {
        RuleLoader::new(source, locations(), force)
    }

    #[tokio::test]
    async fn all_tiers_loaded_and_sorted() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new()
                .with("t1.json", tier_body(json!({"min": 5001})))
                .with("t2.json", tier_body(json!({"max": 1250})))
                .with("t3.json", tier_body(json!({"min": 1250, "max": 5000}))),
        ));
        let rules = loader(source.clone(), false).load().await.unwrap();

        let ids: Vec<_> = rules.tiers().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["medium", "large", "small"]);
        assert_eq!(rules.tiers()[0].legal_text(), "Supplied.");
        assert!(!source.requested().contains(&"rules.json".to_string()));
    }

    #[tokio::test]
    async fn partial_load_keeps_successes_without_legacy() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new()
                .with("t1.json", tier_body(json!({"max": 1250})))
                .with("t2.json", "not json at all")
                .with("t3.json", tier_body(json!({"min": 5001})))
                .with("rules.json", legacy_body().to_string()),
        ));
        let rules = loader(source.clone(), false).load().await.unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.tiers()[0].id, "small");
        assert_eq!(rules.tiers()[1].id, "large");
        assert_eq!(source.requested().len(), 3);
        assert!(!source.requested().contains(&"rules.json".to_string()));
    }

    #[tokio::test]
    async fn legacy_used_verbatim_when_every_tier_fails() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new().with("rules.json", legacy_body().to_string()),
        ));
        let rules = loader(source.clone(), false).load().await.unwrap();

        let expected: RuleSet = serde_json::from_value(legacy_body()["tabs"].clone()).unwrap();
        assert_eq!(rules, expected);
        assert_eq!(source.requested().last().map(String::as_str), Some("rules.json"));
        assert_eq!(source.requested().len(), 4);
    }

    #[tokio::test]
    async fn legacy_fetch_failure_is_fatal() {
        let source = Arc::new(RecordingSource::new(StaticSource::new()));
        let err = loader(source, false).load().await.unwrap_err();
        assert!(matches!(err, RuleLoadError::LegacyFetch(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn legacy_parse_failure_is_fatal() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new().with("rules.json", "{\"tabs\": \"nope\"}"),
        ));
        let err = loader(source, false).load().await.unwrap_err();
        assert!(matches!(err, RuleLoadError::LegacyParse { .. }));
    }

    #[tokio::test]
    async fn force_localized_clears_supplied_legal_text() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new().with("t1.json", tier_body(json!({"max": 1250}))),
        ));
        let rules = loader(source, true).load().await.unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.tiers()[0].legal.is_none());
    }

    #[tokio::test]
    async fn blank_and_extra_locations_are_skipped() {
        let source = Arc::new(RecordingSource::new(
            StaticSource::new()
                .with("t2.json", tier_body(json!({"max": 1250})))
                .with("t4.json", tier_body(json!({"min": 9000}))),
        ));
        let locations = RuleLocations {
            tiers: vec![String::new(), "t2.json".into(), "t3.json".into(), "t4.json".into()],
            legacy: "rules.json".into(),
        };
        let rules = RuleLoader::new(source.clone(), locations, false)
            .load()
            .await
            .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules.tiers()[0].id, "medium");
        assert_eq!(source.requested(), vec!["t2.json".to_string(), "t3.json".to_string()]);
    }

    /// Holds every tier fetch at a barrier until all three are in flight.
    struct BarrierSource {
        inner: StaticSource,
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl DocumentSource for BarrierSource {
        fn name(&self) -> &str {
            "barrier"
        }

        async fn fetch(&self, location: &str) -> Result<String, FetchError> {
            if location != "rules.json" {
                self.barrier.wait().await;
            }
            self.inner.fetch(location).await
        }
    }

    #[tokio::test]
    async fn tier_fetches_run_concurrently() {
        let source = Arc::new(BarrierSource {
            inner: StaticSource::new()
                .with("t1.json", tier_body(json!({"max": 1250})))
                .with("t2.json", tier_body(json!({"min": 1250, "max": 5000})))
                .with("t3.json", "not json at all"),
            barrier: tokio::sync::Barrier::new(TIER_SLOTS),
        });
        let loader = RuleLoader::new(source, locations(), false);

        let rules = tokio::time::timeout(Duration::from_secs(2), loader.load())
            .await
            .expect("tier fetches were not issued concurrently")
            .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(loader.locations(), &locations());
    }

    #[test]
    fn locations_from_config() {
        let sources = SourcesConfig::under("/srv/rules");
        let locations = RuleLocations::from(&sources);
        assert_eq!(locations.tiers[0], "/srv/rules/tier1.json");
        assert_eq!(locations.legacy, "/srv/rules/rules.json");
    }
}
