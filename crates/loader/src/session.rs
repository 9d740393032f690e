//! Per-session rule cache.
//!
//! A widget session resolves its rule set once, on the first request, and
//! reuses it for every later quote. A failed resolution is not cached, so
//! the next request tries again.

use crate::loader::RuleLoader;
use chrono::NaiveDate;
use splitpay_core::{RuleLoadError, RuleSet};
use splitpay_rules::{LegalOptions, QuoteOutcome, ScheduleEngine};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// One widget session: a loader plus the rule set it resolved.
pub struct RuleSession {
    loader: RuleLoader,
    options: LegalOptions,
    rules: OnceCell<Arc<RuleSet>>,
}

impl RuleSession {
    pub fn new(loader: RuleLoader, options: LegalOptions) -> Self {
        Self {
            loader,
            options,
            rules: OnceCell::new(),
        }
    }

    /// The session's rule set, loading it on first use.
    pub async fn rules(&self) -> Result<Arc<RuleSet>, RuleLoadError> {
        self.rules
            .get_or_try_init(|| async {
                let rules = self.loader.load().await?;
                info!(tiers = rules.len(), "Session rules resolved");
                Ok::<_, RuleLoadError>(Arc::new(rules))
            })
            .await
            .cloned()
    }

    /// Whether the rule set has been resolved yet.
    pub fn is_resolved(&self) -> bool {
        self.rules.initialized()
    }

    /// An engine over the session's rule set.
    pub async fn engine(&self) -> Result<ScheduleEngine, RuleLoadError> {
        Ok(ScheduleEngine::new(self.rules().await?, self.options))
    }

    /// Quote a total against the session's rule set.
    pub async fn quote(&self, total: f64, today: NaiveDate) -> Result<QuoteOutcome, RuleLoadError> {
        Ok(self.engine().await?.quote(total, today))
    }
}
