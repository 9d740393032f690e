//! Quote engine.
//!
//! The engine holds an immutable [`RuleSet`] and turns a purchase total
//! into a [`QuoteOutcome`]. Every call is computed fresh from its inputs;
//! nothing about the previous quote is remembered.

use crate::expand::expand_schedule;
use crate::legal::{LegalOptions, build_legal_text};
use crate::select::{Selection, select_tier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use splitpay_core::{RuleSet, ScheduleEntry, SelectedTier, Tier};
use std::sync::Arc;
use tracing::debug;

/// A computed schedule for one total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The purchase total this quote was computed for.
    pub total: f64,
    /// Position of the selected tier in the rule set.
    pub tier_index: usize,
    pub tier: SelectedTier,
    pub schedule: Vec<ScheduleEntry>,
    pub legal: String,
}

impl Quote {
    /// Sum of every scheduled payment.
    pub fn schedule_total(&self) -> f64 {
        self.schedule.iter().map(|e| e.amount).sum()
    }

    pub fn months(&self) -> usize {
        self.schedule.len()
    }
}

/// What the presentation layer should render for a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuoteOutcome {
    /// The total is missing, zero, negative or not a number.
    EmptyCart,
    /// No tier's range contains the total.
    CeilingExceeded { total: f64 },
    Quoted(Quote),
}

impl QuoteOutcome {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteOutcome::Quoted(q) => Some(q),
            _ => None,
        }
    }
}

/// Pure quote engine over a resolved rule set.
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    rules: Arc<RuleSet>,
    options: LegalOptions,
}

impl ScheduleEngine {
    pub fn new(rules: Arc<RuleSet>, options: LegalOptions) -> Self {
        Self { rules, options }
    }

    /// Same rules, different legal options.
    pub fn with_options(&self, options: LegalOptions) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            options,
        }
    }

    /// Quote a purchase total. `today` is the fallback validity date for
    /// synthesized legal text.
    pub fn quote(&self, total: f64, today: NaiveDate) -> QuoteOutcome {
        if !total.is_finite() || total <= 0.0 {
            debug!(total, "Empty cart, skipping tier selection");
            return QuoteOutcome::EmptyCart;
        }

        let (index, tier) = match select_tier(&self.rules, total) {
            Selection::Matched { index, tier } => (index, tier),
            Selection::NoMatch => {
                debug!(total, tiers = self.rules.len(), "No tier contains total");
                return QuoteOutcome::CeilingExceeded { total };
            }
        };

        let schedule = expand_schedule(tier, total);
        let legal = build_legal_text(tier, &self.options, today);
        debug!(total, tier = %tier.id, months = schedule.len(), "Quote computed");

        QuoteOutcome::Quoted(Quote {
            total,
            tier_index: index,
            tier: self.selected(tier),
            schedule,
            legal,
        })
    }

    /// The record exposed for display, with the label in the active
    /// language (falling back to the tier id).
    fn selected(&self, tier: &Tier) -> SelectedTier {
        let label = tier
            .label_for(self.options.language.code())
            .filter(|l| !l.is_empty())
            .unwrap_or(tier.id.as_str())
            .to_string();
        SelectedTier {
            id: tier.id.clone(),
            label,
            range: tier.range,
        }
    }
}
