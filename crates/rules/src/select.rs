//! Range selection: picks the tier whose range contains a total.

use splitpay_core::{RuleSet, Tier};

/// The outcome of selecting a tier for a total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// The first tier, in rule-set order, whose range contains the total.
    Matched { index: usize, tier: &'a Tier },
    /// No tier contains the total (the credit ceiling is exceeded).
    NoMatch,
}

impl<'a> Selection<'a> {
    pub fn tier(&self) -> Option<&'a Tier> {
        match self {
            Selection::Matched { tier, .. } => Some(*tier),
            Selection::NoMatch => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Matched { index, .. } => Some(*index),
            Selection::NoMatch => None,
        }
    }
}

/// Scan the rule set in order and return the first tier whose inclusive
/// range contains `total`.
pub fn select_tier(rules: &RuleSet, total: f64) -> Selection<'_> {
    rules
        .tiers()
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.range.contains(total))
        .map(|(index, tier)| Selection::Matched { index, tier })
        .unwrap_or(Selection::NoMatch)
}
