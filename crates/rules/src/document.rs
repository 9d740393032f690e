//! Raw rule document shapes, as served by the rules CDN.

use serde::Deserialize;
use splitpay_core::{Band, LegalLines, Range, RuleSet};
use std::collections::BTreeMap;

/// A single-tier rule document.
///
/// The range may be given either as a `range` object or as top-level
/// `min`/`max` fields. `bands` and the three rate fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDocument {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub range: Option<Range>,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub label: BTreeMap<String, String>,

    pub bands: Vec<Band>,

    #[serde(default)]
    pub legal_lines: Option<LegalLines>,

    pub apr_nominal: f64,

    pub apr_representative: f64,

    pub open_fee_monthly: f64,

    #[serde(default)]
    pub valid_date: Option<String>,
}

impl TierDocument {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// The legacy combined document: every tier in one `tabs` array,
/// already in canonical shape.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyDocument {
    pub tabs: RuleSet,
}

impl LegacyDocument {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
