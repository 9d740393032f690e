//! Canonical rule model: the shapes every rule document is normalized into.
//!
//! The legacy combined document already uses this shape for its `tabs`
//! array, so these types deserialize both the canonical form and the
//! legacy tab form without a translation step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The normalized, ordered collection of tiers for one widget session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    tiers: Vec<Tier>,
}

impl RuleSet {
    /// Build a rule set from tiers, keeping the given order.
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// Build a rule set, ordering tiers ascending by range lower bound.
    ///
    /// The sort is stable, so tiers with equal lower bounds keep their
    /// input order.
    pub fn sorted(mut tiers: Vec<Tier>) -> Self {
        tiers.sort_by(|a, b| a.range.lower().total_cmp(&b.range.lower()));
        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// One amount-range-specific rule (a.k.a. tab).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub range: Range,

    /// Display label keyed by language code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub label: BTreeMap<String, String>,

    /// Preferred schedule description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<Band>,

    /// Legacy schedule description, used only when `bands` is empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,

    /// Pass-through legal text supplied with the rule.
    #[serde(default, alias = "legal_lines", skip_serializing_if = "Option::is_none")]
    pub legal: Option<LegalLines>,

    #[serde(default)]
    pub meta: TierMeta,
}

impl Tier {
    /// Label in the given language, if the tier carries one.
    pub fn label_for(&self, lang: &str) -> Option<&str> {
        self.label.get(lang).map(String::as_str)
    }

    /// Pass-through legal text, joined and trimmed. Empty when absent.
    pub fn legal_text(&self) -> String {
        self.legal
            .as_ref()
            .map(LegalLines::joined)
            .unwrap_or_default()
    }
}

/// An inclusive amount range. Missing bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Range {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Inclusive lower bound, `-inf` when absent.
    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(f64::NEG_INFINITY)
    }

    /// Inclusive upper bound, `+inf` when absent.
    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    pub fn contains(&self, total: f64) -> bool {
        total >= self.lower() && total <= self.upper()
    }
}

/// How many months a band lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonths", into = "RawMonths")]
pub enum Months {
    /// Repeat for exactly this many months.
    Count(u32),
    /// Continue until the balance is repaid.
    Final,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawMonths {
    Count(u32),
    Label(String),
}

impl TryFrom<RawMonths> for Months {
    type Error = String;

    fn try_from(raw: RawMonths) -> Result<Self, Self::Error> {
        match raw {
            RawMonths::Count(n) => Ok(Months::Count(n)),
            RawMonths::Label(s) if s == "final" => Ok(Months::Final),
            RawMonths::Label(s) => Err(format!("invalid band months: {s:?}")),
        }
    }
}

impl From<Months> for RawMonths {
    fn from(m: Months) -> Self {
        match m {
            Months::Count(n) => RawMonths::Count(n),
            Months::Final => RawMonths::Label("final".into()),
        }
    }
}

/// A schedule step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub months: Months,
    pub amount: f64,
}

impl Band {
    pub fn fixed(months: u32, amount: f64) -> Self {
        Self {
            months: Months::Count(months),
            amount,
        }
    }

    pub fn final_step(amount: f64) -> Self {
        Self {
            months: Months::Final,
            amount,
        }
    }

    pub fn is_final(&self) -> bool {
        self.months == Months::Final
    }
}

/// A legacy schedule column: a purchase threshold and run-length-encoded
/// `(repeat count, amount)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub purchase: f64,
    #[serde(default)]
    pub rle: Vec<(u32, f64)>,
}

/// Legal text given either as a single string or as a list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegalLines {
    One(String),
    Many(Vec<String>),
}

impl LegalLines {
    /// Lines are joined with a single space.
    pub fn joined(&self) -> String {
        match self {
            LegalLines::One(s) => s.trim().to_string(),
            LegalLines::Many(lines) => lines
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Rate metadata. All rates are fractions (`0.2168` means 21.68 %).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierMeta {
    #[serde(default)]
    pub apr_nominal: f64,

    #[serde(default)]
    pub apr_representative: f64,

    #[serde(default)]
    pub open_fee_monthly: f64,

    /// ISO date the rates are valid as of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_date: Option<String>,
}

impl TierMeta {
    /// Parse `valid_date`, accepting a plain date or a full timestamp.
    pub fn valid_on(&self) -> Option<NaiveDate> {
        let raw = self.valid_date.as_deref()?.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// One month of a repayment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub amount: f64,
}

impl std::fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}  {:.2}", self.month, self.amount)
    }
}

/// The tier record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTier {
    pub id: String,
    pub label: String,
    pub range: Range,
}
