//! Legal text: the disclosure paragraph shown under a schedule.
//!
//! Tier-supplied text is passed through unless the override flag forces
//! the localized template. Either way the result goes through
//! [`emphasize`], which turns `[[span]]` into `<strong>span</strong>`.
//! That is the whole markup language.

use crate::locale::{self, format_currency, format_date, format_percent};
use chrono::NaiveDate;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use splitpay_core::{Language, Range, Tier};
use std::sync::LazyLock;

static EMPHASIS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[\[(.+?)\]\]").ok());

/// Inputs from the host that shape the legal text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalOptions {
    pub language: Language,
    /// Ignore tier-supplied text and always synthesize.
    pub force_localized: bool,
}

/// Which localized template a range routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Between,
    Single,
    Min,
}

/// Route a range to its template. `None` when the range has no usable
/// bound at all.
///
/// A lower bound of zero or below counts as absent, so a tier starting at
/// zero reads "up to max".
pub fn template_kind(range: &Range) -> Option<TemplateKind> {
    let has_floor = range.min.is_some_and(|v| v.is_finite() && v > 0.0);
    let has_ceiling = range.max.is_some_and(f64::is_finite);
    match (has_floor, has_ceiling) {
        (true, true) => Some(TemplateKind::Between),
        (false, true) => Some(TemplateKind::Single),
        (true, false) => Some(TemplateKind::Min),
        (false, false) => None,
    }
}

/// Build the legal text for a tier.
///
/// `today` stands in for the validity date when the tier has none.
pub fn build_legal_text(tier: &Tier, options: &LegalOptions, today: NaiveDate) -> String {
    if !options.force_localized {
        let supplied = tier.legal_text();
        if !supplied.is_empty() {
            return emphasize(&supplied);
        }
    }
    emphasize(&synthesize(tier, options.language, today))
}

fn synthesize(tier: &Tier, lang: Language, today: NaiveDate) -> String {
    let Some(kind) = template_kind(&tier.range) else {
        return String::new();
    };

    let templates = locale::legal_templates(lang);
    let template = match kind {
        TemplateKind::Between => templates.between,
        TemplateKind::Single => templates.single,
        TemplateKind::Min => templates.min,
    };

    // The "min" variant shows one above the floor so it does not repeat
    // the previous tier's ceiling.
    let floor = tier.range.min.unwrap_or_default();
    let shown_floor = match kind {
        TemplateKind::Min => floor.round() + 1.0,
        _ => floor,
    };
    let ceiling = tier.range.max.unwrap_or_default();
    let date = tier.meta.valid_on().unwrap_or(today);

    template
        .replace("{min}", &format_currency(shown_floor, lang))
        .replace("{max}", &format_currency(ceiling, lang))
        .replace("{tin}", &format_percent(tier.meta.apr_nominal, lang))
        .replace("{tae}", &format_percent(tier.meta.apr_representative, lang))
        .replace("{fee}", &format_percent(tier.meta.open_fee_monthly, lang))
        .replace("{date}", &format_date(date, lang))
}

/// Wrap every `[[span]]` in `<strong>` tags. Unbalanced markers are left
/// as they are.
pub fn emphasize(text: &str) -> String {
    match EMPHASIS.as_ref() {
        Some(re) => re.replace_all(text, "<strong>$1</strong>").into_owned(),
        None => text.to_string(),
    }
}
