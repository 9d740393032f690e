//! Rule normalization: turns raw rule documents into one canonical
//! [`RuleSet`].
//!
//! Two sources feed a rule set:
//!
//! - up to three per-tier documents, one per positional slot, each of
//!   which may independently be missing;
//! - the legacy combined document, consulted only when *every* per-tier
//!   slot came back empty.
//!
//! The two are never merged.

use crate::document::{LegacyDocument, TierDocument};
use crate::locale::{self, SLOT_IDS, TIER_SLOTS};
use splitpay_core::{Language, LegalLines, Range, RuleLoadError, RuleSet, Tier, TierMeta};
use tracing::{debug, info};

/// Build a rule set from whichever per-tier documents were obtained.
///
/// `slots[i]` is the document for positional slot `i`, or `None` when that
/// fetch failed. Returns `None` when no slot has a document, which is the
/// caller's cue to fall back to the legacy document.
pub fn from_tier_documents(
    slots: [Option<TierDocument>; TIER_SLOTS],
    force_localized_legal: bool,
) -> Option<RuleSet> {
    let tiers: Vec<Tier> = slots
        .into_iter()
        .enumerate()
        .filter_map(|(slot, doc)| doc.map(|d| tier_from_document(slot, d, force_localized_legal)))
        .collect();

    if tiers.is_empty() {
        return None;
    }

    let set = RuleSet::sorted(tiers);
    info!(tiers = set.len(), "Rule set resolved from per-tier documents");
    Some(set)
}

/// Build one canonical tier from a per-tier document in the given slot.
pub fn tier_from_document(slot: usize, doc: TierDocument, force_localized_legal: bool) -> Tier {
    let slot = slot.min(TIER_SLOTS - 1);

    let id = doc
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| SLOT_IDS[slot].to_string());

    let range = doc
        .range
        .unwrap_or_else(|| Range::new(Some(doc.min.unwrap_or(0.0)), doc.max));

    let mut label = doc.label;
    for lang in Language::ALL {
        label
            .entry(lang.code().to_string())
            .or_insert_with(|| locale::slot_label(slot, lang).to_string());
    }

    let legal = if force_localized_legal {
        None
    } else {
        doc.legal_lines
            .map(|lines| lines.joined())
            .filter(|text| !text.is_empty())
            .map(LegalLines::One)
    };

    debug!(slot, id = %id, bands = doc.bands.len(), "Normalized per-tier document");

    Tier {
        id,
        range,
        label,
        bands: doc.bands,
        columns: Vec::new(),
        legal,
        meta: TierMeta {
            apr_nominal: doc.apr_nominal,
            apr_representative: doc.apr_representative,
            open_fee_monthly: doc.open_fee_monthly,
            valid_date: doc.valid_date,
        },
    }
}

/// Parse the legacy combined document body. Its `tabs` become the rule
/// set verbatim.
pub fn from_legacy_body(location: &str, body: &str) -> Result<RuleSet, RuleLoadError> {
    let doc = LegacyDocument::from_json(body).map_err(|e| RuleLoadError::LegacyParse {
        location: location.to_string(),
        reason: e.to_string(),
    })?;
    info!(tiers = doc.tabs.len(), "Rule set resolved from legacy document");
    Ok(doc.tabs)
}
