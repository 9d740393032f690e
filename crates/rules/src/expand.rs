//! Schedule expansion: turns a tier's compact step description into an
//! explicit month-by-month amount sequence.
//!
//! Two descriptions are understood:
//!
//! ```text
//! bands:   [{months: 2, amount: 100}, {months: "final", amount: 100}]
//!          → 100, 100, then 100 per month until the target is repaid
//! columns: [{purchase: 0, rle: [[3, 25], [1, 12.5]]}]
//!          → 25, 25, 25, 12.5
//! ```
//!
//! Bands win whenever a tier has any.

use splitpay_core::{Band, Column, Months, ScheduleEntry, Tier};
use tracing::{debug, warn};

/// Per-month amount used to extend a final band that has no numeric band
/// before it.
pub const FALLBACK_AMOUNT: f64 = 25.0;

/// Tolerance for comparisons against a target sum.
pub const TOLERANCE: f64 = 0.01;

/// Final-band extensions longer than this are logged as suspicious. The
/// schedule itself is not capped.
pub const LONG_EXTENSION_MONTHS: usize = 600;

/// Expand a tier into a schedule with 1-based month indices.
///
/// `target` is the total to be repaid; it only matters when the bands end
/// in a final step.
pub fn expand_schedule(tier: &Tier, target: f64) -> Vec<ScheduleEntry> {
    expand_amounts(tier, target)
        .into_iter()
        .enumerate()
        .map(|(i, amount)| ScheduleEntry {
            month: i as u32 + 1,
            amount,
        })
        .collect()
}

/// Expand a tier into its flat amount sequence.
pub fn expand_amounts(tier: &Tier, target: f64) -> Vec<f64> {
    if !tier.bands.is_empty() {
        return expand_bands(&tier.bands, target);
    }
    match select_column(&tier.columns) {
        Some(column) => expand_rle(&column.rle),
        None => {
            debug!(tier = %tier.id, "Tier has neither bands nor columns");
            Vec::new()
        }
    }
}

/// Expand bands, extending an open-ended final band until `target` is met.
pub fn expand_bands(bands: &[Band], target: f64) -> Vec<f64> {
    let mut amounts = Vec::new();
    let last = bands.len().saturating_sub(1);

    for (i, band) in bands.iter().enumerate() {
        match band.months {
            Months::Count(n) => {
                amounts.extend(std::iter::repeat_n(band.amount, n as usize));
            }
            Months::Final if i == last => {
                extend_final(&mut amounts, &bands[..i], target);
            }
            Months::Final => {
                warn!(position = i, "Ignoring final band that is not the last band");
            }
        }
    }

    amounts
}

fn extend_final(amounts: &mut Vec<f64>, preceding: &[Band], target: f64) {
    let sum_so_far: f64 = amounts.iter().sum();
    let mut deficit = target - sum_so_far;
    if deficit <= TOLERANCE {
        return;
    }

    let fallback = preceding
        .iter()
        .rev()
        .find(|b| matches!(b.months, Months::Count(_)))
        .map(|b| b.amount)
        .filter(|amount| *amount > 0.0)
        .unwrap_or(FALLBACK_AMOUNT);

    let before = amounts.len();
    while deficit - fallback > TOLERANCE {
        amounts.push(fallback);
        deficit -= fallback;
    }
    if deficit > TOLERANCE {
        amounts.push(round2(deficit));
    }
    let added = amounts.len() - before;
    if added > LONG_EXTENSION_MONTHS {
        warn!(fallback, added, target, "Final band extended into a very long schedule");
    } else {
        debug!(fallback, added, "Extended final band to reach target");
    }
}

/// Pick the legacy column to expand: the one with the smallest
/// non-negative purchase threshold, else the last column.
///
/// The purchase total plays no part in this choice.
pub fn select_column(columns: &[Column]) -> Option<&Column> {
    columns
        .iter()
        .filter(|c| c.purchase >= 0.0)
        .min_by(|a, b| a.purchase.total_cmp(&b.purchase))
        .or_else(|| columns.last())
}

/// Expand run-length-encoded `(count, amount)` pairs in order.
pub fn expand_rle(pairs: &[(u32, f64)]) -> Vec<f64> {
    pairs
        .iter()
        .flat_map(|&(count, amount)| std::iter::repeat_n(amount, count as usize))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
