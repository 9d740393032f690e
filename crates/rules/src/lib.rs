//! SplitPay rules: the schedule computation engine.
//!
//! Takes raw rule documents to a month-by-month repayment schedule and a
//! legal disclosure for a purchase total:
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌──────────┐   ┌──────────────┐
//! │ Per-tier or  │──▶│ Normalizer │──▶│ Selector │──▶│   Expander   │──▶ schedule
//! │ legacy JSON  │   │ (RuleSet)  │   │  (Tier)  │   ├──────────────┤
//! └──────────────┘   └────────────┘   └──────────┘──▶│ Legal builder│──▶ legal text
//!                                                    └──────────────┘
//! ```
//!
//! Everything here is synchronous and pure. Fetching the documents is the
//! job of `splitpay-loader`.
//!
//! # Example per-tier document
//!
//! ```json
//! {
//!   "id": "small",
//!   "range": { "max": 1250 },
//!   "bands": [{ "months": 3, "amount": 25 }, { "months": "final", "amount": 25 }],
//!   "legal_lines": ["TAE [[21,68 %]]."],
//!   "apr_nominal": 0.1995,
//!   "apr_representative": 0.2168,
//!   "open_fee_monthly": 0.0
//! }
//! ```

pub mod document;
pub mod engine;
pub mod expand;
pub mod legal;
pub mod locale;
pub mod normalize;
pub mod select;

pub use document::{LegacyDocument, TierDocument};
pub use engine::{Quote, QuoteOutcome, ScheduleEngine};
pub use expand::{expand_amounts, expand_bands, expand_rle, expand_schedule, select_column};
pub use legal::{LegalOptions, TemplateKind, build_legal_text, emphasize, template_kind};
pub use locale::TIER_SLOTS;
pub use normalize::{from_legacy_body, from_tier_documents, tier_from_document};
pub use select::{Selection, select_tier};
