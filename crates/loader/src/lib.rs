//! Rule loading for SplitPay.
//!
//! Fetches the rule documents from wherever they live, tolerates failing
//! per-tier documents, falls back to the legacy combined document when
//! nothing else is available, and caches the result for a widget session.

pub mod loader;
pub mod session;
pub mod source;

pub use loader::{RuleLoader, RuleLocations};
pub use session::RuleSession;
pub use source::{DocumentSource, FileSource, HttpSource, RoutingSource, StaticSource};
