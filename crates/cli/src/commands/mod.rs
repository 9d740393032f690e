pub mod onboard;
pub mod quote;
pub mod status;
pub mod tiers;
