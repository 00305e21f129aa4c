//! Core business logic: data model, valuation engine, growth simulator
//! and the fund-lookup contract. Everything here is pure and synchronous
//! except the provider trait seam.

pub mod config;
pub mod growth;
pub mod log;
pub mod lookup;
pub mod model;
pub mod valuation;

// Re-export main types for cleaner imports
pub use growth::{CompoundingFrequency, SimulationRow, project_growth};
pub use lookup::{FundSearchProvider, FundSearchResult};
pub use model::{FundDraft, Member, MutualFund, Portfolio};
pub use valuation::{MemberTotals, PortfolioTotals, ProfitLoss};
