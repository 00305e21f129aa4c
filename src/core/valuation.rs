//! Valuation engine: pure functions over in-memory portfolio records.
//!
//! None of these functions round; formatting to whole rupees happens only
//! at display time so rounding error never compounds across funds.

use crate::core::model::{Member, MutualFund, Portfolio};

/// Percentage change between the recorded purchase NAV and the NAV implied
/// by the tracked current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitLoss {
    pub percent: f64,
    pub is_profit: bool,
}

/// Current and invested value of one member's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemberTotals {
    pub current_value: f64,
    pub invested_value: f64,
}

/// Whole-portfolio aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioTotals {
    pub current_value: f64,
    pub invested_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
    pub fund_count: usize,
}

// Entry validation normalizes a zero purchase NAV to `None`, but stored
// blobs may predate it; a non-positive NAV counts as not recorded.
fn recorded_purchase_nav(fund: &MutualFund) -> Option<f64> {
    fund.purchase_nav.filter(|nav| *nav > 0.0)
}

/// Cost basis of a holding: `units * purchase_nav` when the purchase NAV is
/// known, else the tracked current value (unknown basis, assume no gain).
pub fn invested_value(fund: &MutualFund) -> f64 {
    match recorded_purchase_nav(fund) {
        Some(nav) => fund.units * nav,
        None => fund.value,
    }
}

/// Profit/loss percent via implied NAV movement, `None` when no purchase
/// NAV was recorded. The implied current NAV is `value / units`; units are
/// validated strictly positive at entry.
pub fn profit_loss_percent(fund: &MutualFund) -> Option<ProfitLoss> {
    let purchase_nav = recorded_purchase_nav(fund)?;
    let current_nav = fund.value / fund.units;
    let percent = (current_nav - purchase_nav) / purchase_nav * 100.0;
    Some(ProfitLoss {
        percent,
        is_profit: percent >= 0.0,
    })
}

pub fn member_totals(member: &Member) -> MemberTotals {
    member
        .funds
        .iter()
        .fold(MemberTotals::default(), |acc, fund| MemberTotals {
            current_value: acc.current_value + fund.value,
            invested_value: acc.invested_value + invested_value(fund),
        })
}

/// Sums member totals and derives profit/loss. The percentage carries an
/// explicit zero-guard so an empty portfolio reports 0 instead of NaN.
pub fn portfolio_totals(portfolio: &Portfolio) -> PortfolioTotals {
    let mut current_value = 0.0;
    let mut invested = 0.0;
    let mut fund_count = 0;

    for member in &portfolio.members {
        let totals = member_totals(member);
        current_value += totals.current_value;
        invested += totals.invested_value;
        fund_count += member.funds.len();
    }

    let profit_loss = current_value - invested;
    let profit_loss_percentage = if invested > 0.0 {
        profit_loss / invested * 100.0
    } else {
        0.0
    };

    PortfolioTotals {
        current_value,
        invested_value: invested,
        profit_loss,
        profit_loss_percentage,
        fund_count,
    }
}
