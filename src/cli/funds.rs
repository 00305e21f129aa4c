use crate::cli::ui;
use crate::core::model::FundDraft;
use crate::portfolio::PortfolioService;
use anyhow::Result;

pub async fn add(service: &PortfolioService, member_id: &str, draft: FundDraft) -> Result<()> {
    let fund = service.add_fund(member_id, draft).await?;
    println!(
        "Added {} ({} units, {}) with id {}",
        fund.name,
        fund.units,
        ui::format_inr(fund.value),
        fund.id
    );
    Ok(())
}

pub async fn remove(service: &PortfolioService, member_id: &str, fund_id: &str) -> Result<()> {
    let removed = service.remove_fund(member_id, fund_id).await?;
    println!("Removed {} ({})", removed.name, ui::format_inr(removed.value));
    Ok(())
}
