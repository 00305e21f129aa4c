use crate::cli::ui;
use crate::core::valuation;
use crate::portfolio::PortfolioService;
use anyhow::Result;
use comfy_table::Cell;

pub async fn add(service: &PortfolioService, name: &str) -> Result<()> {
    let member = service.add_member(name).await?;
    println!("Added member {} (id: {})", member.name, member.id);
    Ok(())
}

pub async fn remove(service: &PortfolioService, member_id: &str) -> Result<()> {
    let removed = service.remove_member(member_id).await?;
    println!(
        "Removed member {} and {} fund(s).",
        removed.name,
        removed.funds.len()
    );
    Ok(())
}

pub async fn list(service: &PortfolioService) -> Result<()> {
    let portfolio = service.portfolio().await;
    if portfolio.members.is_empty() {
        println!("No members yet. Add one with `famfolio member add <NAME>`.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell("Funds"),
        ui::header_cell("Value"),
        ui::header_cell("Invested"),
    ]);

    for member in &portfolio.members {
        let totals = valuation::member_totals(member);
        table.add_row(vec![
            Cell::new(&member.id),
            Cell::new(&member.name),
            Cell::new(member.funds.len()),
            ui::money_cell(totals.current_value),
            ui::money_cell(totals.invested_value),
        ]);
    }

    println!("{table}");
    Ok(())
}
