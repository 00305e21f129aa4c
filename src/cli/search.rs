use crate::cli::ui;
use crate::core::lookup::{FundSearchProvider, MIN_QUERY_LEN, normalized_query};
use anyhow::Result;
use comfy_table::Cell;
use indicatif::ProgressBar;
use std::time::Duration;

pub async fn run(provider: &dyn FundSearchProvider, query: &str) -> Result<()> {
    if normalized_query(query).is_none() {
        println!("Enter at least {MIN_QUERY_LEN} characters to search.");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Searching funds...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let results = provider.search(query).await?;
    spinner.finish_and_clear();

    if results.is_empty() {
        println!("No funds matched '{query}'.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Scheme"),
        ui::header_cell("Name"),
        ui::header_cell("Category"),
        ui::header_cell("NAV"),
    ]);
    for result in &results {
        table.add_row(vec![
            Cell::new(&result.id),
            Cell::new(&result.name),
            Cell::new(&result.category),
            Cell::new(format!("₹{:.2}", result.nav))
                .set_alignment(comfy_table::CellAlignment::Right),
        ]);
    }

    println!("{table}");
    Ok(())
}
