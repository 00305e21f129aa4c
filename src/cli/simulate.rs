use crate::cli::ui;
use crate::core::growth::{CompoundingFrequency, SimulationRow, project_growth};
use anyhow::Result;
use comfy_table::Cell;

fn results_table(rows: &[SimulationRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell("Start Value"),
        ui::header_cell("Growth"),
        ui::header_cell("End Value"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.year),
            ui::money_cell(row.start_value),
            ui::money_cell(row.growth_amount),
            ui::money_cell(row.end_value),
        ]);
    }

    table.to_string()
}

pub fn run(
    start_value: f64,
    annual_return_percent: f64,
    years: u32,
    frequency: CompoundingFrequency,
) -> Result<()> {
    let rows = project_growth(start_value, annual_return_percent, years, frequency);
    if rows.is_empty() {
        println!("Nothing to simulate: 0 years requested.");
        return Ok(());
    }

    println!(
        "{}\n",
        ui::style_text("Portfolio Growth Simulation", ui::StyleType::Title)
    );
    println!("{}", results_table(&rows));

    let end_value = rows[rows.len() - 1].end_value;
    println!(
        "\nStarting with {} and compounding {frequency} at {annual_return_percent}% annual \
         returns, your portfolio would grow to {}.",
        ui::format_inr(start_value),
        ui::style_text(&ui::format_inr(end_value), ui::StyleType::TotalValue),
    );
    if start_value > 0.0 {
        let overall = (end_value / start_value - 1.0) * 100.0;
        let direction = if overall >= 0.0 { "growth" } else { "decline" };
        println!(
            "That's a {direction} of {} over {years} year(s).",
            ui::style_text(&format!("{overall:.1}%"), ui::StyleType::TotalLabel)
        );
    }
    Ok(())
}
