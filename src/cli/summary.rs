use crate::cli::ui;
use crate::core::model::{Member, Portfolio};
use crate::core::valuation::{self, PortfolioTotals};
use anyhow::Result;
use comfy_table::Cell;

fn member_section(member: &Member) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Fund"),
        ui::header_cell("Units"),
        ui::header_cell("Inv. NAV"),
        ui::header_cell("Invested"),
        ui::header_cell("Value"),
        ui::header_cell("P/L (%)"),
    ]);

    for fund in &member.funds {
        let invested = valuation::invested_value(fund);
        let profit_loss = valuation::profit_loss_percent(fund);

        table.add_row(vec![
            Cell::new(&fund.name),
            Cell::new(format!("{:.2}", fund.units)),
            ui::format_optional_cell(fund.purchase_nav, |nav| format!("₹{nav:.2}")),
            ui::money_cell(invested),
            ui::money_cell(fund.value),
            profit_loss.map_or_else(ui::na_cell, |pl| ui::change_cell(pl.percent)),
        ]);
    }

    let totals = valuation::member_totals(member);
    let mut output = format!(
        "Member: {}\n\n",
        ui::style_text(&member.name, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n{}: {}   {}: {}",
        ui::style_text("Value", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_inr(totals.current_value),
            ui::StyleType::TotalValue
        ),
        ui::style_text("Invested", ui::StyleType::TotalLabel),
        ui::format_inr(totals.invested_value),
    ));
    output
}

fn totals_section(totals: &PortfolioTotals) -> String {
    let profit_label = if totals.profit_loss >= 0.0 {
        "Profit"
    } else {
        "Loss"
    };
    let profit_style = if totals.profit_loss >= 0.0 {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };

    format!(
        "{}: {} across {} fund(s)\n{}: {}\n{}: {} ({:+.2}%)",
        ui::style_text("Total Value", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_inr(totals.current_value),
            ui::StyleType::TotalValue
        ),
        totals.fund_count,
        ui::style_text("Total Invested", ui::StyleType::TotalLabel),
        ui::format_inr(totals.invested_value),
        ui::style_text(profit_label, ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_inr(totals.profit_loss.abs()),
            profit_style
        ),
        totals.profit_loss_percentage,
    )
}

pub fn run(portfolio: &Portfolio) -> Result<()> {
    if portfolio.members.is_empty() {
        println!("The portfolio is empty. Add a member with `famfolio member add <NAME>`.");
        return Ok(());
    }

    for member in &portfolio.members {
        println!("{}", member_section(member));
        ui::print_separator();
    }

    let totals = valuation::portfolio_totals(portfolio);
    println!("{}", totals_section(&totals));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Last updated {}",
                portfolio.last_updated.format("%d %b %Y %H:%M UTC")
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::MutualFund;
    use chrono::{NaiveDate, Utc};

    fn member() -> Member {
        Member {
            id: "m1".to_string(),
            name: "Asha".to_string(),
            funds: vec![
                MutualFund {
                    id: "f1".to_string(),
                    name: "HDFC Top 100".to_string(),
                    value: 12000.0,
                    units: 100.0,
                    purchase_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    purchase_nav: Some(100.0),
                },
                MutualFund {
                    id: "f2".to_string(),
                    name: "Axis Liquid".to_string(),
                    value: 5000.0,
                    units: 2.0,
                    purchase_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    purchase_nav: None,
                },
            ],
        }
    }

    #[test]
    fn test_member_section_lists_funds_and_totals() {
        let section = member_section(&member());
        assert!(section.contains("HDFC Top 100"));
        assert!(section.contains("Axis Liquid"));
        // 12000 current vs 10000 invested on the first fund.
        assert!(section.contains("+20.00%"));
        assert!(section.contains("₹17,000"));
        assert!(section.contains("₹15,000"));
        // The second fund has no purchase NAV, so no P/L.
        assert!(section.contains("N/A"));
    }

    #[test]
    fn test_totals_section_profit() {
        let portfolio = Portfolio {
            members: vec![member()],
            last_updated: Utc::now(),
        };
        let section = totals_section(&valuation::portfolio_totals(&portfolio));
        assert!(section.contains("Profit"));
        assert!(section.contains("₹2,000"));
        assert!(section.contains("(+13.33%)"));
    }

    #[test]
    fn test_totals_section_loss() {
        let mut m = member();
        m.funds[0].value = 8000.0;
        let portfolio = Portfolio {
            members: vec![m],
            last_updated: Utc::now(),
        };
        let section = totals_section(&valuation::portfolio_totals(&portfolio));
        assert!(section.contains("Loss"));
    }
}
