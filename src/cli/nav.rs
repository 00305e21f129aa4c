use crate::cli::ui;
use crate::providers::mfapi::MfApiProvider;
use anyhow::Result;
use tracing::debug;

pub async fn run(provider: &MfApiProvider, scheme_code: &str) -> Result<()> {
    let quote = provider.latest_nav(scheme_code).await?;

    println!(
        "{}",
        ui::style_text(&quote.scheme_name, ui::StyleType::Title)
    );
    println!(
        "NAV: ₹{:.4} as of {}",
        quote.nav,
        ui::style_text(&quote.date, ui::StyleType::Subtle)
    );

    // Day change needs a second data point; quote still prints without it.
    match provider.day_change(scheme_code).await {
        Ok(change) => {
            let arrow = if change.absolute_change >= 0.0 { "▲" } else { "▼" };
            let styled = if change.absolute_change >= 0.0 {
                ui::StyleType::TotalValue
            } else {
                ui::StyleType::Error
            };
            println!(
                "Day change: {}",
                ui::style_text(
                    &format!(
                        "{arrow} ₹{:.4} ({:+.2}%)",
                        change.absolute_change.abs(),
                        change.percent_change
                    ),
                    styled
                )
            );
        }
        Err(e) => {
            debug!("No day change for scheme {scheme_code}: {e}");
            println!("Day change: N/A");
        }
    }

    Ok(())
}
