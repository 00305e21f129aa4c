//! Growth simulator: projects future portfolio value under yearly or
//! monthly compounding of a nominal annual rate.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Yearly,
    Monthly,
}

impl Display for CompoundingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CompoundingFrequency::Yearly => "yearly",
                CompoundingFrequency::Monthly => "monthly",
            }
        )
    }
}

impl FromStr for CompoundingFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yearly" => Ok(CompoundingFrequency::Yearly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            _ => Err(anyhow::anyhow!("Invalid compounding frequency: {}", s)),
        }
    }
}

/// One simulated year. `year` is a 1-based sequence index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRow {
    pub year: u32,
    pub start_value: f64,
    pub growth_amount: f64,
    pub end_value: f64,
}

/// Projects `current_value` forward for `years` at the given nominal annual
/// rate, emitting one row per year. Stateless: identical inputs produce
/// bit-identical output.
///
/// Monthly compounding derives an effective monthly rate geometrically,
/// `(1 + rate/100)^(1/12) - 1`, so it matches yearly compounding of the
/// same nominal rate at year boundaries. A negative starting value is not
/// guarded against; the arithmetic passes through.
pub fn project_growth(
    current_value: f64,
    annual_return_percent: f64,
    years: u32,
    frequency: CompoundingFrequency,
) -> Vec<SimulationRow> {
    let mut rows = Vec::with_capacity(years as usize);
    let mut value = current_value;

    match frequency {
        CompoundingFrequency::Yearly => {
            for year in 1..=years {
                let start_value = value;
                let growth_amount = value * (annual_return_percent / 100.0);
                value += growth_amount;
                rows.push(SimulationRow {
                    year,
                    start_value,
                    growth_amount,
                    end_value: value,
                });
            }
        }
        CompoundingFrequency::Monthly => {
            let monthly_rate = (1.0 + annual_return_percent / 100.0).powf(1.0 / 12.0) - 1.0;
            for year in 1..=years {
                let start_value = value;
                let mut growth_amount = 0.0;
                for _month in 0..12 {
                    let monthly_growth = value * monthly_rate;
                    growth_amount += monthly_growth;
                    value += monthly_growth;
                }
                rows.push(SimulationRow {
                    year,
                    start_value,
                    growth_amount,
                    end_value: value,
                });
            }
        }
    }

    rows
}
