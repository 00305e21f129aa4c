//! Portfolio data model: funds, members and the root aggregate.
//!
//! Serialized as camelCase JSON so stored blobs stay readable and stable
//! across releases.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single mutual fund holding owned by one member.
///
/// `value` is the tracked current value of the holding; it is seeded from a
/// NAV at entry time but not driven by a live feed. `purchase_nav` is the
/// per-unit price paid at acquisition, when the user recorded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MutualFund {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub units: f64,
    pub purchase_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_nav: Option<f64>,
}

/// A family member and the funds they exclusively own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub funds: Vec<MutualFund>,
}

/// Root aggregate. `last_updated` is refreshed on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub members: Vec<Member>,
    pub last_updated: DateTime<Utc>,
}

impl Portfolio {
    pub fn empty() -> Self {
        Portfolio {
            members: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn member_mut(&mut self, member_id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == member_id)
    }
}

/// Unvalidated fund input, as collected from the CLI.
#[derive(Debug, Clone)]
pub struct FundDraft {
    pub name: String,
    pub units: f64,
    pub value: f64,
    pub purchase_date: NaiveDate,
    pub purchase_nav: Option<f64>,
}

impl FundDraft {
    /// Validates the draft and mints a `MutualFund` with a fresh id.
    ///
    /// Rejections report to the caller without mutating anything: empty
    /// name, non-finite or non-positive units, negative or non-finite
    /// value, negative or non-finite purchase NAV. The purchase NAV is
    /// optional; a NAV of zero is treated as not recorded.
    pub fn build(self) -> Result<MutualFund> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            bail!("Please enter a fund name");
        }
        if !self.units.is_finite() || self.units <= 0.0 {
            bail!("Units must be a positive number");
        }
        if !self.value.is_finite() || self.value < 0.0 {
            bail!("Current value must be zero or a positive number");
        }
        let purchase_nav = match self.purchase_nav {
            Some(nav) if !nav.is_finite() || nav < 0.0 => {
                bail!("Purchase NAV must be a positive number");
            }
            Some(nav) if nav == 0.0 => None,
            nav => nav,
        };
        Ok(MutualFund {
            id: Uuid::new_v4().to_string(),
            name,
            value: self.value,
            units: self.units,
            purchase_date: self.purchase_date,
            purchase_nav,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FundDraft {
        FundDraft {
            name: "HDFC Top 100 Direct Plan Growth".to_string(),
            units: 12.5,
            value: 15570.87,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            purchase_nav: Some(1245.67),
        }
    }

    #[test]
    fn test_build_valid_fund() {
        let fund = draft().build().unwrap();
        assert!(!fund.id.is_empty());
        assert_eq!(fund.name, "HDFC Top 100 Direct Plan Growth");
        assert_eq!(fund.units, 12.5);
        assert_eq!(fund.purchase_nav, Some(1245.67));
    }

    #[test]
    fn test_build_trims_name() {
        let mut d = draft();
        d.name = "  My Fund  ".to_string();
        assert_eq!(d.build().unwrap().name, "My Fund");
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(d.build().is_err());
    }

    #[test]
    fn test_build_rejects_non_positive_units() {
        let mut d = draft();
        d.units = 0.0;
        assert!(d.build().is_err());

        let mut d = draft();
        d.units = -3.0;
        assert!(d.build().is_err());

        let mut d = draft();
        d.units = f64::NAN;
        assert!(d.build().is_err());
    }

    #[test]
    fn test_build_rejects_negative_value() {
        let mut d = draft();
        d.value = -1.0;
        assert!(d.build().is_err());
    }

    #[test]
    fn test_build_allows_missing_purchase_nav() {
        let mut d = draft();
        d.purchase_nav = None;
        assert!(d.build().unwrap().purchase_nav.is_none());
    }

    #[test]
    fn test_build_treats_zero_purchase_nav_as_absent() {
        let mut d = draft();
        d.purchase_nav = Some(0.0);
        assert!(d.build().unwrap().purchase_nav.is_none());
    }

    #[test]
    fn test_build_rejects_bad_purchase_nav() {
        let mut d = draft();
        d.purchase_nav = Some(-1.0);
        assert!(d.build().is_err());

        let mut d = draft();
        d.purchase_nav = Some(f64::NAN);
        assert!(d.build().is_err());
    }

    #[test]
    fn test_portfolio_json_shape() {
        let fund = draft().build().unwrap();
        let portfolio = Portfolio {
            members: vec![Member {
                id: "m1".to_string(),
                name: "Asha".to_string(),
                funds: vec![fund],
            }],
            last_updated: Utc::now(),
        };

        let json = serde_json::to_string(&portfolio).unwrap();
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"purchaseDate\""));
        assert!(json.contains("\"purchaseNav\""));

        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, portfolio);
    }

    #[test]
    fn test_purchase_nav_omitted_when_absent() {
        let mut d = draft();
        d.purchase_nav = None;
        let fund = d.build().unwrap();
        let json = serde_json::to_string(&fund).unwrap();
        assert!(!json.contains("purchaseNav"));
    }
}
