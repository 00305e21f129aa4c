//! Portfolio CRUD: members and their fund holdings. Every mutation is
//! validated, applied to the in-memory aggregate and persisted in one
//! step; the UI layer above serializes calls, so there is no concurrent
//! writer to coordinate with.

use crate::core::model::{FundDraft, Member, MutualFund, Portfolio};
use crate::data::UserData;
use anyhow::{Result, bail};
use uuid::Uuid;

pub struct PortfolioService {
    data: UserData,
}

impl PortfolioService {
    pub fn new(data: UserData) -> Self {
        Self { data }
    }

    pub async fn portfolio(&self) -> Portfolio {
        self.data.load_portfolio().await
    }

    pub async fn add_member(&self, name: &str) -> Result<Member> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Please enter a member name");
        }

        let member = Member {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            funds: Vec::new(),
        };

        let mut portfolio = self.data.load_portfolio().await;
        portfolio.members.push(member.clone());
        self.data.save_portfolio(&mut portfolio).await;

        Ok(member)
    }

    /// Removes a member and, by ownership, every fund they hold.
    pub async fn remove_member(&self, member_id: &str) -> Result<Member> {
        let mut portfolio = self.data.load_portfolio().await;
        let Some(index) = portfolio.members.iter().position(|m| m.id == member_id) else {
            bail!("No member with id: {member_id}");
        };

        let removed = portfolio.members.remove(index);
        self.data.save_portfolio(&mut portfolio).await;
        Ok(removed)
    }

    pub async fn add_fund(&self, member_id: &str, draft: FundDraft) -> Result<MutualFund> {
        // Validate before loading so a bad draft mutates nothing.
        let fund = draft.build()?;

        let mut portfolio = self.data.load_portfolio().await;
        let Some(member) = portfolio.member_mut(member_id) else {
            bail!("No member with id: {member_id}");
        };
        member.funds.push(fund.clone());
        self.data.save_portfolio(&mut portfolio).await;

        Ok(fund)
    }

    pub async fn remove_fund(&self, member_id: &str, fund_id: &str) -> Result<MutualFund> {
        let mut portfolio = self.data.load_portfolio().await;
        let Some(member) = portfolio.member_mut(member_id) else {
            bail!("No member with id: {member_id}");
        };
        let Some(index) = member.funds.iter().position(|f| f.id == fund_id) else {
            bail!("No fund with id: {fund_id}");
        };

        let removed = member.funds.remove(index);
        self.data.save_portfolio(&mut portfolio).await;
        Ok(removed)
    }
}
