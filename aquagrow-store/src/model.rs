//! Record types held in the persisted document.
//!
//! Field names serialize in camelCase, the layout the website reads.

use serde::{Deserialize, Serialize};

/// Partnership status of a farmer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FarmerStatus {
    Active,
    #[default]
    Pending,
    Rejected,
}

/// A farmer enrolled (or applying) in the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: FarmerStatus,
    /// Calendar date (`YYYY-MM-DD`) stamped at creation
    pub join_date: String,
}

/// Fields supplied when registering a farmer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmer {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: FarmerStatus,
}

/// Status of an investor relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestorStatus {
    Active,
    #[default]
    Pending,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub investment_amount: f64,
    pub status: InvestorStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub investment_amount: f64,
    #[serde(default)]
    pub status: InvestorStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
}

/// Social profile links shown in the site footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    pub x: String,
    pub facebook: String,
    pub linkedin: String,
}

/// Company contact details. A singleton, replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub address: Vec<String>,
    pub phone: String,
    pub email: String,
    pub socials: Socials,
}

/// The single persisted aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub farmers: Vec<Farmer>,
    pub investors: Vec<Investor>,
    pub team_members: Vec<TeamMember>,
    pub company_info: CompanyInfo,
    /// Bumped on every save
    #[serde(default)]
    pub version: u64,
}

/// Totals shown on the admin overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub farmers: usize,
    pub active_farmers: usize,
    pub pending_farmers: usize,
    pub rejected_farmers: usize,
    pub investors: usize,
    /// Sum of `investmentAmount` over Active investors
    pub active_investment: f64,
    pub team_members: usize,
}

impl StoreSummary {
    pub(crate) fn of(doc: &Document) -> Self {
        let count = |status: FarmerStatus| doc.farmers.iter().filter(|f| f.status == status).count();

        Self {
            farmers: doc.farmers.len(),
            active_farmers: count(FarmerStatus::Active),
            pending_farmers: count(FarmerStatus::Pending),
            rejected_farmers: count(FarmerStatus::Rejected),
            investors: doc.investors.len(),
            active_investment: doc
                .investors
                .iter()
                .filter(|i| i.status == InvestorStatus::Active)
                .map(|i| i.investment_amount)
                .sum(),
            team_members: doc.team_members.len(),
        }
    }
}
