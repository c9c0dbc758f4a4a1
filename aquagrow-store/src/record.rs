//! The [`Record`] trait ties each record type to its collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::model::{
    Document, Farmer, Investor, NewFarmer, NewInvestor, NewTeamMember, TeamMember,
};

/// A record type stored in one of the document's collections.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Fields supplied by the caller on create.
    type Draft: Send;

    /// Human-readable kind, used in error messages.
    const KIND: &'static str;

    /// Id prefix for this kind.
    const ID_PREFIX: char;

    fn id(&self) -> &str;

    /// Build the stored record from a draft, a fresh id and today's date.
    fn from_draft(draft: Self::Draft, id: String, today: &str) -> Self;

    /// Check field invariants before the record is persisted.
    fn validate(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Copy fields that must not change on update from the stored record.
    fn retain_immutable(&mut self, _stored: &Self) {}

    fn collection(doc: &Document) -> &Vec<Self>;

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
}

impl Record for Farmer {
    type Draft = NewFarmer;
    const KIND: &'static str = "Farmer";
    const ID_PREFIX: char = 'F';

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewFarmer, id: String, today: &str) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            phone: draft.phone,
            status: draft.status,
            join_date: today.to_string(),
        }
    }

    fn retain_immutable(&mut self, stored: &Self) {
        self.join_date.clone_from(&stored.join_date);
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.farmers
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.farmers
    }
}

impl Record for Investor {
    type Draft = NewInvestor;
    const KIND: &'static str = "Investor";
    const ID_PREFIX: char = 'I';

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewInvestor, id: String, _today: &str) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            investment_amount: draft.investment_amount,
            status: draft.status,
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        if !self.investment_amount.is_finite() || self.investment_amount < 0.0 {
            return Err(StoreError::InvalidRecord(format!(
                "investment amount must be a non-negative number, got {}",
                self.investment_amount
            )));
        }
        Ok(())
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.investors
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.investors
    }
}

impl Record for TeamMember {
    type Draft = NewTeamMember;
    const KIND: &'static str = "Team member";
    const ID_PREFIX: char = 'T';

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewTeamMember, id: String, _today: &str) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            bio: draft.bio,
            image_url: draft.image_url,
        }
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.team_members
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.team_members
    }
}
