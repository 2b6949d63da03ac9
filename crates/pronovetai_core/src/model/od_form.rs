//! OD (opportunity/inquiry) form domain model.
//!
//! # Invariants
//! - `size_minimum` ≤ `size_maximum` when both are present.
//! - `budget_minimum` ≤ `budget_maximum` when both are present.

use crate::model::{check_range_pair, ValidationError};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSource {
    Newspaper,
    OldClient,
    OnlineMarketing,
    Referral,
    Signage,
    Website,
    YellowPages,
    Others,
}

impl CallSource {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Newspaper => "newspaper",
            Self::OldClient => "old_client",
            Self::OnlineMarketing => "online_marketing",
            Self::Referral => "referral",
            Self::Signage => "signage",
            Self::Website => "website",
            Self::YellowPages => "yellow_pages",
            Self::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newspaper" => Some(Self::Newspaper),
            "old_client" => Some(Self::OldClient),
            "online_marketing" => Some(Self::OnlineMarketing),
            "referral" => Some(Self::Referral),
            "signage" => Some(Self::Signage),
            "website" => Some(Self::Website),
            "yellow_pages" => Some(Self::YellowPages),
            "others" => Some(Self::Others),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerType {
    Broker,
    Direct,
}

impl CallerType {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Broker => "broker",
            Self::Direct => "direct",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "broker" => Some(Self::Broker),
            "direct" => Some(Self::Direct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Rent,
    Buy,
    Both,
}

impl Intent {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Buy => "buy",
            Self::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rent" => Some(Self::Rent),
            "buy" => Some(Self::Buy),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Expanding,
    Relocating,
    NewOffice,
    Consolidating,
    Downsizing,
    Upgrading,
    ExpandingRetaining,
    Others,
}

impl Purpose {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Expanding => "expanding",
            Self::Relocating => "relocating",
            Self::NewOffice => "new_office",
            Self::Consolidating => "consolidating",
            Self::Downsizing => "downsizing",
            Self::Upgrading => "upgrading",
            Self::ExpandingRetaining => "expanding_retaining",
            Self::Others => "others",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expanding" => Some(Self::Expanding),
            "relocating" => Some(Self::Relocating),
            "new_office" => Some(Self::NewOffice),
            "consolidating" => Some(Self::Consolidating),
            "downsizing" => Some(Self::Downsizing),
            "upgrading" => Some(Self::Upgrading),
            "expanding_retaining" => Some(Self::ExpandingRetaining),
            "others" => Some(Self::Others),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Active,
    Inactive,
    DoneDeal,
}

impl FormStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::DoneDeal => "done_deal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "done_deal" => Some(Self::DoneDeal),
            _ => None,
        }
    }
}

/// Canonical inquiry form record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdForm {
    pub id: i64,
    pub date: Option<DateTime<FixedOffset>>,
    pub contact_id: Option<i64>,
    pub call_taken_by: Option<String>,
    pub type_of_call: CallDirection,
    pub source_of_call: CallSource,
    pub type_of_caller: CallerType,
    pub intent: Intent,
    pub purpose: Purpose,
    pub size_minimum: Option<Decimal>,
    pub size_maximum: Option<Decimal>,
    pub budget_minimum: Option<Decimal>,
    pub budget_maximum: Option<Decimal>,
    pub preferred_location: Option<String>,
    pub started_scouting: bool,
    pub notes: Option<String>,
    pub account_manager_id: Option<i64>,
    pub status: FormStatus,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl OdForm {
    /// Creates an active inbound-call form with every optional attribute
    /// unset.
    pub fn new(
        type_of_call: CallDirection,
        source_of_call: CallSource,
        type_of_caller: CallerType,
        intent: Intent,
        purpose: Purpose,
    ) -> Self {
        Self {
            id: 0,
            date: None,
            contact_id: None,
            call_taken_by: None,
            type_of_call,
            source_of_call,
            type_of_caller,
            intent,
            purpose,
            size_minimum: None,
            size_maximum: None,
            budget_minimum: None,
            budget_maximum: None,
            preferred_location: None,
            started_scouting: false,
            notes: None,
            account_manager_id: None,
            status: FormStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    /// Checks the form's declared range pairs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range_pair(
            self.size_minimum.as_ref(),
            self.size_maximum.as_ref(),
            "size_minimum",
            "size_maximum",
        )?;
        check_range_pair(
            self.budget_minimum.as_ref(),
            self.budget_maximum.as_ref(),
            "budget_minimum",
            "budget_maximum",
        )?;
        Ok(())
    }
}
