//! Membership & Benefit Models

use serde::{Deserialize, Serialize};

/// Membership tier enum
///
/// Ordered: Bronze < Silver < Gold < Platinum. Stored as TEXT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MembershipTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Benefit type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BenefitType {
    PercentageDiscount,
    FixedDiscount,
    FreeItem,
    PointsMultiplier,
}

/// Customer membership entity (one per customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerMembership {
    pub id: i64,
    pub customer_id: i64,
    pub tier: MembershipTier,
    /// Non-negative
    pub discount_percentage: f64,
    /// Non-negative
    pub points: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create membership payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipCreate {
    pub customer_id: i64,
    pub tier: MembershipTier,
    pub discount_percentage: f64,
    pub points: i64,
}

/// Membership benefit entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MembershipBenefit {
    pub id: i64,
    pub membership_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub benefit_type: BenefitType,
    pub value: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create benefit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitCreate {
    pub membership_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub benefit_type: BenefitType,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering() {
        assert!(MembershipTier::Bronze < MembershipTier::Silver);
        assert!(MembershipTier::Silver < MembershipTier::Gold);
        assert!(MembershipTier::Gold < MembershipTier::Platinum);
    }

    #[test]
    fn tier_serde_round_trip() {
        let json = serde_json::to_string(&MembershipTier::Platinum).unwrap();
        assert_eq!(json, "\"PLATINUM\"");
        let tier: MembershipTier = serde_json::from_str(&json).unwrap();
        assert_eq!(tier, MembershipTier::Platinum);
    }
}
