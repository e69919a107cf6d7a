//! Derived trust scoring over a user's verification factors.
//!
//! The score is recomputed from scratch on every query and never persisted;
//! repositories hold the underlying facts, not the number.

use serde::{Deserialize, Serialize};

/// Boolean verification factors contributing to the 0-100 trust score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustFactors {
    pub kyc_approved: bool,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub has_profile_photo: bool,
    pub no_reports: bool,
}

/// Weight table applied to true factors. The default weights sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustWeights {
    pub kyc_approved: u8,
    pub email_verified: u8,
    pub phone_verified: u8,
    pub has_profile_photo: u8,
    pub no_reports: u8,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            kyc_approved: 40,
            no_reports: 20,
            phone_verified: 15,
            has_profile_photo: 15,
            email_verified: 10,
        }
    }
}

/// Discrete contribution to a trust score, allowing transparent display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustComponent {
    pub factor: &'static str,
    pub satisfied: bool,
    pub weight: u8,
}

/// Composite trust score with its per-factor breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustScore {
    pub total: u8,
    pub components: Vec<TrustComponent>,
}

/// Compute the trust score for the given factors under the default weights.
pub fn compute_trust_score(factors: TrustFactors) -> TrustScore {
    compute_trust_score_with(factors, TrustWeights::default())
}

/// Compute the trust score under an explicit weight table.
///
/// Total is the sum of weights for satisfied factors, clamped to [0, 100].
pub fn compute_trust_score_with(factors: TrustFactors, weights: TrustWeights) -> TrustScore {
    let components = vec![
        TrustComponent {
            factor: "kyc_approved",
            satisfied: factors.kyc_approved,
            weight: weights.kyc_approved,
        },
        TrustComponent {
            factor: "no_reports",
            satisfied: factors.no_reports,
            weight: weights.no_reports,
        },
        TrustComponent {
            factor: "phone_verified",
            satisfied: factors.phone_verified,
            weight: weights.phone_verified,
        },
        TrustComponent {
            factor: "has_profile_photo",
            satisfied: factors.has_profile_photo,
            weight: weights.has_profile_photo,
        },
        TrustComponent {
            factor: "email_verified",
            satisfied: factors.email_verified,
            weight: weights.email_verified,
        },
    ];

    let total: u32 = components
        .iter()
        .filter(|component| component.satisfied)
        .map(|component| component.weight as u32)
        .sum();

    TrustScore {
        total: total.min(100) as u8,
        components,
    }
}
