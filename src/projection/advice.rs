//! Advisory tip selection for the savings calculator

use serde::Serialize;

use super::series::ProjectionInput;

/// Tip shown next to a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Recommendation {
    /// High rate over a long horizon
    GrowthFocused,
    /// Low rate with a small deposit
    IncreaseContribution,
    /// Short horizon
    Flexibility,
    OnTrack,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::GrowthFocused => {
                "Consider investing in an RRSP to maximize long-term tax-deferred growth."
            }
            Recommendation::IncreaseContribution => {
                "Consider increasing your monthly contribution for better compounding."
            }
            Recommendation::Flexibility => "A TFSA may offer more flexibility for short-term goals.",
            Recommendation::OnTrack => {
                "You're on a solid path. Review your risk level and stay consistent!"
            }
        }
    }
}

/// Pick a tip; the first matching rule wins.
pub fn recommend(annual_rate_percent: f64, years: u32, monthly_contribution: f64) -> Recommendation {
    if annual_rate_percent >= 6.0 && years >= 10 {
        Recommendation::GrowthFocused
    } else if annual_rate_percent < 5.0 && monthly_contribution < 200.0 {
        Recommendation::IncreaseContribution
    } else if years <= 3 {
        Recommendation::Flexibility
    } else {
        Recommendation::OnTrack
    }
}

impl ProjectionInput {
    pub fn recommendation(&self) -> Recommendation {
        recommend(self.annual_rate_percent, self.years, self.monthly_contribution)
    }
}
