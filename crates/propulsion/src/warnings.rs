//! Non-fatal conditions attached to performance records.

use std::fmt;

use serde::Serialize;

/// A condition worth flagging that does not invalidate the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerformanceWarning {
    BsfcExtrapolation { power_pct: f64 },
    InducedFactorOutOfRange { k_i: f64 },
    BladeLoading { ct_over_sigma: f64 },
    AdvanceRatio { mu: f64 },
    EngineLimitExceeded { required_hp: f64, limit_hp: f64 },
    TransmissionLimitExceeded { required_hp: f64, limit_hp: f64 },
}

impl PerformanceWarning {
    /// Emit the warning through `tracing`.
    pub fn log(&self) {
        tracing::warn!(warning = ?self, "{self}");
    }
}

impl fmt::Display for PerformanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceWarning::BsfcExtrapolation { power_pct } => write!(
                f,
                "BSFC curve extrapolated to {power_pct:.1}% rated power"
            ),
            PerformanceWarning::InducedFactorOutOfRange { k_i } => {
                write!(f, "induced power factor {k_i} outside [1.0, 1.15]")
            }
            PerformanceWarning::BladeLoading { ct_over_sigma } => {
                write!(f, "blade loading Ct/sigma = {ct_over_sigma:.4} exceeds 0.12")
            }
            PerformanceWarning::AdvanceRatio { mu } => {
                write!(f, "advance ratio {mu:.3} exceeds 0.4")
            }
            PerformanceWarning::EngineLimitExceeded {
                required_hp,
                limit_hp,
            } => write!(
                f,
                "engine power {required_hp:.1} hp exceeds rated limit {limit_hp:.1} hp"
            ),
            PerformanceWarning::TransmissionLimitExceeded {
                required_hp,
                limit_hp,
            } => write!(
                f,
                "engine power {required_hp:.1} hp exceeds transmission limit {limit_hp:.1} hp"
            ),
        }
    }
}
