//! Advisory recommendation generation.
//!
//! Maps met conditions to fixed, human-readable advisories. Pure function of
//! its input; no I/O.

use crate::types::{ConditionResult, Indicator, OperatorDirection};

/// Advisory appended whenever two or more distinct conditions are met.
const MULTI_INDICATOR_ADVISORY: &str = "Multiple drought indicators triggered. \
    Review your drought management plan and consult your regional advisor for \
    region-specific guidance.";

/// Derives advisory recommendations from the met conditions of an
/// evaluation.
///
/// One advisory per met `(indicator, direction)` pair with a table entry,
/// in the same order as `conditions_met`; the multi-indicator advisory, when
/// applicable, is always last. Unmet conditions and pairs without a table
/// entry contribute nothing.
#[must_use]
pub fn recommendations_for(conditions_met: &[ConditionResult]) -> Vec<String> {
    let met: Vec<&ConditionResult> = conditions_met.iter().filter(|r| r.met).collect();

    let mut recommendations: Vec<String> = met
        .iter()
        .filter_map(|result| advisory_for(result))
        .collect();

    if met.len() >= 2 {
        recommendations.push(MULTI_INDICATOR_ADVISORY.to_string());
    }

    recommendations
}

fn advisory_for(result: &ConditionResult) -> Option<String> {
    let value = result.actual_value?;
    let direction = result.condition.operator.direction();

    match (result.condition.indicator, direction) {
        (Indicator::Temp, OperatorDirection::High) => Some(format!(
            "High temperature alert ({value:.1} °C). Monitor livestock for heat \
             stress, provide shade, and shift grazing to cooler hours."
        )),
        (Indicator::Rainfall, OperatorDirection::Low) => Some(format!(
            "Low rainfall alert ({value:.1} mm). Implement water conservation \
             measures and prioritise irrigation for critical crops."
        )),
        (Indicator::Humidity, OperatorDirection::Low) => Some(format!(
            "Low humidity alert ({value:.1}%). Increase fire-risk monitoring \
             and consider moisture retention strategies for crops."
        )),
        (Indicator::Humidity, OperatorDirection::High) => Some(format!(
            "High humidity alert ({value:.1}%). Watch for disease pressure in \
             crops and pasture and review fungicide planning."
        )),
        (Indicator::WindSpeed, OperatorDirection::High) => Some(format!(
            "High wind speed alert ({value:.1} km/h). Secure loose equipment \
             and materials and delay planned spray operations."
        )),
        _ => None,
    }
}
