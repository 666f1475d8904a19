//! Chart data derived from a reading.
//!
//! None of this feeds back into the AQI; it is what a front end plots next to
//! the result. Pollutants are listed in display order, which differs from
//! evaluation order (NH3 follows NO2).

use serde::Serialize;

use crate::breakpoints::Pollutant;
use crate::calculator::PollutantData;

/// Order in which pollutants are shown.
pub const DISPLAY_ORDER: [Pollutant; 7] = [
    Pollutant::Pm25,
    Pollutant::Pm10,
    Pollutant::No2,
    Pollutant::Nh3,
    Pollutant::So2,
    Pollutant::Co,
    Pollutant::O3,
];

/// Bars are capped at twice the limit.
const MAX_PERCENTAGE: f64 = 200.0;

/// Outer ring of the signature profile.
pub const PROFILE_FULL_MARK: f64 = 15.0;

/// One bar of the concentration-vs-limit chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyComparison {
    pub pollutant: Pollutant,
    pub value: f64,
    pub limit: f64,
    /// Concentration as a percentage of the limit, capped at 200.
    pub percentage: f64,
    pub above_limit: bool,
}

/// One slice of the pollutant mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixShare {
    pub pollutant: Pollutant,
    pub value: f64,
    /// Fraction of the summed concentrations, in `0.0..=1.0`.
    pub share: f64,
}

/// One spoke of the signature profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub pollutant: Pollutant,
    pub intensity: f64,
}

/// All chart series for a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub safety: Vec<SafetyComparison>,
    pub mix: Vec<MixShare>,
    pub profile: Vec<ProfilePoint>,
}

impl Charts {
    pub fn new(data: &PollutantData) -> Self {
        Charts {
            safety: safety_comparison(data),
            mix: pollutant_mix(data),
            profile: signature_profile(data),
        }
    }
}

/// Each concentration compared to its CPCB 24-hour limit.
pub fn safety_comparison(data: &PollutantData) -> Vec<SafetyComparison> {
    DISPLAY_ORDER
        .iter()
        .map(|&p| {
            let value = data.reading(p);
            let limit = p.safety_limit();
            SafetyComparison {
                pollutant: p,
                value,
                limit,
                percentage: (value / limit * 100.0).min(MAX_PERCENTAGE),
                above_limit: value > limit,
            }
        })
        .collect()
}

/// Share of each present pollutant in the raw concentration total.
///
/// Mixes units (CO is in mg/m³), as the chart it feeds does.
pub fn pollutant_mix(data: &PollutantData) -> Vec<MixShare> {
    let present: Vec<(Pollutant, f64)> = DISPLAY_ORDER
        .iter()
        .map(|&p| (p, data.reading(p)))
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = present.iter().map(|(_, v)| v).sum();
    present
        .into_iter()
        .map(|(pollutant, value)| MixShare {
            pollutant,
            value,
            share: value / total,
        })
        .collect()
}

/// Compressed concentrations for a radial plot: `sqrt(value + 1)`.
pub fn signature_profile(data: &PollutantData) -> Vec<ProfilePoint> {
    DISPLAY_ORDER
        .iter()
        .map(|&p| ProfilePoint {
            pollutant: p,
            intensity: (data.reading(p) + 1.0).sqrt(),
        })
        .collect()
}

/// Tooltip value for a profile point: the profile squared, rounded.
pub fn tooltip_intensity(profile: f64) -> i64 {
    (profile * profile).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> PollutantData {
        PollutantData {
            pm25: 90.0,
            pm10: 50.0,
            co: 10.0,
            nh3: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn display_order() {
        let names: Vec<_> = safety_comparison(&sample())
            .iter()
            .map(|s| s.pollutant.name())
            .collect();
        assert_eq!(names, ["PM2.5", "PM10", "NO2", "NH3", "SO2", "CO", "O3"]);
    }

    #[test]
    fn safety_percentages() {
        let safety = safety_comparison(&sample());
        let pm25 = &safety[0];
        assert_relative_eq!(pm25.percentage, 150.0);
        assert!(pm25.above_limit);

        let pm10 = &safety[1];
        assert_relative_eq!(pm10.percentage, 50.0);
        assert!(!pm10.above_limit);

        // 10 mg/m³ of CO is 500% of its limit; capped.
        let co = &safety[5];
        assert_eq!(co.percentage, 200.0);
        assert!(co.above_limit);

        // At the limit is not above it.
        let at = safety_comparison(&PollutantData {
            so2: 80.0,
            ..Default::default()
        });
        assert!(!at[4].above_limit);
        assert_relative_eq!(at[4].percentage, 100.0);
    }

    #[test]
    fn mix_skips_absent() {
        let mix = pollutant_mix(&sample());
        assert_eq!(mix.len(), 3);
        assert_eq!(mix[0].pollutant, Pollutant::Pm25);
        assert_relative_eq!(mix[0].share, 0.6);
        assert_relative_eq!(mix.iter().map(|m| m.share).sum::<f64>(), 1.0);

        assert!(pollutant_mix(&PollutantData::default()).is_empty());
    }

    #[test]
    fn profile() {
        let profile = signature_profile(&sample());
        assert_relative_eq!(profile[0].intensity, 91f64.sqrt());
        assert_relative_eq!(profile[2].intensity, 1.0);
        assert_eq!(tooltip_intensity(profile[0].intensity), 91);
        assert!(profile[0].intensity <= PROFILE_FULL_MARK);
    }
}
