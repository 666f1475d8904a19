//! AQI computation: sub-index interpolation and category selection.

use serde::{Deserialize, Serialize};

use crate::breakpoints::{Pollutant, AQI_BREAKS};

/// A set of pollutant concentrations at a time and place.
///
/// Concentrations are in µg/m³, except `co` (mg/m³).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutantData {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub nh3: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,

    /// Free-text description of where the reading was taken; may be empty.
    pub location: String,

    /// Local date-time of the reading, e.g. "2024-11-14T08:00".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PollutantData {
    /// Concentration of a single pollutant.
    pub fn reading(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
            Pollutant::Nh3 => self.nh3,
        }
    }

    /// Mutable access to a single pollutant's concentration.
    pub fn reading_mut(&mut self, pollutant: Pollutant) -> &mut f64 {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::No2 => &mut self.no2,
            Pollutant::So2 => &mut self.so2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
            Pollutant::Nh3 => &mut self.nh3,
        }
    }

    /// Copy with every concentration limited to `0..=input_max`.
    /// Non-numbers read as zero.
    pub fn clamped(&self) -> PollutantData {
        let mut out = self.clone();
        for p in Pollutant::ALL {
            let v = out.reading_mut(p);
            *v = if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, p.input_max())
            };
        }
        out
    }
}

/// Severity bucket of an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

impl Category {
    /// All categories, least to most severe.
    pub const ALL: [Category; 6] = [
        Category::Good,
        Category::Satisfactory,
        Category::Moderate,
        Category::Poor,
        Category::VeryPoor,
        Category::Severe,
    ];

    /// Classify an (unrounded) AQI value.
    /// Each bucket includes its upper bound.
    pub fn from_sub_index(aqi: f64) -> Category {
        if aqi <= 50.0 {
            Category::Good
        } else if aqi <= 100.0 {
            Category::Satisfactory
        } else if aqi <= 200.0 {
            Category::Moderate
        } else if aqi <= 300.0 {
            Category::Poor
        } else if aqi <= 400.0 {
            Category::VeryPoor
        } else {
            Category::Severe
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Satisfactory => "Satisfactory",
            Category::Moderate => "Moderate",
            Category::Poor => "Poor",
            Category::VeryPoor => "Very Poor",
            Category::Severe => "Severe",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of an AQI computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiResult {
    /// Overall AQI, rounded.
    pub aqi_value: u16,
    pub category: Category,
    /// Pollutant with the largest sub-index.
    pub main_pollutant: Pollutant,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Sub-index of every pollutant, in evaluation order.
    pub sub_indices: [(Pollutant, f64); 7],
}

/// Interpolate a concentration onto the AQI scale.
///
/// The first segment `[breaks[i], breaks[i+1]]` containing `value` is used,
/// so a value exactly on an interior breakpoint falls in the lower segment.
/// Values above the last breakpoint saturate at the top of the AQI scale;
/// values below the first (or NaN) read as the bottom.
///
/// The two tables pair up point by point; segments past the end of the
/// shorter one are never matched. Empty tables read as 0.
pub fn sub_index(value: f64, breaks: &[f64], aqi_breaks: &[f64]) -> f64 {
    for (b, a) in breaks.windows(2).zip(aqi_breaks.windows(2)) {
        let (lo, hi) = (b[0], b[1]);
        if value >= lo && value <= hi {
            return (a[1] - a[0]) / (hi - lo) * (value - lo) + a[0];
        }
    }
    match (breaks.last(), aqi_breaks.first(), aqi_breaks.last()) {
        (Some(&top), _, Some(&max)) if value > top => max,
        (_, Some(&min), _) => min,
        _ => 0.0,
    }
}

/// Compute the AQI of a reading.
///
/// The overall AQI is the largest of the seven sub-indices; the category is
/// chosen from that unrounded maximum.
pub fn calculate_aqi(data: &PollutantData) -> AqiResult {
    let sub_indices =
        Pollutant::ALL.map(|p| (p, sub_index(data.reading(p), p.breakpoints(), &AQI_BREAKS)));

    // Strict comparison keeps the earliest pollutant on ties.
    let (main_pollutant, max) = sub_indices
        .iter()
        .skip(1)
        .fold(sub_indices[0], |best, &candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    let result = AqiResult {
        aqi_value: max.round() as u16,
        category: Category::from_sub_index(max),
        main_pollutant,
        location: data.location.clone(),
        timestamp: data.timestamp.clone(),
        sub_indices,
    };
    tracing::debug!(
        "AQI {} ({}), dominated by {} at {:.2}",
        result.aqi_value,
        result.category,
        result.main_pollutant,
        max
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn only(p: Pollutant, value: f64) -> PollutantData {
        let mut data = PollutantData::default();
        *data.reading_mut(p) = value;
        data
    }

    fn sub(p: Pollutant, value: f64) -> f64 {
        sub_index(value, p.breakpoints(), &AQI_BREAKS)
    }

    #[test]
    fn zero_is_zero() {
        for p in Pollutant::ALL {
            assert_eq!(sub(p, 0.0), 0.0, "{p}");
        }
    }

    #[test]
    fn top_and_above_saturate() {
        for p in Pollutant::ALL {
            let top = p.breakpoints()[6];
            assert_relative_eq!(sub(p, top), 500.0);
            assert_eq!(sub(p, top + 0.001), 500.0, "{p}");
            assert_eq!(sub(p, top * 10.0), 500.0, "{p}");
        }
    }

    #[test]
    fn negative_and_nan_are_zero() {
        for p in Pollutant::ALL {
            assert_eq!(sub(p, -1.0), 0.0, "{p}");
            assert_eq!(sub(p, f64::NAN), 0.0, "{p}");
        }
    }

    #[test]
    fn breakpoints_map_exactly() {
        for p in Pollutant::ALL {
            for (c, a) in p.breakpoints().iter().zip(AQI_BREAKS) {
                assert_relative_eq!(sub(p, *c), a);
            }
        }
    }

    #[test]
    fn interpolates() {
        assert_relative_eq!(sub(Pollutant::Co, 5.0), 137.5);
        assert_relative_eq!(sub(Pollutant::Pm25, 15.0), 25.0);
        assert_relative_eq!(sub(Pollutant::Pm10, 175.0), 150.0);
        assert_relative_eq!(sub(Pollutant::O3, 478.0), 350.0);
    }

    #[test]
    fn monotonic() {
        for p in Pollutant::ALL {
            let top = p.breakpoints()[6] * 1.2;
            let mut prev_sub = -1.0;
            let mut prev_aqi = 0;
            for step in 0..=600 {
                let v = top * step as f64 / 600.0;
                let s = sub(p, v);
                assert!(s >= prev_sub - 1e-9, "{p} decreased at {v}");
                let aqi = calculate_aqi(&only(p, v)).aqi_value;
                assert!(aqi >= prev_aqi, "{p} AQI decreased at {v}");
                prev_sub = s;
                prev_aqi = aqi;
            }
        }
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(Category::from_sub_index(0.0), Category::Good);
        assert_eq!(Category::from_sub_index(50.0), Category::Good);
        assert_eq!(Category::from_sub_index(50.01), Category::Satisfactory);
        assert_eq!(Category::from_sub_index(100.0), Category::Satisfactory);
        assert_eq!(Category::from_sub_index(200.0), Category::Moderate);
        assert_eq!(Category::from_sub_index(300.0), Category::Poor);
        assert_eq!(Category::from_sub_index(400.0), Category::VeryPoor);
        assert_eq!(Category::from_sub_index(400.5), Category::Severe);
        assert_eq!(Category::from_sub_index(500.0), Category::Severe);

        let mut prev = Category::Good;
        for i in 0..=5000 {
            let c = Category::from_sub_index(i as f64 / 10.0);
            assert!(c >= prev);
            prev = c;
        }
    }

    #[test]
    fn all_zero() {
        let result = calculate_aqi(&PollutantData::default());
        assert_eq!(result.aqi_value, 0);
        assert_eq!(result.category, Category::Good);
        assert_eq!(result.main_pollutant, Pollutant::Pm25);
    }

    #[test]
    fn saturated_pm25() {
        let result = calculate_aqi(&only(Pollutant::Pm25, 400.0));
        assert_eq!(result.aqi_value, 500);
        assert_eq!(result.category, Category::Severe);
        assert_eq!(result.main_pollutant, Pollutant::Pm25);
    }

    #[test]
    fn mismatched_tables() {
        let breaks = [0.0, 10.0, 20.0];
        let aqi = [0.0, 50.0];
        assert_relative_eq!(sub_index(5.0, &breaks, &aqi), 25.0);
        assert_eq!(sub_index(15.0, &breaks, &aqi), 0.0);
        assert_eq!(sub_index(25.0, &breaks, &aqi), 50.0);
        assert_eq!(sub_index(60.0, &aqi, &breaks), 20.0);
        assert_eq!(sub_index(5.0, &[], &[]), 0.0);
    }

    #[test]
    fn boundary_is_inclusive() {
        let result = calculate_aqi(&only(Pollutant::Pm25, 30.0));
        assert_eq!(result.aqi_value, 50);
        assert_eq!(result.category, Category::Good);
    }

    #[test]
    fn carbon_monoxide() {
        let result = calculate_aqi(&only(Pollutant::Co, 5.0));
        assert_eq!(result.aqi_value, 138);
        assert_eq!(result.category, Category::Moderate);
        assert_eq!(result.main_pollutant, Pollutant::Co);
        assert_relative_eq!(result.sub_indices[4].1, 137.5);
    }

    #[test]
    fn classified_before_rounding() {
        // 30.36 µg/m³ of PM2.5 -> 50.6: shown as 51, still Satisfactory.
        let result = calculate_aqi(&only(Pollutant::Pm25, 30.36));
        assert_eq!(result.aqi_value, 51);
        assert_eq!(result.category, Category::Satisfactory);

        // 0.98 mg/m³ of CO -> 49.
        let result = calculate_aqi(&only(Pollutant::Co, 0.98));
        assert_eq!(result.aqi_value, 49);
        assert_eq!(result.category, Category::Good);
    }

    #[test]
    fn ties_go_to_earlier_pollutant() {
        // Both at sub-index 100.
        let data = PollutantData {
            no2: 80.0,
            so2: 80.0,
            ..Default::default()
        };
        assert_eq!(calculate_aqi(&data).main_pollutant, Pollutant::No2);

        // Both at sub-index 500.
        let data = PollutantData {
            o3: 2000.0,
            pm10: 900.0,
            ..Default::default()
        };
        assert_eq!(calculate_aqi(&data).main_pollutant, Pollutant::Pm10);

        // Both at sub-index 200; NH3 is last in order.
        let data = PollutantData {
            nh3: 800.0,
            co: 10.0,
            ..Default::default()
        };
        assert_eq!(calculate_aqi(&data).main_pollutant, Pollutant::Co);
    }

    #[test]
    fn dominant_pollutant_wins() {
        let data = PollutantData {
            pm25: 45.0, // 75
            pm10: 300.0, // 250
            no2: 100.0, // 120
            ..Default::default()
        };
        let result = calculate_aqi(&data);
        assert_eq!(result.main_pollutant, Pollutant::Pm10);
        assert_eq!(result.aqi_value, 250);
        assert_eq!(result.category, Category::Poor);
    }

    #[test]
    fn passes_through_location_and_time() {
        let data = PollutantData {
            pm25: 12.0,
            location: "South Delhi, NCR".to_owned(),
            timestamp: Some("2024-11-14T08:30".to_owned()),
            ..Default::default()
        };
        let result = calculate_aqi(&data);
        assert_eq!(result.location, "South Delhi, NCR");
        assert_eq!(result.timestamp.as_deref(), Some("2024-11-14T08:30"));

        let result = calculate_aqi(&PollutantData::default());
        assert_eq!(result.location, "");
        assert_eq!(result.timestamp, None);
    }

    #[test]
    fn clamps_to_input_range() {
        let data = PollutantData {
            pm25: 900.0,
            co: -3.0,
            o3: f64::NAN,
            nh3: 10.0,
            ..Default::default()
        };
        let c = data.clamped();
        assert_eq!(c.pm25, 500.0);
        assert_eq!(c.co, 0.0);
        assert_eq!(c.o3, 0.0);
        assert_eq!(c.nh3, 10.0);
    }

    #[test]
    fn json_field_names() {
        let data: PollutantData = serde_json::from_str(
            r#"{"pm25": 30, "co": 5, "location": "Pune", "timestamp": "2024-01-02T03:04"}"#,
        )
        .unwrap();
        assert_eq!(data.pm25, 30.0);
        assert_eq!(data.pm10, 0.0);

        let value = serde_json::to_value(calculate_aqi(&data)).unwrap();
        assert_eq!(value["aqiValue"], 138);
        assert_eq!(value["category"], "Moderate");
        assert_eq!(value["mainPollutant"], "CO");
        assert_eq!(value["location"], "Pune");
        assert_eq!(value["timestamp"], "2024-01-02T03:04");

        assert_eq!(
            serde_json::to_value(Category::VeryPoor).unwrap(),
            "Very Poor"
        );
    }
}
