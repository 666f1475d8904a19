//! Display metadata for each AQI category.

use crate::calculator::Category;

/// How a category is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Largest AQI value in the category.
    pub max: u16,
    /// Background color, as a CSS hex string.
    pub color: &'static str,
    /// Health impact, in a sentence.
    pub description: &'static str,
}

const LEVELS: [Level; 6] = [
    Level {
        max: 50,
        color: "#22c55e",
        description: "Minimal impact",
    },
    Level {
        max: 100,
        color: "#34d399",
        description: "May cause minor breathing discomfort to sensitive people",
    },
    Level {
        max: 200,
        color: "#facc15",
        description:
            "May cause breathing discomfort to people with lungs, asthma and heart diseases",
    },
    Level {
        max: 300,
        color: "#f97316",
        description: "May cause breathing discomfort to most people on prolonged exposure",
    },
    Level {
        max: 400,
        color: "#ef4444",
        description: "May cause respiratory illness on prolonged exposure",
    },
    Level {
        max: 500,
        color: "#7f1d1d",
        description: "Affects healthy people and seriously impacts those with existing diseases",
    },
];

impl Category {
    pub fn level(self) -> &'static Level {
        &LEVELS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_line_up_with_classification() {
        for c in Category::ALL {
            let max = c.level().max;
            assert_eq!(Category::from_sub_index(max as f64), c);
            if c != Category::Severe {
                assert_ne!(Category::from_sub_index(max as f64 + 0.5), c);
            }
        }
    }
}
