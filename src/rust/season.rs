//! Rule-based planting season classifier.
//!
//! Three threshold rules are checked top to bottom and the first one whose six
//! conditions all hold decides the season. Anything else is [`Season::Fall`],
//! which doubles as the "uncertain" answer. Every comparison is strict, so a value
//! sitting exactly on a threshold never satisfies that condition.

use std::fmt;

use serde::Serialize;

use crate::features::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Monsoon,
    Summer,
    Winter,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Monsoon => "Monsoon",
            Season::Summer => "Summer",
            Season::Winter => "Winter",
            Season::Fall => "Fall",
        }
    }

    /// `Fall` is what the rules fall back to when nothing matches.
    pub fn is_uncertain(&self) -> bool {
        matches!(self, Season::Fall)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strict one-sided threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Above(f64),
    Below(f64),
}

impl Bound {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Bound::Above(limit) => value > limit,
            Bound::Below(limit) => value < limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonRule {
    pub season: Season,
    pub temperature: Bound,
    pub humidity: Bound,
    pub rainfall: Bound,
    pub nitrogen: Bound,
    pub phosphorus: Bound,
    pub potassium: Bound,
}

impl SeasonRule {
    /// All six conditions must hold. pH is not part of any rule.
    pub fn matches(&self, features: &FeatureVector) -> bool {
        self.temperature.holds(features.temperature())
            && self.humidity.holds(features.humidity())
            && self.rainfall.holds(features.rainfall())
            && self.nitrogen.holds(features.nitrogen())
            && self.phosphorus.holds(features.phosphorus())
            && self.potassium.holds(features.potassium())
    }
}

/// Evaluated in order; first match wins.
pub static SEASON_RULES: [SeasonRule; 3] = [
    SeasonRule {
        season: Season::Monsoon,
        temperature: Bound::Above(30.0),
        humidity: Bound::Above(70.0),
        rainfall: Bound::Above(200.0),
        nitrogen: Bound::Above(100.0),
        phosphorus: Bound::Above(20.0),
        potassium: Bound::Above(30.0),
    },
    SeasonRule {
        season: Season::Summer,
        temperature: Bound::Above(25.0),
        humidity: Bound::Above(50.0),
        rainfall: Bound::Below(100.0),
        nitrogen: Bound::Below(50.0),
        phosphorus: Bound::Below(15.0),
        potassium: Bound::Below(25.0),
    },
    SeasonRule {
        season: Season::Winter,
        temperature: Bound::Below(20.0),
        humidity: Bound::Below(40.0),
        rainfall: Bound::Below(100.0),
        nitrogen: Bound::Below(80.0),
        phosphorus: Bound::Above(10.0),
        potassium: Bound::Above(20.0),
    },
];

/// Classifies the seven measurements into a planting season.
///
/// `ph` is accepted so the signature lines up with the crop classifier's inputs;
/// none of the rules look at it.
pub fn classify_season(
    n: f64,
    p: f64,
    k: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
) -> Season {
    classify_features(&FeatureVector::new(n, p, k, temperature, humidity, ph, rainfall))
}

pub fn classify_features(features: &FeatureVector) -> Season {
    matching_rule(features)
        .map(|rule| rule.season)
        .unwrap_or(Season::Fall)
}

/// The rule that decided the season, if any
pub fn matching_rule(features: &FeatureVector) -> Option<&'static SeasonRule> {
    SEASON_RULES.iter().find(|rule| rule.matches(features))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_reachable() {
        assert_eq!(classify_season(120.0, 25.0, 35.0, 32.0, 75.0, 6.5, 250.0), Season::Monsoon);
        assert_eq!(classify_season(40.0, 10.0, 20.0, 28.0, 60.0, 6.5, 80.0), Season::Summer);
        assert_eq!(classify_season(60.0, 15.0, 25.0, 15.0, 30.0, 6.5, 50.0), Season::Winter);
        assert_eq!(classify_season(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0), Season::Fall);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(!Bound::Above(30.0).holds(30.0));
        assert!(Bound::Above(30.0).holds(30.5));
        assert!(!Bound::Below(100.0).holds(100.0));
        assert!(Bound::Below(100.0).holds(99.9));
        assert!(Bound::Above(200.0).holds(200.000001));
        assert!(Bound::Below(100.0).holds(99.999999));
    }

    #[test]
    fn test_matching_rule_reports_winner() {
        let features = FeatureVector::new(120.0, 25.0, 35.0, 32.0, 75.0, 6.5, 250.0);
        let rule = matching_rule(&features).unwrap();
        assert_eq!(rule.season, Season::Monsoon);

        let features = FeatureVector::new(10.0, 5.0, 5.0, 30.0, 20.0, 6.0, 50.0);
        assert!(matching_rule(&features).is_none());
    }

    #[test]
    fn test_only_fall_is_uncertain() {
        assert!(Season::Fall.is_uncertain());
        assert!(!Season::Monsoon.is_uncertain());
        assert!(!Season::Summer.is_uncertain());
        assert!(!Season::Winter.is_uncertain());
        assert_eq!(Season::Winter.to_string(), "Winter");
    }
}
