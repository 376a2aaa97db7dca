//! Unit conventions and reference values for color classification
//!
//! Coordinates are hue in degrees and saturation/value in percent, matching
//! the scale the lexicon parameters were estimated on.

/// Coordinate ranges accepted by the lexicon
pub mod units {
    /// Full hue circle in degrees
    pub const HUE_FULL_TURN: f64 = 360.0;

    /// Upper bound of saturation and value in percent
    pub const PERCENT_MAX: f64 = 100.0;
}

/// Tag names used by the configuration resource
pub mod tags {
    /// The six per-dimension parameter tags, in model order
    pub const PARAM_NAMES: [&str; 6] = [
        "mulower",
        "shapelower",
        "scalelower",
        "muupper",
        "shapeupper",
        "scaleupper",
    ];

    /// Axis tags in dimension order
    pub const AXIS_NAMES: [&str; 3] = ["hue", "saturation", "value"];

    pub const NAME: &str = "name";
    pub const AVAILABILITY: &str = "availability";
    pub const HUE_ADJUST: &str = "hue_adjust";
    pub const VALUE: &str = "value";
    pub const STDEV: &str = "stdev";
}

/// Numerical tolerances
pub mod tolerance {
    /// Allowed deviation of a posterior's total mass from one
    pub const PROBABILITY_SUM: f64 = 1e-9;
}

/// Number of labels listed by the command-line front end by default
pub const DEFAULT_TOP_N: usize = 25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_ranges() {
        assert_eq!(units::HUE_FULL_TURN, 360.0);
        assert!(units::PERCENT_MAX > 0.0);
    }

    #[test]
    fn test_axis_value_tag_shared() {
        // "value" is both an axis tag and the parameter attribute name
        assert_eq!(tags::AXIS_NAMES[2], tags::VALUE);
    }
}
