//! Price-range normalization
//!
//! The UI offers two ways to pick a price range: a named preset bucket or a
//! freeform dual-thumb slider graduated in billions of base currency units.
//! Both collapse into a single canonical [`PriceRange`] in base units, where
//! `None` on either end means unbounded.

use serde::{Deserialize, Serialize};

/// Upper bound of the slider scale, in billion units. The top position reads
/// "200+" and means unbounded above.
pub const SLIDER_MAX_UNIT: f64 = 200.0;

/// One billion base currency units per slider unit.
const UNIT: f64 = 1_000_000_000.0;

/// Named price buckets. Selecting a preset overrides whatever the slider
/// currently displays; the emitted range always uses the preset's exact
/// boundary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePreset {
    Under1,
    OneToThree,
    ThreeToFive,
    FiveToTen,
    TenToTwenty,
    OverTwenty,
}

impl PricePreset {
    pub const ALL: [PricePreset; 6] = [
        PricePreset::Under1,
        PricePreset::OneToThree,
        PricePreset::ThreeToFive,
        PricePreset::FiveToTen,
        PricePreset::TenToTwenty,
        PricePreset::OverTwenty,
    ];

    /// Fixed boundaries in base currency units.
    pub fn bounds(self) -> PriceRange {
        let (from, to) = match self {
            PricePreset::Under1 => (Some(0), Some(999_999_999)),
            PricePreset::OneToThree => (Some(1_000_000_000), Some(3_000_000_000)),
            PricePreset::ThreeToFive => (Some(3_000_000_000), Some(5_000_000_000)),
            PricePreset::FiveToTen => (Some(5_000_000_000), Some(10_000_000_000)),
            PricePreset::TenToTwenty => (Some(10_000_000_000), Some(20_000_000_000)),
            PricePreset::OverTwenty => (Some(20_000_001_000), None),
        };
        PriceRange { from, to }
    }

    pub fn slug(self) -> &'static str {
        match self {
            PricePreset::Under1 => "under-1",
            PricePreset::OneToThree => "1-3",
            PricePreset::ThreeToFive => "3-5",
            PricePreset::FiveToTen => "5-10",
            PricePreset::TenToTwenty => "10-20",
            PricePreset::OverTwenty => "over-20",
        }
    }
}

impl std::str::FromStr for PricePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricePreset::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid price preset: {s}. Valid presets: under-1, 1-3, 3-5, 5-10, 10-20, over-20"
                )
            })
    }
}

impl std::fmt::Display for PricePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Freeform slider positions in billion units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min_unit: f64,
    pub max_unit: f64,
}

impl SliderRange {
    /// Clamps both thumbs into `[0, 200]` keeping `min <= max`. The max thumb
    /// is raised to the min thumb when they cross, never swapped.
    pub fn new(min_unit: f64, max_unit: f64) -> Self {
        let min_unit = min_unit.clamp(0.0, SLIDER_MAX_UNIT);
        let max_unit = max_unit.clamp(min_unit, SLIDER_MAX_UNIT);
        Self { min_unit, max_unit }
    }

    /// The full `[0, 200+]` span, meaning no price filter at all.
    pub fn full() -> Self {
        Self::new(0.0, SLIDER_MAX_UNIT)
    }
}

/// The price selection is either a preset or a freeform slider range, never a
/// mix of both. Adjusting a slider thumb in the UI drops the preset and
/// switches the selection back to `Freeform`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceSelection {
    Preset(PricePreset),
    Freeform(SliderRange),
}

/// Canonical price range in base currency units. `None` means unbounded on
/// that end; both `None` means no price filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl PriceRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Collapse a price selection into its canonical range.
///
/// Presets return their fixed boundary pair verbatim, regardless of what the
/// slider displays. Freeform ranges convert billion units to base units, with
/// a min thumb at 0 meaning no lower bound and a max thumb at 200 meaning no
/// upper bound.
pub fn normalize(selection: PriceSelection) -> PriceRange {
    match selection {
        PriceSelection::Preset(preset) => preset.bounds(),
        PriceSelection::Freeform(range) => {
            let range = SliderRange::new(range.min_unit, range.max_unit);
            let from = (range.min_unit > 0.0).then(|| (range.min_unit * UNIT).round() as i64);
            let to = (range.max_unit < SLIDER_MAX_UNIT)
                .then(|| (range.max_unit * UNIT).round() as i64);
            PriceRange { from, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_boundaries_exact() {
        let expected: [(PricePreset, Option<i64>, Option<i64>); 6] = [
            (PricePreset::Under1, Some(0), Some(999_999_999)),
            (
                PricePreset::OneToThree,
                Some(1_000_000_000),
                Some(3_000_000_000),
            ),
            (
                PricePreset::ThreeToFive,
                Some(3_000_000_000),
                Some(5_000_000_000),
            ),
            (
                PricePreset::FiveToTen,
                Some(5_000_000_000),
                Some(10_000_000_000),
            ),
            (
                PricePreset::TenToTwenty,
                Some(10_000_000_000),
                Some(20_000_000_000),
            ),
            (PricePreset::OverTwenty, Some(20_000_001_000), None),
        ];

        for (preset, from, to) in expected {
            let range = normalize(PriceSelection::Preset(preset));
            assert_eq!(range.from, from, "from bound for {preset}");
            assert_eq!(range.to, to, "to bound for {preset}");
        }
    }

    #[test]
    fn test_full_slider_means_no_filter() {
        let range = normalize(PriceSelection::Freeform(SliderRange::full()));
        assert!(range.is_unbounded());
        assert_eq!(range, PriceRange::default());
    }

    #[test]
    fn test_freeform_converts_billions_to_base_units() {
        let range = normalize(PriceSelection::Freeform(SliderRange::new(1.5, 8.0)));
        assert_eq!(range.from, Some(1_500_000_000));
        assert_eq!(range.to, Some(8_000_000_000));
    }

    #[test]
    fn test_freeform_min_at_zero_has_no_lower_bound() {
        let range = normalize(PriceSelection::Freeform(SliderRange::new(0.0, 5.0)));
        assert_eq!(range.from, None);
        assert_eq!(range.to, Some(5_000_000_000));
    }

    #[test]
    fn test_freeform_max_at_top_has_no_upper_bound() {
        let range = normalize(PriceSelection::Freeform(SliderRange::new(20.0, 200.0)));
        assert_eq!(range.from, Some(20_000_000_000));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_slider_clamps_out_of_range_input() {
        let range = SliderRange::new(-3.0, 450.0);
        assert_eq!(range.min_unit, 0.0);
        assert_eq!(range.max_unit, SLIDER_MAX_UNIT);
    }

    #[test]
    fn test_slider_clamps_crossed_thumbs() {
        let range = SliderRange::new(10.0, 4.0);
        assert_eq!(range.min_unit, 10.0);
        assert_eq!(range.max_unit, 10.0);
    }

    #[test]
    fn test_preset_slug_round_trip() {
        for preset in PricePreset::ALL {
            let parsed: PricePreset = preset.slug().parse().unwrap();
            assert_eq!(parsed, preset);
        }
    }

    #[test]
    fn test_invalid_preset_slug() {
        assert!("2-4".parse::<PricePreset>().is_err());
    }
}
