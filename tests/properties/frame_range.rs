//! Property tests for frame range parsing.

use proptest::prelude::*;

use husk_submit::FrameRange;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics.
    #[test]
    fn property_parse_never_panics(text in ".{0,24}") {
        let _ = text.parse::<FrameRange>();
    }

    /// PROPERTY: Ordered ranges parse back from their display form.
    #[test]
    fn property_display_parses_back(start in -65535i64..=64535, len in 0i64..=1000) {
        let range = FrameRange::new(start, start + len).unwrap();
        let parsed: FrameRange = range.to_string().parse().unwrap();
        prop_assert_eq!(parsed, range);
        prop_assert_eq!(parsed.len(), (len + 1) as u64);
    }

    /// PROPERTY: Any accepted range stays within the farm's frame bounds.
    #[test]
    fn property_accepted_ranges_are_bounded(start in any::<i64>(), end in any::<i64>()) {
        if let Ok(range) = FrameRange::new(start, end) {
            prop_assert!(range.start() >= -65535 && range.end() <= 65535);
            prop_assert!(range.len() <= 131071);
        }
    }
}
