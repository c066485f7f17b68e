//! Property tests for renderer argument collection.

use proptest::prelude::*;

use husk_submit::domain::options::{catalog, OptionValue, OptionValues};
use husk_submit::domain::services::SubmissionArgs;

fn values() -> impl Strategy<Value = OptionValues> {
    (
        proptest::option::of(1i64..=65535),
        proptest::option::of((0i64..=65535, 0i64..=65535)),
        proptest::option::of(prop_oneof![Just("None"), Just("Distant"), Just("Dome")]),
        any::<bool>(),
    )
        .prop_map(|(samples, res, headlight, motionblur)| {
            let mut values = OptionValues::new();
            if let Some(samples) = samples {
                values.insert("--pixel-samples".to_string(), OptionValue::Integer(samples));
            }
            if let Some((x, y)) = res {
                values.insert("--res".to_string(), OptionValue::Pair(x, y));
            }
            if let Some(headlight) = headlight {
                values.insert("--headlight".to_string(), OptionValue::Text(headlight.to_string()));
            }
            if motionblur {
                values.insert("--disable-motionblur".to_string(), OptionValue::Bool(true));
            }
            values
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The same values always build the same arguments.
    #[test]
    fn property_collect_is_deterministic(values in values()) {
        let a = SubmissionArgs::collect(catalog(), &values).unwrap();
        let b = SubmissionArgs::collect(catalog(), &values).unwrap();
        prop_assert_eq!(a, b);
    }

    /// PROPERTY: Every in-range value is accepted and each flag appears once.
    #[test]
    fn property_flags_are_unique(values in values()) {
        let args = SubmissionArgs::collect(catalog(), &values).unwrap();
        let flags = args.arguments.flags();
        let mut unique = flags.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), flags.len());
    }
}
