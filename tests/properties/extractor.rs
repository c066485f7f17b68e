//! Property tests for the usdcat dump extractor.

use proptest::prelude::*;

use husk_submit::domain::entities::PrimKind;
use husk_submit::domain::services::extract_prims;
use husk_submit::extract_scene;

fn prim_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,12}").unwrap()
}

fn passes_dump(names: &[String]) -> String {
    let mut dump = String::from("#usda 1.0\n\ndef Scope \"Render\"\n{\n");
    for name in names {
        dump.push_str(&format!(
            "    def RenderPass \"{}\"\n    {{\n        rel renderSource = </Render/rendersettings>\n    }}\n\n",
            name
        ));
    }
    dump.push_str("}\n");
    dump
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary text never panics the extractor.
    #[test]
    fn property_extract_never_panics(metadata in ".{0,400}", render in ".{0,400}") {
        let _ = extract_scene(&metadata, &render);
    }

    /// PROPERTY: N declared passes come back as N pass prims, in order.
    #[test]
    fn property_declared_passes_are_found_in_order(
        names in proptest::collection::btree_set(prim_name(), 0..8),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let prims = extract_prims(&passes_dump(&names));

        let found: Vec<&str> = prims
            .iter()
            .filter(|p| p.kind == PrimKind::RenderPass)
            .map(|p| p.path.as_str())
            .collect();
        let expected: Vec<String> = names.iter().map(|n| format!("/Render/{}", n)).collect();
        prop_assert_eq!(found, expected.iter().map(String::as_str).collect::<Vec<_>>());

        for prim in prims.iter().filter(|p| p.kind == PrimKind::RenderPass) {
            prop_assert_eq!(prim.first_target("renderSource"), Some("/Render/rendersettings"));
        }
    }
}
