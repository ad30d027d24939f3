use lineage_core::source::{decode, load_str};
use lineage_core::{Date, parse_records};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parser_never_panics(input in ".{0,400}") {
        let parsed = parse_records(&input);
        for rec in &parsed.records {
            prop_assert!(rec.line >= 1);
        }
    }

    #[test]
    fn decode_and_build_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..400)) {
        let text = decode(&bytes);
        // Build errors are fine, panics are not.
        let _ = load_str(&text);
    }

    #[test]
    fn leveled_lines_keep_their_count(
        tags in proptest::collection::vec("[A-Z]{3,5}", 1..20),
    ) {
        let input: String = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("{} {tag} v{i}\n", i % 3))
            .collect();
        let parsed = parse_records(&input);
        prop_assert_eq!(parsed.records.len(), tags.len());
        prop_assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn plain_years_parse(year in 1u16..=9999) {
        prop_assert_eq!(Date::parse(&year.to_string()).year(), Some(i32::from(year)));
    }
}
