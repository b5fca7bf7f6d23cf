//! Property tests for id-list sanitization and query-shape fingerprints.

use proptest::prelude::*;
use termdb::db::query::{IdArg, QueryOptions, fingerprint, sanitize_id_list};

fn scope() -> Vec<String> {
    vec!["post_tag".to_string()]
}

proptest! {
    #[test]
    fn sanitized_ids_are_positive_and_unique(entries in prop::collection::vec(any::<i64>(), 0..24)) {
        let args: Vec<IdArg> = entries.iter().copied().map(IdArg::from).collect();
        let ids = sanitize_id_list(&args);

        prop_assert!(ids.iter().all(|id| *id > 0));

        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn sanitize_preserves_first_occurrence_order(entries in prop::collection::vec(1i64..50, 0..24)) {
        let args: Vec<IdArg> = entries.iter().copied().map(IdArg::from).collect();
        let ids = sanitize_id_list(&args);

        let firsts: Vec<usize> = ids
            .iter()
            .map(|id| {
                entries
                    .iter()
                    .position(|n| *n as u64 == *id)
                    .expect("sanitized id must come from the input")
            })
            .collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn numeric_text_entries_sanitize_like_numbers(values in prop::collection::vec(1i64..1000, 0..12)) {
        let as_numbers: Vec<IdArg> = values.iter().copied().map(IdArg::from).collect();
        let as_text: Vec<IdArg> = values.iter().map(|n| IdArg::from(n.to_string())).collect();

        prop_assert_eq!(sanitize_id_list(&as_numbers), sanitize_id_list(&as_text));
    }

    #[test]
    fn fingerprint_ignores_setter_order(
        number in 0u64..100,
        offset in 0u64..100,
        hide_empty in any::<bool>(),
        search in "[a-z]{0,8}",
    ) {
        let a = QueryOptions::new()
            .number(number)
            .offset(offset)
            .hide_empty(hide_empty)
            .search(search.clone())
            .normalize();
        let b = QueryOptions::new()
            .search(search)
            .hide_empty(hide_empty)
            .offset(offset)
            .number(number)
            .normalize();

        prop_assert_eq!(fingerprint(&scope(), &a), fingerprint(&scope(), &b));
    }

    #[test]
    fn fingerprint_separates_differing_limits(number in 0u64..100) {
        let bounded = QueryOptions::new().number(number).normalize();
        let wider = QueryOptions::new().number(number + 1).normalize();

        prop_assert_ne!(fingerprint(&scope(), &bounded), fingerprint(&scope(), &wider));
    }
}
