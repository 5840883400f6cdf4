// tests/suffix_property.rs

mod common;
use crate::common::MonitorBuilder;

use std::path::PathBuf;

use proptest::prelude::*;
use dirmon::watch::SuffixPattern;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

proptest! {
    #[test]
    fn literal_suffix_matches_only_at_the_end(
        stem in name_strategy(),
        ext in "[a-z]{1,4}",
        tail in "[a-z]{1,4}",
    ) {
        let pattern = SuffixPattern::new(&format!(r"\.{ext}")).unwrap();

        let ends = format!("{stem}.{ext}");
        let nested = format!("dir/{ends}");
        let inside = format!("{stem}.{ext}.{tail}1");

        prop_assert!(pattern.matches_str(&ends));
        prop_assert!(pattern.matches_str(&nested));
        prop_assert!(!pattern.matches_str(&inside));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole(
        stem in name_strategy(),
    ) {
        let pattern = SuffixPattern::new(r"\.rb|\.yaml").unwrap();

        let ruby = format!("{stem}.rb");
        let yaml = format!("{stem}.yaml");
        let backup = format!("{stem}.rb.orig");

        prop_assert!(pattern.matches_str(&ruby));
        prop_assert!(pattern.matches_str(&yaml));
        prop_assert!(!pattern.matches_str(&backup));
    }

    #[test]
    fn unchanged_tree_is_quiet_after_priming(
        names in proptest::collection::btree_set(name_strategy(), 1..20),
        rescans in 1usize..5,
    ) {
        let mut builder = MonitorBuilder::new().suffix(r"\.rb");
        for name in &names {
            builder = builder.with_file(&format!("{name}.rb")).with_file(&format!("{name}.txt"));
        }
        let (mut monitor, _fs) = builder.build();

        prop_assert_eq!(monitor.prime().unwrap(), names.len());
        for _ in 0..rescans {
            prop_assert!(monitor.detect_changes().unwrap().is_empty());
        }
    }

    #[test]
    fn detection_reports_exactly_the_touched_matching_files_in_walk_order(
        names in proptest::collection::btree_set(name_strategy(), 1..20),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut builder = MonitorBuilder::new().suffix(r"\.rb");
        for name in &names {
            builder = builder.with_file(&format!("{name}.rb"));
        }
        let (mut monitor, fs) = builder.build();
        monitor.prime().unwrap();

        let mut touched: Vec<usize> = picks.iter().map(|i| i.index(names.len())).collect();
        for &i in touched.iter().rev() {
            fs.touch(format!("{}.rb", names[i]));
        }
        touched.sort_unstable();
        touched.dedup();

        let expected: Vec<PathBuf> = touched
            .iter()
            .map(|&i| PathBuf::from(format!("{}.rb", names[i])))
            .collect();
        prop_assert_eq!(monitor.detect_changes().unwrap(), expected);
    }
}
