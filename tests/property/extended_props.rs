//! Extended syntax invariants.

use crate::common::*;
use bitfuse::{Config, Fuse};
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,8}").unwrap()
}

fn body_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,3}").unwrap()
}

fn matched(fuse: &Fuse<String>, query: &str) -> Vec<usize> {
    let mut refs = ref_indices(&fuse.search(query));
    refs.sort_unstable();
    refs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// `'x` and `!x` split the collection in two.
    #[test]
    fn prop_include_and_inverse_partition(
        items in prop::collection::vec(item_strategy(), 1..30),
        body in body_strategy(),
    ) {
        let fuse = Fuse::new(items.clone(), Config::default().extended_search(true)).unwrap();
        let with = matched(&fuse, &format!("'{}", body));
        let without = matched(&fuse, &format!("!{}", body));

        let expected: Vec<usize> = (0..items.len()).filter(|&i| items[i].contains(&body)).collect();
        prop_assert_eq!(&with, &expected);

        let mut all = with;
        all.extend(without);
        all.sort_unstable();
        prop_assert_eq!(all, (0..items.len()).collect::<Vec<_>>());
    }

    /// Prefix and suffix terms agree with `starts_with` / `ends_with`.
    #[test]
    fn prop_affix_terms(
        items in prop::collection::vec(item_strategy(), 1..30),
        body in body_strategy(),
    ) {
        let fuse = Fuse::new(items.clone(), Config::default().extended_search(true)).unwrap();

        let prefixed: Vec<usize> = (0..items.len()).filter(|&i| items[i].starts_with(&body)).collect();
        prop_assert_eq!(matched(&fuse, &format!("^{}", body)), prefixed);

        let suffixed: Vec<usize> = (0..items.len()).filter(|&i| items[i].ends_with(&body)).collect();
        prop_assert_eq!(matched(&fuse, &format!("{}$", body)), suffixed);
    }

    /// OR matches the union of its groups.
    #[test]
    fn prop_or_is_union(
        items in prop::collection::vec(item_strategy(), 1..30),
        a in body_strategy(),
        b in body_strategy(),
    ) {
        let fuse = Fuse::new(items, Config::default().extended_search(true)).unwrap();
        let mut union = matched(&fuse, &format!("'{}", a));
        union.extend(matched(&fuse, &format!("'{}", b)));
        union.sort_unstable();
        union.dedup();
        prop_assert_eq!(matched(&fuse, &format!("'{} | '{}", a, b)), union);
    }

    /// AND matches the intersection of its terms.
    #[test]
    fn prop_and_is_intersection(
        items in prop::collection::vec(item_strategy(), 1..30),
        a in body_strategy(),
        b in body_strategy(),
    ) {
        let fuse = Fuse::new(items, Config::default().extended_search(true)).unwrap();
        let left = matched(&fuse, &format!("^{}", a));
        let right = matched(&fuse, &format!("!{}", b));
        let both: Vec<usize> = left.into_iter().filter(|i| right.contains(i)).collect();
        prop_assert_eq!(matched(&fuse, &format!("^{} !{}", a, b)), both);
    }
}
