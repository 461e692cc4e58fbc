// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Proptest strategies.
//!
//! These are only available when using the `proptest` feature flag.

use crate::ChampMap;
use ::proptest::collection::vec;
use ::proptest::strategy::{BoxedStrategy, Strategy, ValueTree};
use std::hash::Hash;
use std::ops::Range;

/// A strategy for a [`ChampMap`][ChampMap] of a given size.
///
/// Duplicate keys drawn by the key strategy collapse into one entry, and
/// maps which end up smaller than the range's start are filtered out.
///
/// # Examples
///
/// ```rust,no_run
/// # use ::proptest::proptest;
/// # use champ_map::proptest::champ_map;
/// proptest! {
///     #[test]
///     fn proptest_works(ref m in champ_map(0..9999, ".*", 10..100)) {
///         assert!(m.len() < 100);
///         assert!(m.len() >= 10);
///     }
/// }
/// ```
///
/// [ChampMap]: ../champmap/type.ChampMap.html
pub fn champ_map<K: Strategy + 'static, V: Strategy + 'static>(
    key: K,
    value: V,
    size: Range<usize>,
) -> BoxedStrategy<ChampMap<<K::Tree as ValueTree>::Value, <V::Tree as ValueTree>::Value>>
where
    <K::Tree as ValueTree>::Value: Hash + Eq + Clone,
    <V::Tree as ValueTree>::Value: Clone,
{
    vec((key, value), size.clone())
        .prop_map(ChampMap::from)
        .prop_filter("Map minimum size".to_owned(), move |m| {
            m.len() >= size.start
        })
        .boxed()
}

#[cfg(test)]
mod test {
    use super::*;
    use ::proptest::proptest;

    proptest! {
        #[test]
        fn strategy_respects_size(ref m in champ_map(0..9999, ".*", 10..100)) {
            assert!(m.len() < 100);
            assert!(m.len() >= 10);
            m.assert_invariants();
        }
    }
}
