// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{shared_ptr::SharedPointerKind, GenericChampMap};
use ::quickcheck::{Arbitrary, Gen};
use std::hash::{BuildHasher, Hash};

impl<K, V, S, P> Arbitrary for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone + Arbitrary + Sync,
    V: Clone + Arbitrary + Sync,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        GenericChampMap::from(Vec::<(K, V)>::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let map = self.clone();
        Box::new(self.keys().cloned().collect::<Vec<_>>().into_iter().map(move |k| map.without(&k)))
    }
}
