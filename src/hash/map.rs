// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An unordered persistent map.
//!
//! An immutable hash map using [compressed hash-array mapped prefix
//! trees][1] (CHAMP).
//!
//! Every update produces a new map and leaves the old one untouched. The
//! two versions share every part of the trie the update didn't touch, so
//! an update costs O(log<sub>32</sub> n) new nodes rather than a copy of
//! the whole map.
//!
//! The trie is kept in canonical form: two maps with the same contents,
//! built with the same hasher, have the same shape no matter which
//! sequence of insertions and removals produced them. Comparing two maps
//! can therefore walk both tries in lockstep, and skips any subtree the
//! two maps share.
//!
//! Map entries come out in an order given by the bits of their hashes,
//! which is neither insertion order nor key order. Unless otherwise
//! specified, keys are hashed with [`FnvBuildHasher`][FnvBuildHasher].
//!
//! [1]: https://michael.steindorfer.name/publications/oopsla15.pdf
//! [FnvBuildHasher]: ../fnv/type.FnvBuildHasher.html

use std::borrow::Borrow;
use std::collections;
use std::fmt::{Debug, Error, Formatter};
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};
use std::ops::{Add, Index};

use archery::{SharedPointer, SharedPointerKind};

use crate::hash::fnv::FnvBuildHasher;
use crate::nodes::champ::{
    hash_key, ConsumingIter as NodeConsumingIter, Iter as NodeIter, Node, Remove,
};
use crate::nodes::format::TreeDump;
use crate::shared_ptr::DefaultSharedPtr;

/// Construct a CHAMP map from a sequence of key/value pairs.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate champ_map;
/// # use champ_map::ChampMap;
/// # fn main() {
/// assert_eq!(
///   champmap!{
///     1 => 11,
///     2 => 22,
///     3 => 33
///   },
///   ChampMap::from(vec![(1, 11), (2, 22), (3, 33)])
/// );
/// # }
/// ```
#[macro_export]
macro_rules! champmap {
    () => { $crate::champmap::ChampMap::new() };

    ( $( $key:expr => $value:expr ),* ) => {{
        let mut map = $crate::champmap::ChampMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};

    ( $( $key:expr => $value:expr ,)* ) => {{
        let mut map = $crate::champmap::ChampMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};
}

/// Type alias for [`GenericChampMap`] that uses [`FnvBuildHasher`] as the hasher and [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericChampMap]: ./struct.GenericChampMap.html
/// [FnvBuildHasher]: ../fnv/type.FnvBuildHasher.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type ChampMap<K, V> = GenericChampMap<K, V, FnvBuildHasher, DefaultSharedPtr>;

/// An unordered persistent map.
///
/// An immutable hash map using [compressed hash-array mapped prefix
/// trees][1].
///
/// Lookups, updates and removals are O(log<sub>32</sub> n), which is a
/// handful of steps for any map that fits in memory. Cloning is O(1).
///
/// The hasher `S` must hash a key the same way every time. Two maps
/// compared with [`equal`][equal] must also hash keys the same way as each
/// other, since it compares trie shapes. `==` compares contents whatever
/// the hashers do.
///
/// [1]: https://michael.steindorfer.name/publications/oopsla15.pdf
/// [equal]: ./fn.equal.html
pub struct GenericChampMap<K, V, S, P: SharedPointerKind> {
    size: usize,
    root: Option<SharedPointer<Node<K, V, P>, P>>,
    hasher: S,
}

impl<K, V, P> GenericChampMap<K, V, FnvBuildHasher, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    P: SharedPointerKind,
{
    /// Construct a map with a single mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use champ_map::ChampMap;
    /// let map = ChampMap::unit(123, "onetwothree");
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"onetwothree")
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn unit(k: K, v: V) -> GenericChampMap<K, V, FnvBuildHasher, P> {
        GenericChampMap::new().update(k, v)
    }
}

impl<K, V, S, P: SharedPointerKind> GenericChampMap<K, V, S, P> {
    /// Construct an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Construct an empty map using the provided hasher.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        GenericChampMap {
            size: 0,
            root: None,
            hasher,
        }
    }

    /// Test whether a map is empty.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// # use champ_map::ChampMap;
    /// assert!(
    ///   !champmap!{1 => 2}.is_empty()
    /// );
    /// assert!(
    ///   ChampMap::<i32, i32>::new().is_empty()
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of entries in a map.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// assert_eq!(3, champmap!{
    ///   1 => 11,
    ///   2 => 22,
    ///   3 => 33
    /// }.len());
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Test whether two maps refer to the same content in memory.
    ///
    /// This is true if the two sides are references to the same map,
    /// or if the two maps refer to the same root node. Removing a key
    /// which isn't in a map returns a map which is `ptr_eq` to the
    /// original.
    ///
    /// Time: O(1)
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => SharedPointer::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Get a reference to the map's [`BuildHasher`][BuildHasher].
    ///
    /// [BuildHasher]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Get an iterator over the key/value pairs of a map.
    ///
    /// A node's own entries come before the entries of its children, in
    /// the order of the hash bits which select them. The order is the
    /// same every time for maps with the same contents and hasher, but
    /// it is neither insertion order nor sort order.
    ///
    /// The iterator is lazy: stopping early visits nothing further.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter {
            it: NodeIter::new(self.root.as_deref(), self.size),
        }
    }

    /// Get an iterator over a map's keys, in the same order as
    /// [`iter`][iter].
    ///
    /// [iter]: #method.iter
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys {
            it: NodeIter::new(self.root.as_deref(), self.size),
        }
    }

    /// Get an iterator over a map's values, in the same order as
    /// [`iter`][iter].
    ///
    /// [iter]: #method.iter
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values {
            it: NodeIter::new(self.root.as_deref(), self.size),
        }
    }

    /// Discard all elements from the map.
    ///
    /// Other maps sharing nodes with this one are unaffected.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let mut map = champmap![1=>1, 2=>2, 3=>3];
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Get a printable dump of the map's trie, showing the bitmaps,
    /// entries and children of every node. Meant for debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// # use champ_map::ChampMap;
    /// let map = ChampMap::<&str, i32>::new();
    /// assert_eq!("<nil>", map.tree().to_string());
    /// ```
    #[must_use]
    pub fn tree(&self) -> TreeDump<'_, K, V, P> {
        TreeDump::new(self.root.as_deref())
    }

    /// Panic unless the trie satisfies every structural invariant:
    /// disjoint bitmaps, compacted entries on the branches their hashes
    /// select, no single-entry child nodes, collision nodes only below
    /// the last bitmap level, and a cached size matching the contents.
    #[cfg(any(test, feature = "debug"))]
    pub fn assert_invariants(&self)
    where
        K: Eq,
    {
        let count = match &self.root {
            Some(root) => root.assert_invariants(0, true),
            None => 0,
        };
        assert_eq!(self.size, count, "cached size disagrees with the trie");
    }
}

impl<K, V, S, P> GenericChampMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    /// Get the value for a key from a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map = champmap!{123 => "lol"};
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"lol")
    /// );
    /// assert_eq!(map.get(&321), None);
    /// ```
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Get the key/value pair for a key from a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map = champmap!{123 => "lol"};
    /// assert_eq!(
    ///   map.get_key_value(&123),
    ///   Some((&123, &"lol"))
    /// );
    /// ```
    #[must_use]
    pub fn get_key_value<BK>(&self, key: &BK) -> Option<(&K, &V)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        let root = self.root.as_ref()?;
        root.get(hash_key(&self.hasher, key), 0, key)
    }

    /// Test for the presence of a key in a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map = champmap!{123 => "lol"};
    /// assert!(
    ///   map.contains_key(&123)
    /// );
    /// assert!(
    ///   !map.contains_key(&321)
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_key<BK>(&self, k: &BK) -> bool
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.get(k).is_some()
    }
}

impl<K, V, S, P> GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    /// Insert a key/value mapping into a map, replacing this handle
    /// with the updated map.
    ///
    /// Clones of the map taken before the insert keep their contents.
    /// If the map already has a mapping for the given key, the previous
    /// value is returned.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let mut map = champmap!{};
    /// let before = map.clone();
    /// assert_eq!(None, map.insert(123, "123"));
    /// assert_eq!(Some("123"), map.insert(123, "321"));
    /// assert_eq!(map, champmap!{123 => "321"});
    /// assert!(before.is_empty());
    /// ```
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        let (replaced, map) = self.update_lookup(k, v);
        *self = map;
        replaced
    }

    /// Remove a key/value pair from a map, if it exists, and return
    /// the removed value.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let mut map = champmap!{123 => "123", 456 => "456"};
    /// assert_eq!(Some("123"), map.remove(&123));
    /// assert_eq!(Some("456"), map.remove(&456));
    /// assert_eq!(None, map.remove(&789));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove<BK>(&mut self, k: &BK) -> Option<V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.remove_with_key(k).map(|(_, v)| v)
    }

    /// Remove a key/value pair from a map, if it exists, and return
    /// the removed key and value.
    ///
    /// Time: O(log n)
    pub fn remove_with_key<BK>(&mut self, k: &BK) -> Option<(K, V)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        let (key, value, map) = self.extract_with_key(k)?;
        *self = map;
        Some((key, value))
    }

    /// Construct a new map by inserting a key/value mapping into a map.
    ///
    /// If the map already has a mapping for the given key, the previous
    /// value is overwritten. The original map is unchanged.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map = champmap!{};
    /// assert_eq!(
    ///   map.update(123, "123"),
    ///   champmap!{123 => "123"}
    /// );
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn update(&self, k: K, v: V) -> Self {
        self.update_lookup(k, v).1
    }

    /// Construct a new map by inserting a key/value mapping, also
    /// returning the value it replaced, if any.
    fn update_lookup(&self, k: K, v: V) -> (Option<V>, Self) {
        let hash = hash_key(&self.hasher, &k);
        let (root, replaced) = match &self.root {
            None => (Node::unit(hash, k, v), None),
            Some(root) => root.update(hash, 0, k, v),
        };
        let size = if replaced.is_none() {
            self.size + 1
        } else {
            self.size
        };
        let map = GenericChampMap {
            size,
            root: Some(SharedPointer::new(root)),
            hasher: self.hasher.clone(),
        };
        (replaced, map)
    }

    /// Construct a new map without the given key.
    ///
    /// Construct a map that's a copy of the current map, absent the
    /// mapping for `key` if it's present. If the key isn't present, the
    /// result shares its root with this map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map = champmap!{123 => "123", 456 => "456"};
    /// assert_eq!(
    ///   map.without(&123),
    ///   champmap!{456 => "456"}
    /// );
    /// assert!(map.without(&789).ptr_eq(&map));
    /// ```
    #[must_use]
    pub fn without<BK>(&self, k: &BK) -> Self
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        match self.extract_with_key(k) {
            None => self.clone(),
            Some((_, _, map)) => map,
        }
    }

    /// Remove a key from a map, returning the removed value and the
    /// map without it, or `None` if the key isn't present.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn extract<BK>(&self, k: &BK) -> Option<(V, Self)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.extract_with_key(k).map(|(_, v, m)| (v, m))
    }

    /// Remove a key from a map, returning the removed key and value
    /// and the map without them, or `None` if the key isn't present.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn extract_with_key<BK>(&self, k: &BK) -> Option<(K, V, Self)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        let root = self.root.as_ref()?;
        match root.remove(hash_key(&self.hasher, k), 0, k) {
            Remove::NotFound => None,
            Remove::Removed { node, leaf } => {
                let map = GenericChampMap {
                    size: self.size - 1,
                    root: node.map(SharedPointer::new),
                    hasher: self.hasher.clone(),
                };
                Some((leaf.key, leaf.value, map))
            }
        }
    }

    /// Construct the union of two maps, keeping the values in the
    /// current map when keys exist in both maps.
    ///
    /// Time: O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate champ_map;
    /// let map1 = champmap!{1 => 1, 3 => 3};
    /// let map2 = champmap!{2 => 2, 3 => 4};
    /// let expected = champmap!{1 => 1, 2 => 2, 3 => 3};
    /// assert_eq!(expected, map1.union(map2));
    /// ```
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let (mut to_mutate, to_consume, use_to_consume) = if self.len() >= other.len() {
            (self, other, false)
        } else {
            (other, self, true)
        };
        for (k, v) in to_consume {
            if use_to_consume || !to_mutate.contains_key(&k) {
                to_mutate.insert(k, v);
            }
        }
        to_mutate
    }
}

/// Test whether two maps have the same contents.
///
/// Maps of different sizes are unequal straight away. Otherwise the two
/// tries are compared node by node, skipping any subtree the maps share.
/// Since a trie in canonical form is determined by its contents, this is
/// content equality, provided both maps hash keys the same way.
///
/// # Examples
///
/// ```
/// # use champ_map::{champmap, ChampMap};
/// let a = ChampMap::new().update("a", 1).update("c", 3);
/// let b = ChampMap::new()
///     .update("a", 1)
///     .update("b", 2)
///     .update("c", 4)
///     .without("b")
///     .update("c", 3);
/// assert!(champmap::equal(&a, &b));
/// ```
#[must_use]
pub fn equal<K, V, S, P>(left: &GenericChampMap<K, V, S, P>, right: &GenericChampMap<K, V, S, P>) -> bool
where
    K: Eq,
    V: PartialEq,
    P: SharedPointerKind,
{
    if left.size != right.size {
        return false;
    }
    match (&left.root, &right.root) {
        (Some(l), Some(r)) => Node::shared_eq(l, r),
        (None, None) => true,
        _ => false,
    }
}

// Core traits

impl<K, V, S, P> Clone for GenericChampMap<K, V, S, P>
where
    S: Clone,
    P: SharedPointerKind,
{
    /// Clone a map.
    ///
    /// Time: O(1)
    #[inline]
    fn clone(&self) -> Self {
        GenericChampMap {
            root: self.root.clone(),
            size: self.size,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, S, P> PartialEq for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    /// Compare the contents of two maps.
    ///
    /// Maps which hash keys the same way are compared with
    /// [`equal`][equal]. When that finds a difference, which it may for
    /// maps whose hashers are seeded per instance, the maps are compared
    /// key by key instead.
    ///
    /// [equal]: ./fn.equal.html
    fn eq(&self, other: &Self) -> bool {
        if equal(self, other) {
            return true;
        }
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, P> Eq for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
}

impl<K, V, S, P> Default for GenericChampMap<K, V, S, P>
where
    S: Default,
    P: SharedPointerKind,
{
    #[inline]
    fn default() -> Self {
        GenericChampMap {
            size: 0,
            root: None,
            hasher: Default::default(),
        }
    }
}

impl<K, V, S, P> Add for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    type Output = GenericChampMap<K, V, S, P>;

    fn add(self, other: Self) -> Self::Output {
        self.union(other)
    }
}

impl<K, V, S, RK, RV, P> Extend<(RK, RV)> for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone + From<RK>,
    V: Clone + From<RV>,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (RK, RV)>,
    {
        for (key, value) in iter {
            self.insert(From::from(key), From::from(value));
        }
    }
}

impl<BK, K, V, S, P> Index<&BK> for GenericChampMap<K, V, S, P>
where
    BK: Hash + Eq + ?Sized,
    K: Hash + Eq + Borrow<BK>,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &BK) -> &Self::Output {
        match self.get(key) {
            None => panic!("ChampMap::index: invalid key"),
            Some(value) => value,
        }
    }
}

impl<K, V, S, P> Debug for GenericChampMap<K, V, S, P>
where
    K: Debug,
    V: Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mut d = f.debug_map();
        for (k, v) in self {
            d.entry(k, v);
        }
        d.finish()
    }
}

// Iterators

/// An iterator over the elements of a map.
pub struct Iter<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

// We impl Clone instead of deriving it, because we want Clone even if K and V aren't.
impl<'a, K, V, P: SharedPointerKind> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            it: self.it.clone(),
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Iter<'a, K, V, P> {}

/// A consuming iterator over the elements of a map.
pub struct ConsumingIter<K, V, P: SharedPointerKind> {
    it: NodeConsumingIter<K, V, P>,
}

impl<K: Clone, V: Clone, P: SharedPointerKind> Iterator for ConsumingIter<K, V, P> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K: Clone, V: Clone, P: SharedPointerKind> ExactSizeIterator for ConsumingIter<K, V, P> {}

impl<K: Clone, V: Clone, P: SharedPointerKind> FusedIterator for ConsumingIter<K, V, P> {}

/// An iterator over the keys of a map.
pub struct Keys<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Keys<'a, K, V, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Keys<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Keys<'a, K, V, P> {}

/// An iterator over the values of a map.
pub struct Values<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Values<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Values<'a, K, V, P> {}

impl<'a, K, V, S, P: SharedPointerKind> IntoIterator for &'a GenericChampMap<K, V, S, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, P> IntoIterator for GenericChampMap<K, V, S, P>
where
    K: Clone,
    V: Clone,
    P: SharedPointerKind,
{
    type Item = (K, V);
    type IntoIter = ConsumingIter<K, V, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ConsumingIter {
            it: NodeConsumingIter::new(self.root, self.size),
        }
    }
}

// Conversions

impl<K, V, S, P> FromIterator<(K, V)> for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from_iter<T>(i: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::default();
        for (k, v) in i {
            map.insert(k, v);
        }
        map
    }
}

impl<'a, K, V, S, P> From<&'a [(K, V)]> for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: &'a [(K, V)]) -> Self {
        m.iter().cloned().collect()
    }
}

impl<K, V, S, P> From<Vec<(K, V)>> for GenericChampMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn from(m: Vec<(K, V)>) -> Self {
        m.into_iter().collect()
    }
}

impl<K, V, S1, S2, P> From<collections::HashMap<K, V, S2>> for GenericChampMap<K, V, S1, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S1: BuildHasher + Default + Clone,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn from(m: collections::HashMap<K, V, S2>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S1, S2, P> From<&'a collections::HashMap<K, V, S2>> for GenericChampMap<K, V, S1, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S1: BuildHasher + Default + Clone,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn from(m: &'a collections::HashMap<K, V, S2>) -> Self {
        m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

// Tests
