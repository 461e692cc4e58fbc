// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CHAMP trie nodes.
//!
//! A node consumes `HASH_SHIFT` bits of a key's hash to pick one of
//! `BRANCH_FACTOR` branches. Each branch of a [`BitmapNode`] is either empty,
//! an inline entry (its bit is set in `datamap`) or a child node (its bit is
//! set in `nodemap`). Inline entries and children are stored in compacted
//! vectors in ascending branch order, so the slot of a branch is the number
//! of set bits below it in the matching bitmap.
//!
//! Once every bit of the hash has been consumed, keys which still share a
//! branch have identical hashes and go into a [`CollisionNode`].
//!
//! Nodes are never modified after construction. Every operation which
//! changes the content of a node builds a new one, sharing the untouched
//! children with the original.

use std::borrow::Borrow;
use std::convert::TryFrom;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;
use std::slice::Iter as SliceIter;
use std::vec::IntoIter as VecIntoIter;

use archery::{SharedPointer, SharedPointerKind};
use bitmaps::Bitmap;

use crate::util::clone_ref;

pub(crate) use crate::config::HASH_LEVEL_SIZE as HASH_SHIFT;

/// Number of branches per node.
pub(crate) const BRANCH_FACTOR: usize = 2_usize.pow(HASH_SHIFT as u32);

/// The hash of a key, as consumed by the trie.
pub(crate) type HashBits = u32;

/// Width of [`HashBits`] in bits.
pub(crate) const HASH_BITS: usize = HashBits::BITS as usize;

pub(crate) const HASH_MASK: HashBits = (BRANCH_FACTOR - 1) as HashBits;

/// Number of bitmap levels needed to consume a whole hash.
pub(crate) const MAX_DEPTH: usize = (HASH_BITS + HASH_SHIFT - 1) / HASH_SHIFT;

/// Shift at which the hash is exhausted. Nodes built at this shift are
/// always collision nodes.
pub(crate) const MAX_SHIFT: usize = MAX_DEPTH * HASH_SHIFT;

/// A bitmap with one bit per branch.
pub(crate) type Branches = Bitmap<BRANCH_FACTOR>;

pub(crate) fn hash_key<K: Hash + ?Sized, S: BuildHasher>(bh: &S, key: &K) -> HashBits {
    let mut hasher = bh.build_hasher();
    key.hash(&mut hasher);
    hasher.finish() as HashBits
}

/// The branch selected by `hash` at `shift`.
///
/// Bits past the width of the hash read as zero: a shift of `HASH_BITS` or
/// more always selects branch 0.
#[inline]
pub(crate) fn mask(hash: HashBits, shift: usize) -> usize {
    let bits = u32::try_from(shift)
        .ok()
        .and_then(|shift| hash.checked_shr(shift))
        .unwrap_or(0);
    (bits & HASH_MASK) as usize
}

/// The compacted slot of `bit` within `bitmap`: the number of set bits
/// below it.
#[inline]
pub(crate) fn index(bitmap: Branches, bit: usize) -> usize {
    (bitmap & Branches::mask(bit)).len()
}

/// An inline entry.
#[derive(Clone)]
pub(crate) struct Leaf<K, V> {
    pub(crate) hash: HashBits,
    pub(crate) key: K,
    pub(crate) value: V,
}

pub(crate) enum Node<K, V, P: SharedPointerKind> {
    Bitmap(BitmapNode<K, V, P>),
    Collision(CollisionNode<K, V>),
}

pub(crate) struct BitmapNode<K, V, P: SharedPointerKind> {
    pub(super) datamap: Branches,
    pub(super) nodemap: Branches,
    pub(super) data: Vec<Leaf<K, V>>,
    pub(super) children: Vec<SharedPointer<Node<K, V, P>, P>>,
}

pub(crate) struct CollisionNode<K, V> {
    pub(super) hash: HashBits,
    pub(super) data: Vec<Leaf<K, V>>,
}

/// Outcome of removing a key from a node.
pub(crate) enum Remove<K, V, P: SharedPointerKind> {
    NotFound,
    /// The key was removed. `node` is `None` if nothing is left of the node.
    Removed {
        node: Option<Node<K, V, P>>,
        leaf: Leaf<K, V>,
    },
}

// We impl Clone instead of deriving it, because P doesn't need to be Clone.
impl<K: Clone, V: Clone, P: SharedPointerKind> Clone for BitmapNode<K, V, P> {
    fn clone(&self) -> Self {
        BitmapNode {
            datamap: self.datamap,
            nodemap: self.nodemap,
            data: self.data.clone(),
            children: self.children.clone(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for CollisionNode<K, V> {
    fn clone(&self) -> Self {
        CollisionNode {
            hash: self.hash,
            data: self.data.clone(),
        }
    }
}

impl<K: Clone, V: Clone, P: SharedPointerKind> Clone for Node<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Node::Bitmap(node) => Node::Bitmap(node.clone()),
            Node::Collision(node) => Node::Collision(node.clone()),
        }
    }
}

impl<K, V, P: SharedPointerKind> Node<K, V, P> {
    /// A root node holding a single entry.
    pub(crate) fn unit(hash: HashBits, key: K, value: V) -> Self {
        Node::Bitmap(BitmapNode::unit(mask(hash, 0), Leaf { hash, key, value }))
    }

    /// Unwrap a node which holds nothing but a single inline entry.
    fn into_single_leaf(self) -> Result<Leaf<K, V>, Self> {
        match self {
            Node::Bitmap(mut node) if node.children.is_empty() && node.data.len() == 1 => {
                Ok(node.data.remove(0))
            }
            node => Err(node),
        }
    }
}

impl<K, V, P: SharedPointerKind> BitmapNode<K, V, P> {
    fn unit(bit: usize, leaf: Leaf<K, V>) -> Self {
        let mut datamap = Branches::new();
        datamap.set(bit, true);
        BitmapNode {
            datamap,
            nodemap: Branches::new(),
            data: vec![leaf],
            children: Vec::new(),
        }
    }

    fn pair(bit1: usize, leaf1: Leaf<K, V>, bit2: usize, leaf2: Leaf<K, V>) -> Self {
        debug_assert_ne!(bit1, bit2);
        let mut datamap = Branches::new();
        datamap.set(bit1, true);
        datamap.set(bit2, true);
        let data = if bit1 < bit2 {
            vec![leaf1, leaf2]
        } else {
            vec![leaf2, leaf1]
        };
        BitmapNode {
            datamap,
            nodemap: Branches::new(),
            data,
            children: Vec::new(),
        }
    }

    fn single_child(bit: usize, child: Node<K, V, P>) -> Self {
        let mut nodemap = Branches::new();
        nodemap.set(bit, true);
        BitmapNode {
            datamap: Branches::new(),
            nodemap,
            data: Vec::new(),
            children: vec![SharedPointer::new(child)],
        }
    }
}

impl<K: Eq, V, P: SharedPointerKind> Node<K, V, P> {
    pub(crate) fn get<BK>(&self, hash: HashBits, shift: usize, key: &BK) -> Option<(&K, &V)>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
    {
        match self {
            Node::Bitmap(node) => node.get(hash, shift, key),
            Node::Collision(node) => node.get(hash, key),
        }
    }
}

impl<K: Eq, V, P: SharedPointerKind> BitmapNode<K, V, P> {
    fn get<BK>(&self, hash: HashBits, shift: usize, key: &BK) -> Option<(&K, &V)>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
    {
        let bit = mask(hash, shift);
        if self.datamap.get(bit) {
            // The inline entry owns this branch; no other slot can hold the key.
            let leaf = &self.data[index(self.datamap, bit)];
            if leaf.hash == hash && key == leaf.key.borrow() {
                Some((&leaf.key, &leaf.value))
            } else {
                None
            }
        } else if self.nodemap.get(bit) {
            self.children[index(self.nodemap, bit)].get(hash, shift + HASH_SHIFT, key)
        } else {
            None
        }
    }
}

impl<K: Eq, V> CollisionNode<K, V> {
    fn get<BK>(&self, hash: HashBits, key: &BK) -> Option<(&K, &V)>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
    {
        if hash != self.hash {
            return None;
        }
        self.data
            .iter()
            .find(|leaf| key == leaf.key.borrow())
            .map(|leaf| (&leaf.key, &leaf.value))
    }
}

impl<K, V, P> Node<K, V, P>
where
    K: Eq + Clone,
    V: Clone,
    P: SharedPointerKind,
{
    /// Build the node holding two entries which share a branch one level up.
    fn merge(leaf1: Leaf<K, V>, leaf2: Leaf<K, V>, shift: usize) -> Self {
        if shift >= MAX_SHIFT {
            return Node::Collision(CollisionNode::new(leaf1, leaf2));
        }
        let bit1 = mask(leaf1.hash, shift);
        let bit2 = mask(leaf2.hash, shift);
        if bit1 == bit2 {
            let child = Node::merge(leaf1, leaf2, shift + HASH_SHIFT);
            Node::Bitmap(BitmapNode::single_child(bit1, child))
        } else {
            Node::Bitmap(BitmapNode::pair(bit1, leaf1, bit2, leaf2))
        }
    }

    /// Construct a copy of this node with `key` mapped to `value`.
    ///
    /// Returns the new node and the value previously mapped to `key`, or
    /// `None` if the key is new.
    pub(crate) fn update(&self, hash: HashBits, shift: usize, key: K, value: V) -> (Self, Option<V>) {
        let leaf = Leaf { hash, key, value };
        match self {
            Node::Bitmap(node) => node.update(shift, leaf),
            Node::Collision(node) => {
                let (node, replaced) = node.update(leaf);
                (Node::Collision(node), replaced)
            }
        }
    }

    /// Construct a copy of this node without `key`.
    pub(crate) fn remove<BK>(&self, hash: HashBits, shift: usize, key: &BK) -> Remove<K, V, P>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
    {
        match self {
            Node::Bitmap(node) => node.remove(hash, shift, key),
            Node::Collision(node) => node.remove(shift, key),
        }
    }
}

impl<K, V, P> BitmapNode<K, V, P>
where
    K: Eq + Clone,
    V: Clone,
    P: SharedPointerKind,
{
    fn update(&self, shift: usize, leaf: Leaf<K, V>) -> (Node<K, V, P>, Option<V>) {
        let bit = mask(leaf.hash, shift);
        if self.datamap.get(bit) {
            let idx = index(self.datamap, bit);
            let current = &self.data[idx];
            if current.hash == leaf.hash && current.key == leaf.key {
                let mut node = self.clone();
                let old = mem::replace(&mut node.data[idx], leaf);
                return (Node::Bitmap(node), Some(old.value));
            }
            // Two keys want the same branch: push both into a new child.
            let child = Node::merge(current.clone(), leaf, shift + HASH_SHIFT);
            let mut node = self.clone();
            node.data.remove(idx);
            node.children
                .insert(index(self.nodemap, bit), SharedPointer::new(child));
            node.datamap.set(bit, false);
            node.nodemap.set(bit, true);
            return (Node::Bitmap(node), None);
        }
        if self.nodemap.get(bit) {
            let idx = index(self.nodemap, bit);
            let (child, replaced) =
                self.children[idx].update(leaf.hash, shift + HASH_SHIFT, leaf.key, leaf.value);
            // An update always yields a new child, either a replaced value or
            // an added entry, so the parent is always copied too.
            let mut node = self.clone();
            node.children[idx] = SharedPointer::new(child);
            return (Node::Bitmap(node), replaced);
        }
        let mut node = self.clone();
        node.data.insert(index(self.datamap, bit), leaf);
        node.datamap.set(bit, true);
        (Node::Bitmap(node), None)
    }

    fn remove<BK>(&self, hash: HashBits, shift: usize, key: &BK) -> Remove<K, V, P>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
    {
        let bit = mask(hash, shift);
        if self.datamap.get(bit) {
            let idx = index(self.datamap, bit);
            let leaf = &self.data[idx];
            if key != leaf.key.borrow() {
                return Remove::NotFound;
            }
            let leaf = leaf.clone();
            if self.data.len() == 1 && self.children.is_empty() {
                return Remove::Removed { node: None, leaf };
            }
            let mut node = self.clone();
            node.data.remove(idx);
            node.datamap.set(bit, false);
            return Remove::Removed {
                node: Some(Node::Bitmap(node)),
                leaf,
            };
        }
        if !self.nodemap.get(bit) {
            return Remove::NotFound;
        }
        let idx = index(self.nodemap, bit);
        match self.children[idx].remove(hash, shift + HASH_SHIFT, key) {
            Remove::NotFound => Remove::NotFound,
            Remove::Removed { node: None, leaf } => {
                if self.children.len() == 1 && self.data.is_empty() {
                    return Remove::Removed { node: None, leaf };
                }
                let mut node = self.clone();
                node.children.remove(idx);
                node.nodemap.set(bit, false);
                Remove::Removed {
                    node: Some(Node::Bitmap(node)),
                    leaf,
                }
            }
            Remove::Removed {
                node: Some(child),
                leaf,
            } => {
                let mut node = self.clone();
                match child.into_single_leaf() {
                    Ok(single) => {
                        // A lone entry never lives in a child node: pull it up
                        // into this one.
                        node.children.remove(idx);
                        node.nodemap.set(bit, false);
                        node.data.insert(index(self.datamap, bit), single);
                        node.datamap.set(bit, true);
                    }
                    Err(child) => {
                        node.children[idx] = SharedPointer::new(child);
                    }
                }
                Remove::Removed {
                    node: Some(Node::Bitmap(node)),
                    leaf,
                }
            }
        }
    }
}

impl<K, V> CollisionNode<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    fn new(leaf1: Leaf<K, V>, leaf2: Leaf<K, V>) -> Self {
        debug_assert_eq!(leaf1.hash, leaf2.hash);
        CollisionNode {
            hash: leaf1.hash,
            data: vec![leaf1, leaf2],
        }
    }

    fn update(&self, leaf: Leaf<K, V>) -> (Self, Option<V>) {
        debug_assert_eq!(self.hash, leaf.hash);
        let mut data = self.data.clone();
        if let Some(current) = data.iter_mut().find(|current| current.key == leaf.key) {
            let old = mem::replace(&mut current.value, leaf.value);
            return (CollisionNode { hash: self.hash, data }, Some(old));
        }
        data.push(leaf);
        (CollisionNode { hash: self.hash, data }, None)
    }

    fn remove<BK, P>(&self, shift: usize, key: &BK) -> Remove<K, V, P>
    where
        BK: Eq + ?Sized,
        K: Borrow<BK>,
        P: SharedPointerKind,
    {
        let Some(idx) = self.data.iter().position(|leaf| key == leaf.key.borrow()) else {
            return Remove::NotFound;
        };
        let mut data = self.data.clone();
        let leaf = data.remove(idx);
        let node = if data.len() == 1 {
            // Hand the survivor back as a plain node; the parent pulls it up.
            let last = data.remove(0);
            Node::Bitmap(BitmapNode::unit(mask(last.hash, shift), last))
        } else {
            Node::Collision(CollisionNode {
                hash: self.hash,
                data,
            })
        };
        Remove::Removed {
            node: Some(node),
            leaf,
        }
    }
}

// Equality

impl<K: Eq, V: PartialEq, P: SharedPointerKind> Node<K, V, P> {
    /// Compare two subtrees, skipping the descent when both sides point to
    /// the same node.
    ///
    /// Sound only for tries in canonical form which were built with the same
    /// hash function: content equality then implies equal tree shapes.
    pub(crate) fn shared_eq(left: &SharedPointer<Self, P>, right: &SharedPointer<Self, P>) -> bool {
        SharedPointer::ptr_eq(left, right) || left.structural_eq(right)
    }

    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Bitmap(left), Node::Bitmap(right)) => {
                left.datamap == right.datamap
                    && left.nodemap == right.nodemap
                    && left
                        .data
                        .iter()
                        .zip(&right.data)
                        .all(|(l, r)| l.key == r.key && l.value == r.value)
                    && left
                        .children
                        .iter()
                        .zip(&right.children)
                        .all(|(l, r)| Node::shared_eq(l, r))
            }
            // Collision entries are kept in insertion order, so compare them
            // as sets.
            (Node::Collision(left), Node::Collision(right)) => {
                left.hash == right.hash
                    && left.data.len() == right.data.len()
                    && left.data.iter().all(|l| {
                        right
                            .data
                            .iter()
                            .any(|r| l.key == r.key && l.value == r.value)
                    })
            }
            _ => false,
        }
    }
}

// Invariants

#[cfg(any(test, feature = "debug"))]
impl<K: Eq, V, P: SharedPointerKind> Node<K, V, P> {
    /// Panic if this subtree breaks any structural invariant. Returns the
    /// number of entries in the subtree.
    pub(crate) fn assert_invariants(&self, shift: usize, is_root: bool) -> usize {
        match self {
            Node::Bitmap(node) => {
                assert!(shift < MAX_SHIFT, "bitmap node below the last level");
                assert!(
                    (node.datamap & node.nodemap).is_empty(),
                    "branch is both an entry and a child"
                );
                assert_eq!(node.datamap.len(), node.data.len());
                assert_eq!(node.nodemap.len(), node.children.len());
                assert!(
                    !node.data.is_empty() || !node.children.is_empty(),
                    "empty node in trie"
                );
                if !is_root {
                    assert!(
                        node.data.len() != 1 || !node.children.is_empty(),
                        "single entry left in a child node"
                    );
                }
                for (bit, leaf) in (&node.datamap).into_iter().zip(&node.data) {
                    assert_eq!(bit, mask(leaf.hash, shift), "entry on the wrong branch");
                }
                let mut count = node.data.len();
                for child in &node.children {
                    count += child.assert_invariants(shift + HASH_SHIFT, false);
                }
                count
            }
            Node::Collision(node) => {
                assert!(shift >= MAX_SHIFT, "collision node above the last level");
                assert!(node.data.len() >= 2, "collision node with a single entry");
                for (i, leaf) in node.data.iter().enumerate() {
                    assert_eq!(node.hash, leaf.hash);
                    assert!(
                        node.data[i + 1..].iter().all(|other| other.key != leaf.key),
                        "duplicate key in collision node"
                    );
                }
                node.data.len()
            }
        }
    }
}

// Ref iterator

struct Frame<'a, K, V, P: SharedPointerKind> {
    data: SliceIter<'a, Leaf<K, V>>,
    children: SliceIter<'a, SharedPointer<Node<K, V, P>, P>>,
}

impl<'a, K, V, P: SharedPointerKind> Frame<'a, K, V, P> {
    fn new(node: &'a Node<K, V, P>) -> Self {
        match node {
            Node::Bitmap(node) => Frame {
                data: node.data.iter(),
                children: node.children.iter(),
            },
            Node::Collision(node) => Frame {
                data: node.data.iter(),
                children: SliceIter::default(),
            },
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Clone for Frame<'a, K, V, P> {
    fn clone(&self) -> Self {
        Frame {
            data: self.data.clone(),
            children: self.children.clone(),
        }
    }
}

/// Depth first iterator: a node's inline entries come before its children,
/// both in ascending branch order.
pub(crate) struct Iter<'a, K, V, P: SharedPointerKind> {
    count: usize,
    stack: Vec<Frame<'a, K, V, P>>,
}

// We impl Clone instead of deriving it, because we want Clone even if K and V aren't.
impl<'a, K, V, P: SharedPointerKind> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            count: self.count,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iter<'a, K, V, P> {
    pub(crate) fn new(root: Option<&'a Node<K, V, P>>, size: usize) -> Self {
        let mut stack = Vec::with_capacity(MAX_DEPTH + 1);
        stack.extend(root.map(Frame::new));
        Iter { count: size, stack }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.last_mut() {
            if let Some(leaf) = frame.data.next() {
                self.count -= 1;
                return Some((&leaf.key, &leaf.value));
            }
            match frame.children.next() {
                Some(child) => self.stack.push(Frame::new(child)),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Iter<'a, K, V, P> {}

// Consuming iterator

struct OwnedFrame<K, V, P: SharedPointerKind> {
    data: VecIntoIter<Leaf<K, V>>,
    children: VecIntoIter<SharedPointer<Node<K, V, P>, P>>,
}

impl<K, V, P: SharedPointerKind> OwnedFrame<K, V, P> {
    fn new(node: Node<K, V, P>) -> Self {
        match node {
            Node::Bitmap(node) => OwnedFrame {
                data: node.data.into_iter(),
                children: node.children.into_iter(),
            },
            Node::Collision(node) => OwnedFrame {
                data: node.data.into_iter(),
                children: Vec::new().into_iter(),
            },
        }
    }
}

/// Consuming iterator, in the same order as [`Iter`]. Nodes are only cloned
/// when another map still shares them.
pub(crate) struct ConsumingIter<K, V, P: SharedPointerKind> {
    count: usize,
    stack: Vec<OwnedFrame<K, V, P>>,
}

impl<K: Clone, V: Clone, P: SharedPointerKind> ConsumingIter<K, V, P> {
    pub(crate) fn new(root: Option<SharedPointer<Node<K, V, P>, P>>, size: usize) -> Self {
        let mut stack = Vec::with_capacity(MAX_DEPTH + 1);
        stack.extend(root.map(|root| OwnedFrame::new(clone_ref(root))));
        ConsumingIter { count: size, stack }
    }
}

impl<K: Clone, V: Clone, P: SharedPointerKind> Iterator for ConsumingIter<K, V, P> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.last_mut() {
            if let Some(leaf) = frame.data.next() {
                self.count -= 1;
                return Some((leaf.key, leaf.value));
            }
            match frame.children.next() {
                Some(child) => self.stack.push(OwnedFrame::new(clone_ref(child))),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<K: Clone, V: Clone, P: SharedPointerKind> ExactSizeIterator for ConsumingIter<K, V, P> {}

impl<K: Clone, V: Clone, P: SharedPointerKind> FusedIterator for ConsumingIter<K, V, P> {}
