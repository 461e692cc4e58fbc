// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Indented dumps of trie nodes, for debugging.

use std::fmt::{self, Debug, Display, Formatter};

use archery::SharedPointerKind;

use super::champ::{BitmapNode, Branches, CollisionNode, Node, BRANCH_FACTOR, HASH_SHIFT};

/// A printable dump of a map's trie, as returned by
/// [`GenericChampMap::tree`][tree].
///
/// [tree]: ../champmap/struct.GenericChampMap.html#method.tree
pub struct TreeDump<'a, K, V, P: SharedPointerKind> {
    root: Option<&'a Node<K, V, P>>,
}

impl<'a, K, V, P: SharedPointerKind> TreeDump<'a, K, V, P> {
    pub(crate) fn new(root: Option<&'a Node<K, V, P>>) -> Self {
        TreeDump { root }
    }
}

impl<'a, K: Debug, V: Debug, P: SharedPointerKind> Display for TreeDump<'a, K, V, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.root {
            None => write!(f, "<nil>"),
            Some(root) => root.write_tree(f, 0, 0),
        }
    }
}

impl<'a, K: Debug, V: Debug, P: SharedPointerKind> Debug for TreeDump<'a, K, V, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Indent(usize);

impl Display for Indent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("  ")?;
        }
        Ok(())
    }
}

/// The n-th set bit of `bitmap`.
fn nth_bit(bitmap: &Branches, n: usize) -> usize {
    bitmap.into_iter().nth(n).unwrap_or(BRANCH_FACTOR)
}

impl<K: Debug, V: Debug, P: SharedPointerKind> Node<K, V, P> {
    pub(crate) fn write_tree(&self, f: &mut Formatter<'_>, depth: usize, shift: usize) -> fmt::Result {
        match self {
            Node::Bitmap(node) => node.write_tree(f, depth, shift),
            Node::Collision(node) => node.write_tree(f, depth),
        }
    }
}

impl<K: Debug, V: Debug, P: SharedPointerKind> BitmapNode<K, V, P> {
    fn write_tree(&self, f: &mut Formatter<'_>, depth: usize, shift: usize) -> fmt::Result {
        let indent = Indent(depth);
        writeln!(f, "{}BitmapNode[shift={}]{{", indent, shift)?;
        writeln!(
            f,
            "{}  datamap: 0b{:0width$b} (0x{:0hex$x})",
            indent,
            self.datamap.into_value(),
            self.datamap.into_value(),
            width = BRANCH_FACTOR,
            hex = (BRANCH_FACTOR + 3) / 4,
        )?;
        writeln!(
            f,
            "{}  nodemap: 0b{:0width$b} (0x{:0hex$x})",
            indent,
            self.nodemap.into_value(),
            self.nodemap.into_value(),
            width = BRANCH_FACTOR,
            hex = (BRANCH_FACTOR + 3) / 4,
        )?;
        if !self.data.is_empty() {
            writeln!(f, "{}  data[{}]:", indent, self.data.len())?;
            for (i, leaf) in self.data.iter().enumerate() {
                writeln!(
                    f,
                    "{}    [bit {:2}] {:?} => {:?}",
                    indent,
                    nth_bit(&self.datamap, i),
                    leaf.key,
                    leaf.value
                )?;
            }
        }
        if !self.children.is_empty() {
            writeln!(f, "{}  nodes[{}]:", indent, self.children.len())?;
            for (i, child) in self.children.iter().enumerate() {
                writeln!(f, "{}    [bit {:2}]:", indent, nth_bit(&self.nodemap, i))?;
                child.write_tree(f, depth + 2, shift + HASH_SHIFT)?;
                writeln!(f)?;
            }
        }
        write!(f, "{}}}", indent)
    }
}

impl<K: Debug, V: Debug> CollisionNode<K, V> {
    fn write_tree(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = Indent(depth);
        writeln!(f, "{}CollisionNode{{", indent)?;
        writeln!(f, "{}  hash: 0x{:08x}", indent, self.hash)?;
        writeln!(f, "{}  entries[{}]:", indent, self.data.len())?;
        for leaf in &self.data {
            writeln!(f, "{}    {:?} => {:?}", indent, leaf.key, leaf.value)?;
        }
        write!(f, "{}}}", indent)
    }
}

impl<K: Debug, V: Debug, P: SharedPointerKind> Debug for Node<K, V, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0, 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared_ptr::DefaultSharedPtr;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_tree() {
        let dump: TreeDump<'_, i32, i32, DefaultSharedPtr> = TreeDump::new(None);
        assert_eq!("<nil>", dump.to_string());
    }

    #[cfg(not(feature = "small-chunks"))]
    #[test]
    fn nested_tree() {
        let root: Node<&str, i32, DefaultSharedPtr> = Node::unit(0b00001, "a", 1);
        let (root, _) = root.update(0b10_00010, 0, "b", 2);
        let (root, _) = root.update(0b11_00010, 0, "c", 3);
        let expected = "\
BitmapNode[shift=0]{
  datamap: 0b00000000000000000000000000000010 (0x00000002)
  nodemap: 0b00000000000000000000000000000100 (0x00000004)
  data[1]:
    [bit  1] \"a\" => 1
  nodes[1]:
    [bit  2]:
    BitmapNode[shift=5]{
      datamap: 0b00000000000000000000000000001100 (0x0000000c)
      nodemap: 0b00000000000000000000000000000000 (0x00000000)
      data[2]:
        [bit  2] \"b\" => 2
        [bit  3] \"c\" => 3
    }
}";
        assert_eq!(expected, TreeDump::new(Some(&root)).to_string());
    }

    #[test]
    fn collision_node() {
        let root: Node<&str, i32, DefaultSharedPtr> = Node::unit(7, "a", 1);
        let (root, _) = root.update(7, 0, "b", 2);
        let dump = format!("{:?}", root);
        assert!(dump.contains("CollisionNode{"));
        assert!(dump.contains("hash: 0x00000007"));
        assert!(dump.contains("entries[2]:"));
        assert!(dump.contains("\"a\" => 1"));
        assert!(dump.contains("\"b\" => 2"));
    }
}
