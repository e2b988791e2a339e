//! Structural predicates over a tree, used by [Table::validate].
//!
//! Each predicate is pure and looks at the whole tree, `O(n)` or
//! `O(n log n)` for rank consistency.
//!
//! [Table::validate]: crate::Table::validate

use std::ptr;

use crate::node::{self, Node};

/// Is the tree rooted at `node` a BST with all keys strictly between
/// `min` and `max`. Missing bound is unconstrained.
pub(crate) fn is_bst<K, V>(node: Option<&Node<K, V>>, min: Option<&K>, max: Option<&K>) -> bool
where
    K: Ord,
{
    let node = match node {
        Some(node) => node,
        None => return true,
    };
    if min.map_or(false, |min| node.key.le(min)) {
        return false;
    }
    if max.map_or(false, |max| node.key.ge(max)) {
        return false;
    }
    is_bst(node.as_left_ref(), min, Some(&node.key))
        && is_bst(node.as_right_ref(), Some(&node.key), max)
}

/// Are the size fields correct.
pub(crate) fn is_size_consistent<K, V>(node: Option<&Node<K, V>>) -> bool {
    match node {
        Some(n) => {
            let (left, right) = (n.as_left_ref(), n.as_right_ref());
            n.size == 1 + node::size(left) + node::size(right)
                && is_size_consistent(left)
                && is_size_consistent(right)
        }
        None => true,
    }
}

/// Check that rank(select(i)) == i for every index and that
/// select(rank(key)) == key for every key.
pub(crate) fn is_rank_consistent<K, V>(root: Option<&Node<K, V>>) -> bool
where
    K: Ord,
{
    let n = node::size(root);
    let ok = (0..n).all(|i| match node::select(root, i) {
        Some(x) => node::rank(root, &x.key) == i,
        None => false,
    });
    if !ok {
        return false;
    }

    let mut nodes = Vec::with_capacity(n);
    collect_nodes(root, &mut nodes);
    nodes.into_iter().all(|x| {
        let i = node::rank(root, &x.key);
        node::select(root, i).map_or(false, |y| y.key.eq(&x.key))
    })
}

/// No red right links anywhere, and no node other than root has both
/// itself and its left child reached by red links.
pub(crate) fn is_23<K, V>(root: Option<&Node<K, V>>) -> bool {
    match root {
        Some(root) => is_23_at(Some(root), root),
        None => true,
    }
}

fn is_23_at<K, V>(node: Option<&Node<K, V>>, root: &Node<K, V>) -> bool {
    let node = match node {
        Some(node) => node,
        None => return true,
    };
    if node::is_red(node.as_right_ref()) {
        return false;
    }
    if !ptr::eq(node, root) && node::is_red(Some(node)) && node::is_red(node.as_left_ref()) {
        return false;
    }
    is_23_at(node.as_left_ref(), root) && is_23_at(node.as_right_ref(), root)
}

/// Do all paths from root to leaf have same number of black links.
pub(crate) fn is_balanced<K, V>(root: Option<&Node<K, V>>) -> bool {
    // number of black links on path from root to min
    let mut blacks = 0;
    let mut node = root;
    while let Some(x) = node {
        if node::is_black(Some(x)) {
            blacks += 1;
        }
        node = x.as_left_ref();
    }
    is_balanced_at(root, blacks)
}

fn is_balanced_at<K, V>(node: Option<&Node<K, V>>, mut blacks: usize) -> bool {
    let node = match node {
        Some(node) => node,
        None => return blacks == 0,
    };
    if node.is_black() {
        match blacks.checked_sub(1) {
            Some(n) => blacks = n,
            None => return false,
        }
    }
    is_balanced_at(node.as_left_ref(), blacks) && is_balanced_at(node.as_right_ref(), blacks)
}

fn collect_nodes<'a, K, V>(node: Option<&'a Node<K, V>>, acc: &mut Vec<&'a Node<K, V>>) {
    if let Some(node) = node {
        collect_nodes(node.as_left_ref(), acc);
        acc.push(node);
        collect_nodes(node.as_right_ref(), acc);
    }
}

#[cfg(test)]
#[path = "check_test.rs"]
mod check_test;
