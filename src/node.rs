//! Node type and the recursive algorithms that keep a subtree balanced.
//!
//! Every mutating routine takes ownership of a subtree and hands back the
//! new owning reference, because rotations change which node roots the
//! subtree. Color of the link into the root is left to the caller.

use std::{
    borrow::Borrow,
    cmp::{self, Ord, Ordering},
    mem,
};

/// Node corresponds to a single entry in Table instance.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) black: bool,                    // color of the link from parent
    pub(crate) size: usize,                    // nodes in this subtree, including self
    pub(crate) left: Option<Box<Node<K, V>>>,  // store: left child
    pub(crate) right: Option<Box<Node<K, V>>>, // store: right child
}

impl<K, V> Node<K, V> {
    /// New nodes are always red leaves.
    pub(crate) fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            black: false,
            size: 1,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn as_left_ref(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn as_right_ref(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    /// Replace value, handing the previous value back to the caller.
    #[inline]
    pub(crate) fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = 1 + size(self.as_left_ref()) + size(self.as_right_ref());
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Absent node is black.
#[inline]
pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

#[inline]
pub(crate) fn is_black<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(true, |node| node.is_black())
}

#[inline]
pub(crate) fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

#[inline]
fn left_left<K, V>(node: &Node<K, V>) -> Option<&Node<K, V>> {
    node.as_left_ref().and_then(Node::as_left_ref)
}

#[inline]
fn right_left<K, V>(node: &Node<K, V>) -> Option<&Node<K, V>> {
    node.as_right_ref().and_then(Node::as_left_ref)
}

//--------- search routines ----------------

pub(crate) fn get<'a, K, V, Q>(mut node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(nref) = node {
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Less => nref.as_left_ref(),
            Ordering::Greater => nref.as_right_ref(),
            Ordering::Equal => return Some(nref),
        };
    }
    None
}

pub(crate) fn get_mut<'a, K, V, Q>(
    mut node: Option<&'a mut Node<K, V>>,
    key: &Q,
) -> Option<&'a mut Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(nref) = node {
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Less => nref.left.as_deref_mut(),
            Ordering::Greater => nref.right.as_deref_mut(),
            Ordering::Equal => return Some(nref),
        };
    }
    None
}

pub(crate) fn min<K, V>(mut node: &Node<K, V>) -> &Node<K, V> {
    while let Some(left) = node.as_left_ref() {
        node = left
    }
    node
}

pub(crate) fn max<K, V>(mut node: &Node<K, V>) -> &Node<K, V> {
    while let Some(right) = node.as_right_ref() {
        node = right
    }
    node
}

//--------- rotation routines for 2-3 algorithm ----------------

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
pub(crate) fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.right.take() {
        Some(x) if !x.is_black() => x,
        _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
    };
    node.right = x.left.take();
    x.black = node.black;
    x.size = node.size;
    node.set_red();
    node.update_size();
    x.left = Some(node);
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//            (r)   \                   (r)  \
//           /       \                 /      \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
pub(crate) fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.left.take() {
        Some(x) if !x.is_black() => x,
        _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
    };
    node.left = x.right.take();
    x.black = node.black;
    x.size = node.size;
    node.set_red();
    node.update_size();
    x.right = Some(node);
    x
}

//        (x)                   (!x)
//         |                     |
//        node                  node
//        / \                   / \
//      (y) (z)              (!y) (!z)
//     /      \              /      \
//   left    right         left    right
//
pub(crate) fn flip<K, V>(node: &mut Node<K, V>) {
    if let Some(left) = node.left.as_mut() {
        left.toggle_link();
    }
    if let Some(right) = node.right.as_mut() {
        right.toggle_link();
    }
    node.toggle_link();
}

/// Assuming that node is red and both node.left and node.left.left are
/// black, make node.left or one of its children red.
pub(crate) fn move_red_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip(&mut node);
    if is_red(right_left(&node)) {
        node.right = node.right.take().map(rotate_right);
        node = rotate_left(node);
        flip(&mut node);
    }
    node
}

/// Assuming that node is red and both node.right and node.right.left are
/// black, make node.right or one of its children red.
pub(crate) fn move_red_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip(&mut node);
    if is_red(left_left(&node)) {
        node = rotate_right(node);
        flip(&mut node);
    }
    node
}

/// Restore the left-leaning invariants at `node` on the way back up
/// from an insert, and recompute its size.
pub(crate) fn walkup<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(node.as_right_ref()) && !is_red(node.as_left_ref()) {
        node = rotate_left(node);
    }
    if is_red(node.as_left_ref()) && is_red(left_left(&node)) {
        node = rotate_right(node);
    }
    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(&mut node);
    }
    node.update_size();
    node
}

/// Restore the left-leaning invariants at `node` on the way back up
/// from a delete, and recompute its size. Unlike [walkup], a red right
/// link is rotated even when the left link is red, deletes can leave
/// both links and the left-left link red at once.
pub(crate) fn balance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(node.as_right_ref()) {
        node = rotate_left(node);
    }
    if is_red(node.as_left_ref()) && is_red(left_left(&node)) {
        node = rotate_right(node);
    }
    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(&mut node);
    }
    node.update_size();
    node
}

//--------- write routines ----------------

type Upsert<K, V> = (Box<Node<K, V>>, Option<V>);
type Delete<K, V> = (Option<Box<Node<K, V>>>, Box<Node<K, V>>);

/// Insert {key, value} under `node`. If key is already present its value
/// is replaced and the previous value is returned.
pub(crate) fn put<K, V>(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Upsert<K, V>
where
    K: Ord,
{
    let mut node = match node {
        Some(node) => node,
        None => return (Box::new(Node::new(key, value)), None),
    };

    let old_value = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, o) = put(node.left.take(), key, value);
            node.left = Some(left);
            o
        }
        Ordering::Greater => {
            let (right, o) = put(node.right.take(), key, value);
            node.right = Some(right);
            o
        }
        Ordering::Equal => Some(node.set_value(value)),
    };

    (walkup(node), old_value)
}

/// Unlink the minimum entry under `node`. Returns the new subtree and
/// the detached node.
pub(crate) fn delete_min<K, V>(mut node: Box<Node<K, V>>) -> Delete<K, V> {
    if node.left.is_none() {
        return (node.right.take(), node);
    }
    if !is_red(node.as_left_ref()) && !is_red(left_left(&node)) {
        node = move_red_left(node);
    }

    let left = match node.left.take() {
        Some(left) => left,
        None => panic!("delete_min(): fatal logic, call the programmer"),
    };
    let (left, old_node) = delete_min(left);
    node.left = left;
    (Some(balance(node)), old_node)
}

/// Unlink the maximum entry under `node`. Returns the new subtree and
/// the detached node.
pub(crate) fn delete_max<K, V>(mut node: Box<Node<K, V>>) -> Delete<K, V> {
    if is_red(node.as_left_ref()) {
        node = rotate_right(node);
    }
    if node.right.is_none() {
        return (node.left.take(), node);
    }
    if !is_red(node.as_right_ref()) && !is_red(right_left(&node)) {
        node = move_red_right(node);
    }

    let right = match node.right.take() {
        Some(right) => right,
        None => panic!("delete_max(): fatal logic, call the programmer"),
    };
    let (right, old_node) = delete_max(right);
    node.right = right;
    (Some(balance(node)), old_node)
}

/// Unlink the entry for `key` under `node`. Key must be present.
pub(crate) fn remove<K, V, Q>(mut node: Box<Node<K, V>>, key: &Q) -> Delete<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    if key.lt(node.key.borrow()) {
        if !is_red(node.as_left_ref()) && !is_red(left_left(&node)) {
            node = move_red_left(node);
        }
        let left = match node.left.take() {
            Some(left) => left,
            None => panic!("remove(): missing key, call the programmer"),
        };
        let (left, old_node) = remove(left, key);
        node.left = left;
        return (Some(balance(node)), old_node);
    }

    if is_red(node.as_left_ref()) {
        node = rotate_right(node);
    }
    if key.eq(node.key.borrow()) && node.right.is_none() {
        return (node.left.take(), node);
    }
    if !is_red(node.as_right_ref()) && !is_red(right_left(&node)) {
        node = move_red_right(node);
    }

    let right = match node.right.take() {
        Some(right) => right,
        None => panic!("remove(): missing key, call the programmer"),
    };
    let (right, old_node) = if key.eq(node.key.borrow()) {
        // swap with in-order successor, successor's node carries the
        // removed entry out.
        let (right, mut succ) = delete_min(right);
        mem::swap(&mut node.key, &mut succ.key);
        mem::swap(&mut node.value, &mut succ.value);
        (right, succ)
    } else {
        remove(right, key)
    };
    node.right = right;
    (Some(balance(node)), old_node)
}

//--------- order statistics ----------------

/// Number of nodes on the longest path from `node` to a leaf.
pub(crate) fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    match node {
        Some(node) => {
            let (l, r) = (height(node.as_left_ref()), height(node.as_right_ref()));
            1 + cmp::max(l, r)
        }
        None => 0,
    }
}

/// Largest entry less than or equal to key.
pub(crate) fn floor<'a, K, V, Q>(node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = node?;
    match key.cmp(node.key.borrow()) {
        Ordering::Equal => Some(node),
        Ordering::Less => floor(node.as_left_ref(), key),
        Ordering::Greater => floor(node.as_right_ref(), key).or(Some(node)),
    }
}

/// Smallest entry greater than or equal to key.
pub(crate) fn ceiling<'a, K, V, Q>(
    node: Option<&'a Node<K, V>>,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = node?;
    match key.cmp(node.key.borrow()) {
        Ordering::Equal => Some(node),
        Ordering::Greater => ceiling(node.as_right_ref(), key),
        Ordering::Less => ceiling(node.as_left_ref(), key).or(Some(node)),
    }
}

/// Entry with exactly `k` smaller keys under `node`.
pub(crate) fn select<K, V>(mut node: Option<&Node<K, V>>, mut k: usize) -> Option<&Node<K, V>> {
    while let Some(nref) = node {
        let t = size(nref.as_left_ref());
        node = match t.cmp(&k) {
            Ordering::Greater => nref.as_left_ref(),
            Ordering::Less => {
                k -= t + 1;
                nref.as_right_ref()
            }
            Ordering::Equal => return Some(nref),
        };
    }
    None
}

/// Number of keys under `node` strictly less than key.
pub(crate) fn rank<K, V, Q>(mut node: Option<&Node<K, V>>, key: &Q) -> usize
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut rank = 0;
    while let Some(nref) = node {
        node = match key.cmp(nref.key.borrow()) {
            Ordering::Less => nref.as_left_ref(),
            Ordering::Greater => {
                rank += 1 + size(nref.as_left_ref());
                nref.as_right_ref()
            }
            Ordering::Equal => return rank + size(nref.as_left_ref()),
        };
    }
    rank
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
