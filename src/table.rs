//! Module provide ordered symbol table implemented by [Table] type.
//!
//! Table is implemented using [left-leaning-red-black][wiki-llrb].
//!
//! - Each entry in Table instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - Order statistics over subtree sizes kept in every node.
//! - Range scan, to iterate between a ``low`` and ``high``.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Full table scan:
//! ```
//! use symtab::Table;
//!
//! let mut index: Table<String, String> = Table::new();
//! index.set("key1".to_string(), "value1".to_string());
//! index.set("key2".to_string(), "value2".to_string());
//!
//! for (i, (key, value)) in index.iter().enumerate() {
//!     let refkey = format!("key{}", i+1);
//!     let refval = format!("value{}", i+1);
//!     assert_eq!(&refkey, key);
//!     assert_eq!(&refval, value);
//! }
//! ```
//!
//! Range scan:
//! ```
//! use std::ops::Bound;
//! use symtab::Table;
//!
//! let mut index: Table<String, String> = Table::new();
//!
//! index.set("key1".to_string(), "value1".to_string());
//! index.set("key2".to_string(), "value2".to_string());
//! index.set("key3".to_string(), "value3".to_string());
//!
//! let low = Bound::Excluded("key1");
//! let high = Bound::Excluded("key2");
//! let item = index.range::<str, _>((low, high)).next();
//! assert_eq!(item, None);
//!
//! let low = Bound::Excluded("key1");
//! let high = Bound::Excluded("key3");
//! let item = index.range::<str, _>((low, high)).next();
//! assert_eq!(item, Some((&"key2".to_string(), &"value2".to_string())));
//!
//! let mut ranger = index.keys_in_range("key1", "key3");
//! let item = ranger.next();
//! assert_eq!(item, Some((&"key1".to_string(), &"value1".to_string())));
//! let item = ranger.last();
//! assert_eq!(item, Some((&"key3".to_string(), &"value3".to_string())));
//! ```
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use log::{debug, error};

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    iter::FromIterator,
    marker,
    ops::{Bound, RangeBounds},
};

use crate::{
    check,
    node::{self, Node},
    Error, Result,
};

/// Table manage a single instance of in-memory ordered symbol table
/// using [left-leaning-red-black][llrb] tree.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
pub struct Table<K, V> {
    root: Option<Box<Node<K, V>>>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Table { root: None }
    }
}

impl<K, V> Table<K, V> {
    /// Create an empty instance of Table.
    pub fn new() -> Table<K, V> {
        Table::default()
    }
}

impl<K, V> Extend<(K, V)> for Table<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter().for_each(|(key, value)| {
            self.set(key, value);
        });
    }
}

impl<K, V> FromIterator<(K, V)> for Table<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

/// Maintenance API.
impl<K, V> Table<K, V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        node::size(self.root.as_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of nodes on the longest path from root to a
    /// leaf, zero for an empty table.
    pub fn height(&self) -> usize {
        node::height(self.root.as_deref())
    }

    /// Release all entries in this instance.
    pub fn clear(&mut self) {
        let n = self.len();
        self.root.take();
        debug!("table cleared, released {} entries", n);
    }
}

/// Write API.
impl<K, V> Table<K, V>
where
    K: Ord,
{
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.prime_root();
        let (root, old_value) = node::put(self.root.take(), key, value);
        self.root = Some(root);
        self.fix_root();
        old_value
    }

    /// Same as [Table::set] when value is present, and same as
    /// [Table::remove] when value is None.
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(&key),
        }
    }

    /// Remove key from this instance and return its value. If key is
    /// not present, then remove is effectively a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            return None;
        }

        self.prime_root();
        let old_node = match self.root.take() {
            Some(root) => {
                let (root, old_node) = node::remove(root, key);
                self.root = root;
                old_node
            }
            None => return None,
        };
        self.fix_root();
        Some(old_node.into_entry().1)
    }

    /// Remove the entry with smallest key and return it.
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        self.prime_root();
        let old_node = match self.root.take() {
            Some(root) => {
                let (root, old_node) = node::delete_min(root);
                self.root = root;
                old_node
            }
            None => return err_at!(Underflow, msg: "delete_min() on empty table"),
        };
        self.fix_root();
        Ok(old_node.into_entry())
    }

    /// Remove the entry with largest key and return it.
    pub fn delete_max(&mut self) -> Result<(K, V)> {
        self.prime_root();
        let old_node = match self.root.take() {
            Some(root) => {
                let (root, old_node) = node::delete_max(root);
                self.root = root;
                old_node
            }
            None => return err_at!(Underflow, msg: "delete_max() on empty table"),
        };
        self.fix_root();
        Ok(old_node.into_entry())
    }

    // if both children of root are black, set root to red, so that
    // fix-ups walking up can borrow from it.
    fn prime_root(&mut self) {
        if let Some(root) = self.root.as_mut() {
            if !node::is_red(root.as_left_ref()) && !node::is_red(root.as_right_ref()) {
                root.set_red();
            }
        }
    }

    fn fix_root(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.set_black();
        }

        #[cfg(feature = "check")]
        assert!(self.self_check(), "self check failed after mutation");
    }
}

/// Read API.
impl<K, V> Table<K, V> {
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::get(self.root.as_deref(), key).map(|node| &node.value)
    }

    /// Get a mutable reference to the value for key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::get_mut(self.root.as_deref_mut(), key).map(|node| &mut node.value)
    }

    /// Check whether key is present in this instance.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::get(self.root.as_deref(), key).is_some()
    }

    /// Return the entry with smallest key.
    pub fn min(&self) -> Result<(&K, &V)> {
        match self.root.as_deref() {
            Some(root) => Ok(as_entry(node::min(root))),
            None => err_at!(Underflow, msg: "min() on empty table"),
        }
    }

    /// Return the entry with largest key.
    pub fn max(&self) -> Result<(&K, &V)> {
        match self.root.as_deref() {
            Some(root) => Ok(as_entry(node::max(root))),
            None => err_at!(Underflow, msg: "max() on empty table"),
        }
    }

    /// Return the entry with largest key less than or equal to `key`.
    /// Return None if every key in this instance is larger.
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<(&K, &V)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.root.as_deref() {
            Some(root) => Ok(node::floor(Some(root), key).map(as_entry)),
            None => err_at!(Underflow, msg: "floor() on empty table"),
        }
    }

    /// Return the entry with smallest key greater than or equal to `key`.
    /// Return None if every key in this instance is smaller.
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<(&K, &V)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.root.as_deref() {
            Some(root) => Ok(node::ceiling(Some(root), key).map(as_entry)),
            None => err_at!(Underflow, msg: "ceiling() on empty table"),
        }
    }

    /// Return the key with exactly `k` smaller keys in this instance.
    pub fn select(&self, k: usize) -> Result<&K> {
        let n = self.len();
        match node::select(self.root.as_deref(), k) {
            Some(node) if k < n => Ok(&node.key),
            _ => err_at!(InvalidArgument, msg: "select({}) out of range 0..{}", k, n),
        }
    }

    /// Return the number of keys in this instance strictly less than `key`.
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::rank(self.root.as_deref(), key)
    }

    /// Return the number of keys between `low` and `high`, both inclusive.
    pub fn range_size<Q>(&self, low: &Q, high: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if low.gt(high) {
            return 0;
        }
        let n = self.rank(high) - self.rank(low);
        if self.contains_key(high) {
            n + 1
        } else {
            n
        }
    }

    /// Return an iterator over all entries in this instance.
    pub fn iter(&self) -> Iter<K, V> {
        let node = self.root.as_deref();

        let mut paths = Vec::default();
        build_iter(IFlag::Left, node, &mut paths);

        Iter { paths }
    }

    /// Return an iterator over all keys in this instance.
    pub fn keys(&self) -> Keys<K, V> {
        Keys { iter: self.iter() }
    }

    /// Range over all entries from low to high, specified by `range`.
    pub fn range<Q, R>(&self, range: R) -> Range<K, V, R, Q>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.root.as_deref();

        let mut paths = Vec::default();
        match range.start_bound() {
            Bound::Unbounded => build_iter(IFlag::Left, root, &mut paths),
            Bound::Included(low) => find_start(root, low, true, &mut paths),
            Bound::Excluded(low) => find_start(root, low, false, &mut paths),
        };
        let iter = Iter { paths };

        Range {
            range,
            iter,
            fin: false,
            high: marker::PhantomData,
        }
    }

    /// Range over all entries with `low <= key <= high`.
    pub fn keys_in_range<'a, 'b, Q>(
        &'a self,
        low: &'b Q,
        high: &'b Q,
    ) -> Range<'a, K, V, (Bound<&'b Q>, Bound<&'b Q>), Q>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.range((Bound::Included(low), Bound::Included(high)))
    }
}

/// Validation API.
impl<K, V> Table<K, V>
where
    K: Ord,
{
    /// Validate LLRB tree with following rules:
    ///
    /// * Keys are in strict sorted order.
    /// * Size of every node is one more than the size of its children.
    /// * rank() and select() agree with each other.
    /// * No red right links, no two consecutive red left links.
    /// * Every path from root to leaf has the same number of black links.
    ///
    /// Return the first rule found broken.
    pub fn validate(&self) -> Result<()> {
        let root = self.root.as_deref();

        let mut errs = vec![];
        if !check::is_bst(root, None, None) {
            errs.push("not in symmetric order");
        }
        if !check::is_size_consistent(root) {
            errs.push("subtree counts not consistent");
        }
        if !check::is_rank_consistent(root) {
            errs.push("ranks not consistent");
        }
        if !check::is_23(root) {
            errs.push("not a 2-3 tree");
        }
        if !check::is_balanced(root) {
            errs.push("not balanced");
        }

        for msg in errs.iter() {
            error!("validate: {}", msg);
        }
        match errs.first() {
            Some(msg) => err_at!(InvariantViolation, msg: "{}", msg),
            None => Ok(()),
        }
    }

    /// Same as [Table::validate], as a boolean.
    pub fn self_check(&self) -> bool {
        self.validate().is_ok()
    }
}

#[inline]
fn as_entry<K, V>(node: &Node<K, V>) -> (&K, &V) {
    (&node.key, &node.value)
}

/// Iterator over entries in ascending key order.
pub struct Iter<'a, K, V> {
    paths: Vec<Fragment<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    break Some(as_entry(path.node));
                }
                IFlag::Center => {
                    path.flag = IFlag::Right;
                    let right = path.node.as_right_ref();
                    build_iter(IFlag::Left, right, &mut self.paths)
                }
                IFlag::Right => {
                    self.paths.pop();
                }
            }
        }
    }
}

/// Iterator over keys in ascending order.
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, _)| key)
    }
}

/// Iterator over entries within a range, in ascending key order. Starts
/// at the lower bound and stops at the first key beyond the upper bound,
/// so a scan over `k` matches costs `O(log n + k)`.
pub struct Range<'a, K, V, R, Q>
where
    Q: ?Sized,
{
    range: R,
    iter: Iter<'a, K, V>,
    fin: bool,
    high: marker::PhantomData<Q>,
}

impl<'a, K, V, R, Q> Iterator for Range<'a, K, V, R, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.fin {
            return None;
        }

        let (key, value) = self.iter.next()?;
        let k: &Q = key.borrow();
        let ok = match self.range.end_bound() {
            Bound::Included(high) => k.le(high),
            Bound::Excluded(high) => k.lt(high),
            Bound::Unbounded => true,
        };
        if ok {
            Some((key, value))
        } else {
            self.fin = true;
            None
        }
    }
}

#[derive(Copy, Clone)]
enum IFlag {
    Left,
    Center,
    Right,
}

struct Fragment<'a, K, V> {
    flag: IFlag,
    node: &'a Node<K, V>,
}

fn build_iter<'a, K, V>(
    flag: IFlag,
    node: Option<&'a Node<K, V>>,
    paths: &mut Vec<Fragment<'a, K, V>>,
) {
    let mut node = node;
    while let Some(nref) = node {
        paths.push(Fragment { flag, node: nref });
        node = match flag {
            IFlag::Left => nref.as_left_ref(),
            IFlag::Right => nref.as_right_ref(),
            IFlag::Center => unreachable!(),
        };
    }
}

// Descend towards `low`, pruning every subtree that lies entirely below
// it. Nodes below `low` are pushed as already visited.
fn find_start<'a, K, V, Q>(
    node: Option<&'a Node<K, V>>,
    low: &Q,
    incl: bool,
    paths: &mut Vec<Fragment<'a, K, V>>,
) where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = node;
    while let Some(nref) = node {
        let cmp = nref.key.borrow().cmp(low);

        let flag = match cmp {
            Ordering::Less => IFlag::Right,
            Ordering::Equal if incl => IFlag::Left,
            Ordering::Equal => IFlag::Center,
            Ordering::Greater => IFlag::Left,
        };
        paths.push(Fragment { flag, node: nref });

        node = match cmp {
            Ordering::Equal => None,
            Ordering::Less => nref.as_right_ref(),
            Ordering::Greater => nref.as_left_ref(),
        };
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
