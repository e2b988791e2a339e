//! Package implement an ordered symbol table.
//!
//! [Table] maps a totally ordered key to an owned value, using a
//! [left-leaning-red-black][wiki-llrb] tree. Left leaning red links
//! encode a 2-3 tree inside a binary tree, so that search, insert,
//! delete and order-statistic operations are all logarithmic.
//!
//! - Each entry in Table instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - CRUD operations, via set(), put(), get(), remove() api.
//! - Ordered operations, min(), max(), floor(), ceiling().
//! - Order statistics, rank(), select(), range_size().
//! - Full table scan, to iterate over all entries.
//! - Range scan, to iterate between a ``low`` and ``high``.
//! - Self check, to validate the tree against its structural invariants.
//! - Uses ownership model and borrow semantics to ensure safety.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [Table] instance and CRUD operations:
//!
//! ```
//! use symtab::Table;
//!
//! let mut index: Table<i32, String> = Table::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! index.set(1, "A".to_string());
//! index.set(2, "B".to_string());
//! assert_eq!(index.len(), 2);
//!
//! assert_eq!(index.get(&1), Some(&"A".to_string()));
//! assert_eq!(index.set(2, "C".to_string()), Some("B".to_string()));
//!
//! let old_value = index.remove(&1).unwrap();
//! assert_eq!(old_value, "A".to_string());
//! assert!(index.self_check());
//! ```
//!
//! Order statistics:
//!
//! ```
//! use symtab::Table;
//!
//! let index: Table<i32, i32> = (1..=10).map(|i| (i, i * 10)).collect();
//!
//! assert_eq!(index.rank(&4), 3);
//! assert_eq!(index.select(3).unwrap(), &4);
//! assert_eq!(index.range_size(&3, &7), 5);
//!
//! let keys: Vec<i32> = index.keys_in_range(&5, &5).map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![5]);
//! ```
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(Underflow, msg: "empty table, len:{}", 0);
// ```
//
// ```ignore
// use crate::Error;
// err_at!(InvalidArgument, some_result);
// ```
//
// ```ignore
// use crate::Error;
// err_at!(InvalidArgument, some_result, "select failed at {}", index);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod check;
mod node;
mod table;

pub use table::{Iter, Keys, Range, Table};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Argument is outside the domain of the operation, like an
    /// out-of-range index to select().
    InvalidArgument(String, String),
    /// Extremal or destructive query on an empty table.
    Underflow(String, String),
    /// Tree has broken one of its structural invariants. This is a bug
    /// in the rebalancing logic, not a usage error.
    InvariantViolation(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidArgument(p, msg) => write!(f, "{} InvalidArgument: {}", p, msg),
            Underflow(p, msg) => write!(f, "{} Underflow: {}", p, msg),
            InvariantViolation(p, msg) => write!(f, "{} InvariantViolation: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
