//! Reductions over reconstructed operations.
//!
//! Both reports borrow the operations and never reorder or modify them.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::capture::{AggregateRecord, Operation};

/// Number of operations listed by the size report unless configured otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Keep the operations on `collection`, or all of them when `None`.
///
/// Collection names are compared exactly.
pub fn filter_by_collection<'a>(
    ops: &'a [Operation],
    collection: Option<&str>,
) -> Vec<&'a Operation> {
    ops.iter()
        .filter(|op| collection.map_or(true, |name| op.collection == name))
        .collect()
}

/// The `limit` operations with the largest responses, largest first.
///
/// Operations with equal response sizes keep their original order.
pub fn top_by_size_out<'a, I>(ops: I, limit: usize) -> Vec<&'a Operation>
where
    I: IntoIterator<Item = &'a Operation>,
{
    let mut sorted: Vec<&Operation> = ops.into_iter().collect();
    sorted.sort_by_key(|op| Reverse(op.size_out));
    sorted.truncate(limit);
    sorted
}

/// Per-collection totals, largest outbound traffic first.
///
/// Collections with equal totals are listed in the order they first appear.
pub fn aggregate_by_collection<'a, I>(ops: I) -> Vec<AggregateRecord>
where
    I: IntoIterator<Item = &'a Operation>,
{
    let mut records: Vec<AggregateRecord> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for op in ops {
        let slot = *index.entry(op.collection.as_str()).or_insert_with(|| {
            records.push(AggregateRecord::new(op.collection.as_str()));
            records.len() - 1
        });
        records[slot].add(op);
    }

    records.sort_by_key(|record| Reverse(record.total_size_out));
    records
}
