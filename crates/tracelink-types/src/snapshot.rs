// Snapshot pair captured around one pipeline stage
//
// The capture collaborator produces one TraceInfo per stage: the values
// observed entering the stage and the values observed leaving it, both
// ordered by logical capture time. The engine reads it, never writes it.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use serde::{Deserialize, Serialize};
use tracelink_error::{SnapshotError, SnapshotResult};

use crate::element::TraceElement;

/// Correspondence recorded verbatim by the capture mechanism, for stages
/// whose mapping is established during capture rather than inferred.
///
/// Elements are referenced by their capture time, which uniquely
/// identifies them within a snapshot side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTrace {
    /// before time to the after times it produced
    pub direct: BTreeMap<i64, Vec<i64>>,
    /// after time to the before times that contributed to it
    pub reverse: BTreeMap<i64, Vec<i64>>,
}

/// The before/after snapshot pair captured around one pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceInfo {
    before: BTreeMap<i64, TraceElement>,
    after: BTreeMap<i64, TraceElement>,
    recorded: Option<RecordedTrace>,
}

impl TraceInfo {
    /// Build a snapshot pair from the captured element sequences.
    ///
    /// Fails if two elements of the same side share a capture time.
    pub fn new(
        before: impl IntoIterator<Item = TraceElement>,
        after: impl IntoIterator<Item = TraceElement>,
    ) -> SnapshotResult<Self> {
        Ok(TraceInfo {
            before: index_side(before, "before")?,
            after: index_side(after, "after")?,
            recorded: None,
        })
    }

    /// Build a snapshot pair that also carries a capture-recorded trace.
    pub fn with_recorded(
        before: impl IntoIterator<Item = TraceElement>,
        after: impl IntoIterator<Item = TraceElement>,
        recorded: RecordedTrace,
    ) -> SnapshotResult<Self> {
        let mut info = Self::new(before, after)?;
        info.recorded = Some(recorded);
        Ok(info)
    }

    /// Elements observed before the stage, in ascending capture time.
    pub fn before(&self) -> impl Iterator<Item = &TraceElement> + '_ {
        self.before.values()
    }

    /// Elements observed after the stage, in ascending capture time.
    pub fn after(&self) -> impl Iterator<Item = &TraceElement> + '_ {
        self.after.values()
    }

    /// Number of elements on the before side.
    pub fn before_len(&self) -> usize {
        self.before.len()
    }

    /// Number of elements on the after side.
    pub fn after_len(&self) -> usize {
        self.after.len()
    }

    /// True when both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// The before element captured at exactly `time`.
    pub fn before_at(&self, time: i64) -> Option<&TraceElement> {
        self.before.get(&time)
    }

    /// The after element captured at exactly `time`.
    pub fn after_at(&self, time: i64) -> Option<&TraceElement> {
        self.after.get(&time)
    }

    /// The latest before element captured at or before `time`.
    pub fn before_at_or_earlier(&self, time: i64) -> Option<&TraceElement> {
        self.before.range(..=time).next_back().map(|(_, e)| e)
    }

    /// The latest after element captured strictly before `time`.
    pub fn after_strictly_earlier(&self, time: i64) -> Option<&TraceElement> {
        self.after.range(..time).next_back().map(|(_, e)| e)
    }

    /// The earliest after element captured strictly after `time`.
    pub fn after_strictly_later(&self, time: i64) -> Option<&TraceElement> {
        self.after.range((Excluded(time), Unbounded)).next().map(|(_, e)| e)
    }

    /// After elements captured strictly after `time`, in ascending order.
    pub fn after_later_than(&self, time: i64) -> impl Iterator<Item = &TraceElement> + '_ {
        self.after.range((Excluded(time), Unbounded)).map(|(_, e)| e)
    }

    /// The first element observed entering the stage.
    pub fn first_before(&self) -> Option<&TraceElement> {
        self.before.values().next()
    }

    /// The capture-recorded trace, if the capture mechanism produced one.
    pub fn recorded(&self) -> Option<&RecordedTrace> {
        self.recorded.as_ref()
    }
}

fn index_side(
    elements: impl IntoIterator<Item = TraceElement>,
    side: &'static str,
) -> SnapshotResult<BTreeMap<i64, TraceElement>> {
    let mut indexed = BTreeMap::new();
    for element in elements {
        let time = element.time;
        if indexed.insert(time, element).is_some() {
            return Err(SnapshotError::DuplicateTime { side, time });
        }
    }
    Ok(indexed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::CapturedValue;

    fn prim(render: &str, time: i64) -> TraceElement {
        TraceElement::new(CapturedValue::primitive(render), time)
    }

    #[test]
    fn sides_iterate_in_time_order() {
        let info = TraceInfo::new(
            vec![prim("c", 30), prim("a", 10), prim("b", 20)],
            vec![prim("z", 25), prim("y", 15)],
        )
        .unwrap();

        let before: Vec<i64> = info.before().map(|e| e.time).collect();
        assert_eq!(before, vec![10, 20, 30]);
        let after: Vec<i64> = info.after().map(|e| e.time).collect();
        assert_eq!(after, vec![15, 25]);
    }

    #[test]
    fn duplicate_time_is_rejected() {
        let err = TraceInfo::new(vec![prim("a", 1), prim("b", 1)], vec![]).unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateTime { side: "before", time: 1 });
    }

    #[test]
    fn time_neighborhood_lookups() {
        let info = TraceInfo::new(
            vec![prim("a", 10), prim("b", 20)],
            vec![prim("x", 5), prim("y", 15), prim("z", 25)],
        )
        .unwrap();

        assert_eq!(info.before_at_or_earlier(20).map(|e| e.time), Some(20));
        assert_eq!(info.before_at_or_earlier(19).map(|e| e.time), Some(10));
        assert_eq!(info.before_at_or_earlier(9), None);

        assert_eq!(info.after_strictly_earlier(15).map(|e| e.time), Some(5));
        assert_eq!(info.after_strictly_later(15).map(|e| e.time), Some(25));
        assert_eq!(info.after_strictly_later(25), None);

        let later: Vec<i64> = info.after_later_than(5).map(|e| e.time).collect();
        assert_eq!(later, vec![15, 25]);
    }

    #[test]
    fn empty_means_both_sides() {
        let empty = TraceInfo::new(vec![], vec![]).unwrap();
        assert!(empty.is_empty());

        let one_sided = TraceInfo::new(vec![prim("a", 1)], vec![]).unwrap();
        assert!(!one_sided.is_empty());
    }
}
