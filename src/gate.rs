//! Readiness check and payload projection for the combination step.

use crate::model::{DroppedFile, ImageRecord, Line};

/// One combiner input: the original file plus its now-mandatory line.
#[derive(Clone, Copy, Debug)]
pub struct CombineEntry<'a> {
    pub source: &'a DroppedFile,
    pub line: Line,
}

/// True iff at least one image is loaded and every image has a line. The
/// empty list is not ready: zero images never unlock the combiner.
pub fn is_ready(records: &[ImageRecord]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.line.is_some())
}

/// Projects the combiner payload, one entry per record in list order.
///
/// # Panics
///
/// Panics when [`is_ready`] is false. Calling this on an unready list is a
/// programming error in the caller, not a recoverable condition.
pub fn project(records: &[ImageRecord]) -> Vec<CombineEntry<'_>> {
    assert!(
        is_ready(records),
        "combiner payload projected before every image was annotated"
    );
    records
        .iter()
        .map(|r| CombineEntry {
            source: &r.source,
            line: r.line.expect("readiness guarantees a line"),
        })
        .collect()
}
