//! Turns raw dropped files into annotatable records.

use std::collections::BTreeMap;

use crate::model::{DisplayBlob, DroppedFile, ImageRecord, Line};

/// Builds one record per accepted file, preserving drop order. Files whose
/// declared media type is not `image/*` are silently discarded: dropping a
/// text file is a no-op, not an error. Names are not deduplicated, so two
/// files sharing a name share one persisted line.
pub fn intake(
    candidates: Vec<DroppedFile>,
    persisted: &BTreeMap<String, Line>,
) -> Vec<ImageRecord> {
    candidates
        .into_iter()
        .filter(DroppedFile::is_image)
        .map(|file| {
            let display = DisplayBlob::allocate(&file.bytes);
            let line = persisted.get(&file.name).copied();
            let file_name = file.name.clone();
            ImageRecord {
                source: file,
                file_name,
                display,
                line,
            }
        })
        .collect()
}
