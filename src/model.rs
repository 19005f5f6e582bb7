use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ── Geometry ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An ordered pair of endpoints in image-pixel space. Direction matters
/// (start → end); equal endpoints are representable and never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

// ── Files and records ───────────────────────────────────────────────────────

/// A raw file as handed over by the host's drop facility: filename,
/// declared media type, and the file bytes.
#[derive(Clone, Debug)]
pub struct DroppedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DroppedFile {
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

static NEXT_BLOB_ID: AtomicU64 = AtomicU64::new(0);

/// In-memory stand-in for an object URL: a shared copy of the file bytes
/// under a process-unique id. Clones share the buffer, so the clone is the
/// dereferenceable handle and dropping the last clone releases it.
#[derive(Clone, Debug)]
pub struct DisplayBlob {
    id: u64,
    bytes: Arc<[u8]>,
}

impl DisplayBlob {
    pub(crate) fn allocate(bytes: &[u8]) -> Self {
        Self {
            id: NEXT_BLOB_ID.fetch_add(1, Ordering::Relaxed),
            bytes: Arc::from(bytes),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The per-image unit of state. `line` is present iff annotation is
/// complete; once set it is only ever overwritten, never cleared. Records
/// are never removed, so `display` lives for the whole session.
#[derive(Clone, Debug)]
pub struct ImageRecord {
    pub source: DroppedFile,
    pub file_name: String,
    pub display: DisplayBlob,
    pub line: Option<Line>,
}
