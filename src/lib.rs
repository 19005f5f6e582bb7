//! Annotation-state coordinator for a reference-line drawing workflow.
//!
//! A batch of dropped images becomes an append-only list of records; each
//! record carries at most one reference line. Lines persist across sessions
//! keyed by filename, and a combination step unlocks only once every loaded
//! image has its line. Drawing the line and combining the images are the
//! host's concern; this crate owns the state in between.

pub mod gate;
pub mod intake;
pub mod model;
pub mod storage;
pub mod workbench;

pub use gate::{is_ready, project, CombineEntry};
pub use intake::intake;
pub use model::{DisplayBlob, DroppedFile, ImageRecord, Line, Point};
pub use storage::LineStore;
pub use workbench::{EditorInput, ImageStatus, SelectionError, Snapshot, Workbench};
