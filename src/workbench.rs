//! The central state machine: record list, selection pointer, persistence
//! hookup, and change notification.

use std::collections::BTreeMap;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use thiserror::Error;

use crate::gate;
use crate::intake::intake;
use crate::model::{DisplayBlob, DroppedFile, ImageRecord, Line};
use crate::storage::LineStore;

/// A `select` or `complete_annotation` call referenced an index outside the
/// record list. This is a UI/state desync, not a user mistake, so it is
/// reported loudly instead of being patched over.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("image index {index} out of range ({len} images loaded)")]
pub struct SelectionError {
    pub index: usize,
    pub len: usize,
}

/// What the editor collaborator needs to open a session: the renderable
/// handle and the existing line, if any, as a seed.
#[derive(Clone, Debug)]
pub struct EditorInput {
    pub display: DisplayBlob,
    pub initial_line: Option<Line>,
}

/// Point-in-time view of the whole board, cheap enough to hand to any
/// rendering layer after every change.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub images: Vec<ImageStatus>,
    pub selected: Option<usize>,
    pub ready: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageStatus {
    pub file_name: String,
    pub annotated: bool,
}

/// Owns the authoritative record list and the selection pointer. All
/// mutations go through `&mut self`, one event at a time; persistence writes
/// happen synchronously inside the mutating call so storage never lags the
/// in-memory state.
pub struct Workbench {
    records: Vec<ImageRecord>,
    selected: Option<usize>,
    store: LineStore,
    persisted: BTreeMap<String, Line>,
    subscribers: Vec<Sender<Snapshot>>,
}

impl Workbench {
    /// Opens the board over a store, bulk-loading previously persisted lines
    /// once. Later drops of a known filename pick their line up from here.
    pub fn new(store: LineStore) -> Self {
        let persisted = store.load_all();
        Self {
            records: Vec::new(),
            selected: None,
            store,
            persisted,
            subscribers: Vec::new(),
        }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Runs intake over freshly dropped files and appends the results.
    pub fn drop_files(&mut self, candidates: Vec<DroppedFile>) {
        let records = intake(candidates, &self.persisted);
        self.add_images(records);
    }

    /// Appends records in order. The very first non-empty batch selects its
    /// first record so the editor never opens on nothing; later batches do
    /// not steal focus from whatever is being annotated. An empty batch
    /// changes nothing and notifies nobody.
    pub fn add_images(&mut self, new_records: Vec<ImageRecord>) {
        if new_records.is_empty() {
            return;
        }
        let first_new = self.records.len();
        self.records.extend(new_records);
        if self.selected.is_none() {
            self.selected = Some(first_new);
        }
        debug!("{} images loaded", self.records.len());
        self.notify();
    }

    pub fn select(&mut self, index: usize) -> Result<(), SelectionError> {
        self.check_index(index)?;
        self.selected = Some(index);
        self.notify();
        Ok(())
    }

    /// Records a finished editor session: writes the line onto the record
    /// (overwriting any earlier one, never clearing), persists it within the
    /// same turn, and notifies subscribers so the gate gets re-evaluated.
    pub fn complete_annotation(&mut self, index: usize, line: Line) -> Result<(), SelectionError> {
        self.check_index(index)?;
        self.records[index].line = Some(line);
        self.store.save_one(&self.records[index].file_name, line);
        debug!("annotated {}", self.records[index].file_name);
        self.notify();
        Ok(())
    }

    /// Editor boundary: handle and seed line for the selected record, or
    /// `None` while nothing is selected.
    pub fn editor_input(&self) -> Option<EditorInput> {
        let record = &self.records[self.selected?];
        Some(EditorInput {
            display: record.display.clone(),
            initial_line: record.line,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            images: self
                .records
                .iter()
                .map(|r| ImageStatus {
                    file_name: r.file_name.clone(),
                    annotated: r.line.is_some(),
                })
                .collect(),
            selected: self.selected,
            ready: gate::is_ready(&self.records),
        }
    }

    /// Registers a change listener. Every mutation sends one fresh snapshot;
    /// listeners that went away are pruned on the next send.
    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn check_index(&self, index: usize) -> Result<(), SelectionError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(SelectionError {
                index,
                len: self.records.len(),
            })
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}
