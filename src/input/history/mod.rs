mod file_ops;

use std::{collections::VecDeque, path::PathBuf};

use thiserror::Error;
use tracing::debug;

pub use self::file_ops::FileOps;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub index: usize,
    pub line: String,
}

/// Bounded list of accepted lines, indexed from 0 without gaps.
///
/// When full, the oldest entry is dropped and the rest are renumbered.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    store: Option<FileOps>,
    max_entries: usize,
}

impl History {
    pub fn new(history_file: PathBuf, max_entries: usize) -> Result<Self, HistoryError> {
        let store = FileOps::new(history_file);
        let mut history = Self::in_memory(max_entries);
        for line in store.load_entries()? {
            history.add(&line);
        }
        debug!(
            path = %store.path().display(),
            entries = history.len(),
            "history loaded"
        );
        history.store = Some(store);
        Ok(history)
    }

    pub fn in_memory(max_entries: usize) -> Self {
        History {
            entries: VecDeque::new(),
            store: None,
            max_entries,
        }
    }

    pub fn add(&mut self, entry: &str) {
        if entry.trim().is_empty() || self.max_entries == 0 {
            return;
        }

        self.entries.push_back(HistoryEntry {
            index: self.entries.len(),
            line: entry.to_owned(),
        });
        self.trim_entries();
    }

    fn trim_entries(&mut self) {
        let mut dropped = false;
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
            dropped = true;
        }
        if dropped {
            self.renumber();
        }
    }

    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.index = index;
        }
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get_recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the list to the backing file, if there is one.
    pub fn persist(&self) -> Result<(), HistoryError> {
        match &self.store {
            Some(store) => {
                store.persist(
                    self.entries.iter().map(|e| e.line.as_str()),
                    self.max_entries,
                )?;
                debug!(path = %store.path().display(), entries = self.len(), "history persisted");
                Ok(())
            }
            None => Ok(()),
        }
    }
}
