use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use super::HistoryError;

/// Backing file for the history list, one line per record.
#[derive(Debug, Clone)]
pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load_entries(&self) -> Result<Vec<String>, HistoryError> {
        let mut entries = Vec::new();

        if self.file_path.exists() {
            let file = File::open(&self.file_path).map_err(|e| self.io_error(e))?;
            let reader = BufReader::new(file);

            for line in reader.lines() {
                let line = line.map_err(|e| self.io_error(e))?;
                if !line.trim().is_empty() {
                    entries.push(line);
                }
            }
        }

        Ok(entries)
    }

    /// Rewrites the file with `entries`, keeping at most the newest `max`.
    pub fn persist<'a>(
        &self,
        entries: impl ExactSizeIterator<Item = &'a str>,
        max: usize,
    ) -> Result<(), HistoryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let skip = entries.len().saturating_sub(max);
        let file = File::create(&self.file_path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        for entry in entries.skip(skip) {
            writeln!(writer, "{}", entry).map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.file_path.clone(),
            source,
        }
    }
}
