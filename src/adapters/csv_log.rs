//! Append-only CSV training log.
//!
//! One line per sample, flushed per append so a crash between ticks loses
//! at most the in-flight line.  The file is opened in append mode and
//! never truncated or rotated; the offline trainer owns retention.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::app::ports::SampleLog;
use crate::datalog::TrainingSample;
use crate::error::{Error, LogFault};

pub struct CsvSampleLog {
    file: File,
}

impl CsvSampleLog {
    /// Open (or create) the log file for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|e| {
                log::error!(
                    "sample log open failed ({}): {}",
                    path.as_ref().display(),
                    e
                );
                Error::Init("sample log unopenable")
            })?;
        Ok(Self { file })
    }

    fn map_io(e: &io::Error) -> LogFault {
        match e.kind() {
            io::ErrorKind::StorageFull => LogFault::StorageFull,
            _ => LogFault::WriteFailed,
        }
    }
}

impl SampleLog for CsvSampleLog {
    fn append(&mut self, sample: &TrainingSample) -> Result<(), LogFault> {
        let line = sample.to_line();
        writeln!(self.file, "{line}").map_err(|e| Self::map_io(&e))?;
        self.file.flush().map_err(|e| Self::map_io(&e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Direction;

    fn sample(timestamp: u64) -> TrainingSample {
        TrainingSample {
            timestamp,
            a: 12.5,
            b: 80.0,
            angle: 91,
            direction: Direction::Left,
        }
    }

    #[test]
    fn appends_one_line_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let mut log = CsvSampleLog::open(&path).unwrap();
        log.append(&sample(1)).unwrap();
        log.append(&sample(2)).unwrap();
        drop(log);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines, vec!["1,12.5,80,91,1", "2,12.5,80,91,1"]);
    }

    #[test]
    fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        CsvSampleLog::open(&path).unwrap().append(&sample(1)).unwrap();
        CsvSampleLog::open(&path).unwrap().append(&sample(2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn written_lines_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let original = sample(1_700_000_000);
        CsvSampleLog::open(&path).unwrap().append(&original).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed = TrainingSample::parse_line(contents.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn open_fails_for_an_impossible_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("data.csv");
        assert!(CsvSampleLog::open(&path).is_err());
    }
}
