//! Report publishers
//!
//! A [`Publisher`] receives the rendered posts of one report. Two are
//! provided:
//!
//! - [`StdoutPublisher`]: prints each post cut to the post length limit
//! - [`FilePublisher`]: keeps the full text in `<reports_dir>/<kind>.txt`,
//!   replacing the previous report of the same kind
//!
//! A pair `(A, B)` of publishers publishes to both in order.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::format::truncate_post;
use crate::schedule::ReportKind;

/// Publishing errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// Writing a report file failed
    #[error("Failed to write {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to standard output failed
    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),
}

/// Destination for rendered reports
pub trait Publisher {
    /// Publish every post of one report
    fn publish(&mut self, kind: ReportKind, posts: &[String]) -> Result<(), PublishError>;
}

impl<A: Publisher, B: Publisher> Publisher for (A, B) {
    fn publish(&mut self, kind: ReportKind, posts: &[String]) -> Result<(), PublishError> {
        self.0.publish(kind, posts)?;
        self.1.publish(kind, posts)
    }
}

/// Prints posts to standard output
#[derive(Debug, Clone)]
pub struct StdoutPublisher {
    max_chars: usize,
}

impl StdoutPublisher {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Publisher for StdoutPublisher {
    fn publish(&mut self, _kind: ReportKind, posts: &[String]) -> Result<(), PublishError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for post in posts {
            writeln!(out, "{}", truncate_post(post, self.max_chars)).map_err(PublishError::Stdout)?;
        }
        out.flush().map_err(PublishError::Stdout)
    }
}

/// Writes each report kind to its own text file
#[derive(Debug, Clone)]
pub struct FilePublisher {
    dir: PathBuf,
}

impl FilePublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a report of `kind` is written to
    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.dir.join(format!("{}.txt", kind.name()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Publisher for FilePublisher {
    fn publish(&mut self, kind: ReportKind, posts: &[String]) -> Result<(), PublishError> {
        fs::create_dir_all(&self.dir).map_err(|source| PublishError::File {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(kind);
        let mut body = String::new();
        for post in posts {
            body.push_str(post);
            body.push('\n');
        }
        fs::write(&path, body).map_err(|source| PublishError::File {
            path: path.clone(),
            source,
        })?;
        info!("wrote {} post(s) to {}", posts.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Collects posts in memory
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(ReportKind, Vec<String>)>,
    }

    impl Publisher for Recorder {
        fn publish(&mut self, kind: ReportKind, posts: &[String]) -> Result<(), PublishError> {
            self.seen.push((kind, posts.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn file_publisher_replaces_previous_report() {
        let tmp = TempDir::new().unwrap();
        let mut publisher = FilePublisher::new(tmp.path().join("reports"));

        publisher
            .publish(ReportKind::Week, &["first".to_string(), "second".to_string()])
            .unwrap();
        let path = publisher.path_for(ReportKind::Week);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        publisher.publish(ReportKind::Week, &["third".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "third\n");
        assert!(path.ends_with("reports/week.txt"));
    }

    #[test]
    fn file_publisher_reports_unwritable_dir() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("reports");
        fs::write(&blocker, "not a directory").unwrap();

        let mut publisher = FilePublisher::new(&blocker);
        let err = publisher.publish(ReportKind::Day, &["x".to_string()]).unwrap_err();
        assert!(matches!(err, PublishError::File { .. }));
    }

    #[test]
    fn pair_publishes_to_both() {
        let mut pair = (Recorder::default(), Recorder::default());
        pair.publish(ReportKind::Current, &["now".to_string()]).unwrap();
        assert_eq!(pair.0.seen.len(), 1);
        assert_eq!(pair.1.seen[0].0, ReportKind::Current);
        assert_eq!(pair.1.seen[0].1, vec!["now".to_string()]);
    }
}
