//! Output sinks for the connector's JSON log lines.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Destination for pre-formatted log lines.
pub trait LogSink: Send + Sync {
    /// Write one line to the sink.
    fn write_line(&self, line: &str);
}

/// Sink over an arbitrary writer, serialized through a mutex so concurrent
/// connector events never interleave within a line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl WriterSink<Vec<u8>> {
    /// Everything written so far, lossily decoded.
    ///
    /// Buffer-backed sinks exist for asserting on emitted events; production
    /// wiring uses [`StderrLogSink`].
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush());
        if let Err(error) = outcome {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Sink writing to the process stderr stream.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        if let Err(error) = stderr.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}
