use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use super::{RegistryError, RegistryResult};

/// Install a global subscriber that appends structured JSON events to the
/// run's `logs.ndjson` file. Called once per process, right after the run
/// directory exists.
pub fn init_run_logging(path: &Path) -> RegistryResult<()> {
    let writer = LogFileWriter::open(path)?;

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(BoxMakeWriter::new(move || writer.clone()));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|err| RegistryError::Logging(err.to_string()))?;

    Ok(())
}

/// Append-only handle to the run log, cloneable so every layer invocation
/// writes through the same file descriptor.
#[derive(Clone)]
struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl LogFileWriter {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }

    fn locked(&self) -> io::Result<MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))
    }
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.locked()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.locked()?.flush()
    }
}
