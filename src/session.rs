// Sampler session: owns the reader and every scratch buffer a sample needs.
// Also hosts the one-shot accessors, which run a single-use session.

use bytes::Bytes;
use tracing::instrument;

use crate::codec::Encoder;
use crate::error::SampleError;
use crate::models::{Record, build_into};
use crate::provider::Provider;
use crate::scanner::{DEFAULT_LINE_LIMIT, Scanner};

/// Line buffer starting capacity; /proc/meminfo is ~1.5 KiB.
const LINE_BUFFER_CAPACITY: usize = 2048;

/// Live state of one sampler. Buffers are cleared between samples, not reallocated.
/// Not shared: whoever holds the session is its only user.
pub struct Session<R, P> {
    provider: P,
    buf: Vec<u8>,
    record: R,
    encoder: Encoder<R>,
    line_limit: usize,
    faults: Vec<SampleError>,
}

impl<R: Record, P: Provider> Session<R, P> {
    pub fn new(provider: P) -> Self {
        Self::with_line_limit(provider, DEFAULT_LINE_LIMIT)
    }

    pub fn with_line_limit(provider: P, line_limit: usize) -> Self {
        Self {
            provider,
            buf: Vec::with_capacity(LINE_BUFFER_CAPACITY),
            record: R::default(),
            encoder: Encoder::new(),
            line_limit,
            faults: Vec::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Reads and parses one sample stamped with `timestamp`.
    ///
    /// Only a read failure is an error here; value faults and an exceeded line
    /// limit are collected for [`Session::drain_faults`].
    pub fn sample_at(&mut self, timestamp: i64) -> Result<&R, SampleError> {
        self.faults.clear();
        self.provider
            .read_current(&mut self.buf)
            .map_err(|error| SampleError::Io {
                kind: R::KIND,
                op: "read",
                target: self.provider.target().to_string(),
                error,
            })?;
        let scanner = Scanner::with_line_limit(&self.buf, self.line_limit);
        build_into(&mut self.record, scanner, timestamp, |e| self.faults.push(e));
        Ok(&self.record)
    }

    /// Samples with the timestamp taken before the read.
    pub fn sample(&mut self) -> Result<&R, SampleError> {
        let timestamp = now_nanos();
        self.sample_at(timestamp)
    }

    pub fn sample_encoded(&mut self) -> Result<Bytes, SampleError> {
        self.sample()?;
        self.encoder.encode(&self.record)
    }

    /// Non-fatal problems from the most recent sample.
    pub fn drain_faults(&mut self) -> std::vec::Drain<'_, SampleError> {
        self.faults.drain(..)
    }
}

/// Current UTC time as nanoseconds since the epoch; 0 outside the representable range.
pub fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_else(|| {
        tracing::warn!(operation = "get_timestamp", "system time out of range");
        0
    })
}

/// Takes a single sample. Read failures are returned; value faults are logged
/// and the affected fields are 0.
#[instrument(skip_all, fields(kind = R::KIND, target = provider.target(), operation = "get_current"))]
pub fn get_current<R: Record, P: Provider>(provider: P) -> Result<R, SampleError> {
    let mut session = Session::<R, P>::new(provider);
    let record = session.sample()?.clone();
    log_faults(&mut session);
    Ok(record)
}

/// [`get_current`], encoded as a frame.
#[instrument(skip_all, fields(kind = R::KIND, target = provider.target(), operation = "get_current_encoded"))]
pub fn get_current_encoded<R: Record, P: Provider>(provider: P) -> Result<Bytes, SampleError> {
    let mut session = Session::<R, P>::new(provider);
    let bytes = session.sample_encoded()?;
    log_faults(&mut session);
    Ok(bytes)
}

fn log_faults<R: Record, P: Provider>(session: &mut Session<R, P>) {
    for fault in session.drain_faults() {
        tracing::warn!(error = %fault, "sample fault");
    }
}
