// Shared test helpers: in-memory providers and sample source text.
#![allow(dead_code)]

use procsnap::provider::Provider;
use std::io;

/// Trimmed /proc/meminfo from a 16 GiB host.
pub const MEMINFO_SAMPLE: &str = "MemTotal:       16384000 kB
MemFree:          512000 kB
MemAvailable:    9000000 kB
Buffers:          300000 kB
Cached:          2048000 kB
SwapCached:         1024 kB
Active:          6000000 kB
Inactive:        4000000 kB
Active(anon):    3000000 kB
Inactive(anon):   500000 kB
Unevictable:           0 kB
Mlocked:               0 kB
SwapTotal:       8388604 kB
SwapFree:        8000000 kB
Dirty:               120 kB
HugePages_Total:       0
Hugepagesize:       2048 kB
";

/// Returns the same content on every read.
pub struct StaticProvider {
    content: Vec<u8>,
}

impl StaticProvider {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Provider for StaticProvider {
    fn read_current(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        buf.clear();
        buf.extend_from_slice(&self.content);
        Ok(())
    }

    fn target(&self) -> &str {
        "static"
    }
}

/// Reports the call number as MemTotal; fails the calls listed in `fail_on` (1-based).
pub struct CountingProvider {
    calls: u64,
    fail_on: Vec<u64>,
}

impl CountingProvider {
    pub fn new(fail_on: &[u64]) -> Self {
        Self {
            calls: 0,
            fail_on: fail_on.to_vec(),
        }
    }
}

impl Provider for CountingProvider {
    fn read_current(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        self.calls += 1;
        buf.clear();
        if self.fail_on.contains(&self.calls) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "source vanished"));
        }
        buf.extend_from_slice(format!("MemTotal: {} kB\nMemFree: 7 kB\n", self.calls).as_bytes());
        Ok(())
    }

    fn target(&self) -> &str {
        "counting"
    }
}

/// Always fails with a permission error.
pub struct FailingProvider;

impl Provider for FailingProvider {
    fn read_current(&mut self, _buf: &mut Vec<u8>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }

    fn target(&self) -> &str {
        "failing"
    }
}
