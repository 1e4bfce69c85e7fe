// Memory statistics from /proc/meminfo (values in kB, as the kernel reports them).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::{Field, Record, stringify};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemInfo {
    pub timestamp: i64,
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_cached: u64,
    pub active: u64,
    pub inactive: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// The only label -> field mapping for MemInfo. Ids are wire identities; append
/// new fields with fresh ids.
pub const MEMINFO_FIELDS: [Field<MemInfo>; 10] = [
    Field {
        id: 1,
        label: "MemTotal",
        get: |m| m.mem_total,
        set: |m, v| m.mem_total = v,
    },
    Field {
        id: 2,
        label: "MemFree",
        get: |m| m.mem_free,
        set: |m, v| m.mem_free = v,
    },
    Field {
        id: 3,
        label: "MemAvailable",
        get: |m| m.mem_available,
        set: |m, v| m.mem_available = v,
    },
    Field {
        id: 4,
        label: "Buffers",
        get: |m| m.buffers,
        set: |m, v| m.buffers = v,
    },
    Field {
        id: 5,
        label: "Cached",
        get: |m| m.cached,
        set: |m, v| m.cached = v,
    },
    Field {
        id: 6,
        label: "SwapCached",
        get: |m| m.swap_cached,
        set: |m, v| m.swap_cached = v,
    },
    Field {
        id: 7,
        label: "Active",
        get: |m| m.active,
        set: |m, v| m.active = v,
    },
    Field {
        id: 8,
        label: "Inactive",
        get: |m| m.inactive,
        set: |m, v| m.inactive = v,
    },
    Field {
        id: 9,
        label: "SwapTotal",
        get: |m| m.swap_total,
        set: |m, v| m.swap_total = v,
    },
    Field {
        id: 10,
        label: "SwapFree",
        get: |m| m.swap_free,
        set: |m, v| m.swap_free = v,
    },
];

impl Record for MemInfo {
    const KIND: &'static str = "mem";
    const MARKER: [u8; 4] = *b"MEMI";
    const DEFAULT_PATH: &'static str = "/proc/meminfo";
    const FIELDS: &'static [Field<Self>] = &MEMINFO_FIELDS;

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn set_timestamp(&mut self, ts: i64) {
        self.timestamp = ts;
    }
}

impl fmt::Display for MemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify(self))
    }
}
