// Frame layout: [marker: 4 bytes][version: u8][wincode payload].
// Payload integers are little-endian. Version 1 = timestamp + (id, value) slots.

use wincode::{SchemaRead, SchemaWrite};

use crate::error::DecodeError;

pub const FRAME_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 5;

/// One non-zero field. Ids a decoder does not know are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SchemaRead, SchemaWrite)]
pub struct Slot {
    pub id: u16,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SchemaRead, SchemaWrite)]
pub struct Payload {
    pub timestamp: i64,
    pub fields: Vec<Slot>,
}

impl Payload {
    pub fn clear(&mut self) {
        self.timestamp = 0;
        self.fields.clear();
    }
}

pub fn write_frame(marker: [u8; 4], payload: &Payload) -> Result<Vec<u8>, String> {
    let body = wincode::serialize(payload).map_err(|e| format!("wincode: {}", e))?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&marker);
    out.push(FRAME_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn read_frame(bytes: &[u8], marker: [u8; 4]) -> Result<Payload, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated {
            len: bytes.len(),
            need: HEADER_LEN,
        });
    }
    let found = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if found != marker {
        return Err(DecodeError::Marker {
            expected: marker,
            found,
        });
    }
    if bytes[4] != FRAME_VERSION {
        return Err(DecodeError::Version(bytes[4]));
    }
    wincode::deserialize::<Payload>(&bytes[HEADER_LEN..])
        .map_err(|e| DecodeError::Payload(e.to_string()))
}
