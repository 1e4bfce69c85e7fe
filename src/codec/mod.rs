// Record <-> frame codec. Every field travels as an (id, value) slot, so decoders
// built against an older field table still read frames from newer producers.

pub mod frame;

use bytes::Bytes;
use std::marker::PhantomData;

use crate::error::{DecodeError, SampleError};
use crate::models::Record;
use frame::{Payload, Slot};

/// Reusable encoder. Holds its slot buffer across calls; only the returned
/// frame is freshly allocated.
pub struct Encoder<R> {
    payload: Payload,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for Encoder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Encoder<R> {
    pub fn new() -> Self {
        Self {
            payload: Payload {
                timestamp: 0,
                fields: Vec::with_capacity(R::FIELDS.len()),
            },
            _record: PhantomData,
        }
    }

    /// Zero-valued fields are left out of the frame; they decode as 0.
    pub fn encode(&mut self, record: &R) -> Result<Bytes, SampleError> {
        self.payload.clear();
        self.payload.timestamp = record.timestamp();
        for field in R::FIELDS {
            let value = (field.get)(record);
            if value != 0 {
                self.payload.fields.push(Slot {
                    id: field.id,
                    value,
                });
            }
        }
        let out = frame::write_frame(R::MARKER, &self.payload).map_err(|reason| {
            SampleError::Encode {
                kind: R::KIND,
                reason,
            }
        })?;
        Ok(Bytes::from(out))
    }
}

pub fn encode<R: Record>(record: &R) -> Result<Bytes, SampleError> {
    Encoder::new().encode(record)
}

/// Decodes a frame produced by [`encode`] for the same record type.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, DecodeError> {
    let payload = frame::read_frame(bytes, R::MARKER)?;
    let mut record = R::default();
    record.set_timestamp(payload.timestamp);
    for slot in &payload.fields {
        if let Some(field) = R::field_by_id(slot.id) {
            (field.set)(&mut record, slot.value);
        }
    }
    Ok(record)
}
