mod errors;
mod instant;

use byteorder::{BigEndian, ByteOrder};

use errors::expected_checksum;
pub use errors::StreamError;
pub use instant::{Instant, MAX_NANOS};

pub const LONG_MIN_VALUE: i64 = i64::MIN;
pub const INTEGER_MIN_VALUE: i32 = i32::MIN;

/// Checksum constant for plain length-prefixed byte arrays.
pub const BYTE_ARRAY_CHECKSUM: i32 = 101;

/// Big-endian cursor over an in-memory buffer.
///
/// Every read is bounds checked against the buffer, so a malformed input can only fail and never
/// read past its end or loop forever.
pub struct ByteStream<'a> {
    buffer: &'a [u8],
    position: usize
}

impl<'a> ByteStream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn available(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// Bytes between `start` and the current cursor.
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.buffer[start.min(self.position)..self.position]
    }

    /// Returns exactly `count` bytes or fails without advancing.
    pub fn read_fully(&mut self, count: usize) -> Result<&'a [u8], StreamError> {
        if count > self.remaining() {
            return Err(StreamError::UnexpectedEof {
                position: self.position,
                wanted: count,
                available: self.remaining()
            });
        }

        let slice = &self.buffer[self.position..self.position + count];
        self.position += count;

        Ok(slice)
    }

    pub fn read_bool(&mut self) -> Result<bool, StreamError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8, StreamError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u8(&mut self) -> Result<u8, StreamError> {
        Ok(self.read_fully(1)?[0])
    }

    pub fn read_i16(&mut self) -> Result<i16, StreamError> {
        Ok(BigEndian::read_i16(self.read_fully(2)?))
    }

    pub fn read_u16(&mut self) -> Result<u16, StreamError> {
        Ok(BigEndian::read_u16(self.read_fully(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, StreamError> {
        Ok(BigEndian::read_i32(self.read_fully(4)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, StreamError> {
        Ok(BigEndian::read_u32(self.read_fully(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, StreamError> {
        Ok(BigEndian::read_i64(self.read_fully(8)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, StreamError> {
        Ok(BigEndian::read_u64(self.read_fully(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, StreamError> {
        Ok(BigEndian::read_f32(self.read_fully(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, StreamError> {
        Ok(BigEndian::read_f64(self.read_fully(8)?))
    }

    /// Two byte length prefix followed by the raw string bytes.
    pub fn read_utf(&mut self) -> Result<String, StreamError> {
        let length = self.read_u16()? as usize;
        let bytes = self.read_fully(length)?;

        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Reads a length prefixed byte array, optionally followed by a checksum word equal to
    /// `101 - length`. A negative length means the array was written as null.
    pub fn read_byte_array(&mut self, max_length: usize, read_checksum: bool) -> Result<Option<Vec<u8>>, StreamError> {
        let length = self.read_i32()?;

        if length < 0 {
            return Ok(None);
        }

        if read_checksum {
            let checksum = self.read_i32()?;

            if i64::from(checksum) != expected_checksum(length, BYTE_ARRAY_CHECKSUM) {
                return Err(StreamError::checksum_mismatch(length, BYTE_ARRAY_CHECKSUM, checksum));
            }
        }

        let length = length as usize;

        if length > max_length {
            return Err(StreamError::length_exceeded(length, max_length));
        }

        Ok(Some(self.read_fully(length)?.to_vec()))
    }

    /// Reads a length word followed by a checksum word that must equal `constant - length`.
    ///
    /// Swirlds objects use a different prime for every framed field (277, 353, 439, 541, 647).
    pub fn read_checked_length(&mut self, constant: i32) -> Result<usize, StreamError> {
        let length = self.read_i32()?;
        let checksum = self.read_i32()?;

        if length < 0 {
            return Err(StreamError::NegativeLength(length));
        }

        if i64::from(checksum) != expected_checksum(length, constant) {
            return Err(StreamError::checksum_mismatch(length, constant, checksum));
        }

        Ok(length as usize)
    }

    pub fn read_long_array(&mut self) -> Result<Vec<i64>, StreamError> {
        let length = self.read_i32()?;

        if length < 0 {
            return Ok(Vec::new());
        }

        //NOTE: Capacity is capped by what the buffer could possibly hold so a corrupt length cannot
        //      trigger a huge allocation before the reads fail.
        let mut values = Vec::with_capacity((length as usize).min(self.remaining() / 8));

        for _ in 0..length {
            values.push(self.read_i64()?);
        }

        Ok(values)
    }

    pub fn read_int_array(&mut self) -> Result<Vec<i32>, StreamError> {
        let length = self.read_i32()?;

        if length < 0 {
            return Ok(Vec::new());
        }

        let mut values = Vec::with_capacity((length as usize).min(self.remaining() / 4));

        for _ in 0..length {
            values.push(self.read_i32()?);
        }

        Ok(values)
    }

    /// Reads an epoch second / nanos pair. The minimum long as epoch second marks an absent instant
    /// and no nanos word follows it.
    pub fn read_instant(&mut self) -> Result<Option<Instant>, StreamError> {
        let epoch_seconds = self.read_i64()?;

        if epoch_seconds == LONG_MIN_VALUE {
            return Ok(None);
        }

        let nanos = self.read_i64()?;

        if !(0..=MAX_NANOS).contains(&nanos) {
            return Err(StreamError::InvalidInstant(nanos));
        }

        Ok(Some(Instant::new(epoch_seconds, nanos)))
    }
}
