//! # Bit Streams
//!
//! A compact, append-only sequence of bits. Bits are packed most-significant
//! first into bytes, so a stream built from whole bytes exposes those same
//! bytes again through [`BitStream::complete_bytes`].

/// Ordered sequence of bits packed MSB-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    /// Packed storage; the last byte may be partially filled
    bytes: Vec<u8>,
    /// Number of valid bits in `bytes`
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Build a stream holding every bit of `bytes`, MSB first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Append one bit. Any non-zero value counts as a 1.
    pub fn push(&mut self, bit: u8) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit != 0 {
            // `bytes` is never empty here: a byte was pushed when offset was 0
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Append all eight bits of `byte`, MSB first.
    pub fn push_byte(&mut self, byte: u8) {
        if self.len % 8 == 0 {
            self.bytes.push(byte);
            self.len += 8;
        } else {
            for shift in (0..8).rev() {
                self.push((byte >> shift) & 1);
            }
        }
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The fully populated bytes of the stream. A trailing partial byte is
    /// left out.
    pub fn complete_bytes(&self) -> &[u8] {
        &self.bytes[..self.len / 8]
    }

    /// Iterate over every bit in order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1)
    }
}

impl FromIterator<u8> for BitStream {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut stream = BitStream::new();
        for bit in iter {
            stream.push(bit);
        }
        stream
    }
}
