//! UTF-8 reassembly for the bytes the parser's `print` action hands over.
//!
//! Continuation bytes are validated strictly (`0x80..=0xBF`). A byte
//! outside that range while a sequence is in progress aborts the
//! sequence, yields U+FFFD for what had been consumed, and is then
//! reprocessed as a fresh lead byte rather than being swallowed.

const REPLACEMENT: u32 = 0xfffd;

/// Up to two scalars produced by one call to [`Utf8Decoder::feed`]: the
/// abort replacement plus whatever the reprocessed byte resolves to.
#[derive(Default)]
pub struct DecodedChars {
    buf: [u32; 2],
    len: usize,
}

impl DecodedChars {
    fn push(&mut self, scalar: u32) {
        self.buf[self.len] = scalar;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.buf[..self.len]
    }
}

#[derive(Debug, Default)]
pub struct Utf8Decoder {
    bytes: [u8; 4],
    len: usize,
    need: usize,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any partially assembled sequence.
    pub fn reset(&mut self) {
        self.len = 0;
        self.need = 0;
    }

    fn start(&mut self, lead: u8, need: usize) {
        self.bytes[0] = lead;
        self.len = 1;
        self.need = need;
    }

    /// Feed one raw byte. Returns zero, one, or two decoded scalars.
    pub fn feed(&mut self, byte: u8) -> DecodedChars {
        let mut out = DecodedChars::default();

        if self.need > 0 {
            if (0x80..=0xbf).contains(&byte) {
                self.bytes[self.len] = byte;
                self.len += 1;
                self.need -= 1;
                if self.need == 0 {
                    let scalar = decode_sequence(&self.bytes[..self.len]).unwrap_or(REPLACEMENT);
                    out.push(scalar);
                    self.reset();
                }
                return out;
            }

            // Malformed continuation: abort, emit the replacement for what
            // was consumed, and reprocess `byte` as a fresh lead byte.
            out.push(REPLACEMENT);
            self.reset();
            self.classify_lead(byte, &mut out);
            return out;
        }

        self.classify_lead(byte, &mut out);
        out
    }

    fn classify_lead(&mut self, byte: u8, out: &mut DecodedChars) {
        match byte {
            0x00..=0x7f => out.push(byte as u32),
            0xc2..=0xdf => self.start(byte, 1),
            0xe0..=0xef => self.start(byte, 2),
            0xf0..=0xf4 => self.start(byte, 3),
            // 0x80..=0xc1 (stray continuation / overlong lead) and
            // 0xf5..=0xff (out of Unicode's range) are never valid leads.
            _ => out.push(REPLACEMENT),
        }
    }
}

fn decode_sequence(bytes: &[u8]) -> Option<u32> {
    let lead_mask: u32 = match bytes.len() {
        2 => 0x1f,
        3 => 0x0f,
        4 => 0x07,
        _ => return None,
    };
    let mut value = u32::from(bytes[0]) & lead_mask;
    for &b in &bytes[1..] {
        value = (value << 6) | (u32::from(b) & 0x3f);
    }
    char::from_u32(value).map(|_| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<u32> {
        let mut decoder = Utf8Decoder::new();
        let mut out = Vec::new();
        for &b in bytes {
            out.extend_from_slice(decoder.feed(b).as_slice());
        }
        out
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode(b"hi"), vec![b'h' as u32, b'i' as u32]);
    }

    #[test]
    fn decodes_three_byte_sequence() {
        // e2 82 ac = EURO SIGN U+20AC
        assert_eq!(decode(&[0xe2, 0x82, 0xac]), vec![0x20ac]);
    }

    #[test]
    fn bad_continuation_emits_replacement_and_reprocesses() {
        // 0xe2 starts a 3-byte sequence, but 'A' is not a continuation
        // byte: expect one replacement for the abort, then 'A' printed.
        assert_eq!(decode(&[0xe2, b'A']), vec![0xfffd, b'A' as u32]);
    }

    #[test]
    fn stray_continuation_byte_is_replaced() {
        assert_eq!(decode(&[0x80]), vec![0xfffd]);
    }
}
