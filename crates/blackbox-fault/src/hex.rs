//! Hex echo over the polling console.
//!
//! Runs in panic mode, so it uses no runtime formatting machinery: a
//! lookup table and a fixed line buffer. Output is `OFFSET: BYTES`, 32
//! bytes per line, the exact image being persisted - the offline decoder
//! ingests this dump directly when the storage copy is unavailable.

use blackbox_hal::PanicConsole;

/// Payload bytes per output line.
pub const BYTES_PER_LINE: usize = 32;

const HEX: &[u8; 16] = b"0123456789abcdef";

// "xxxxxxxx: " + 2 chars per byte + "\r\n"
const LINE_BYTES: usize = 10 + BYTES_PER_LINE * 2 + 2;

/// Streams bytes as offset-prefixed hex lines to a [`PanicConsole`].
pub struct HexWriter<'a> {
    console: &'a mut dyn PanicConsole,
    line: [u8; LINE_BYTES],
    col: usize,
    offset: u32,
}

impl<'a> HexWriter<'a> {
    /// A writer starting at offset zero.
    pub fn new(console: &'a mut dyn PanicConsole) -> Self {
        Self {
            console,
            line: [0; LINE_BYTES],
            col: 0,
            offset: 0,
        }
    }

    /// Queues one byte, flushing a full line to the console.
    pub fn push(&mut self, byte: u8) {
        if self.col == 0 {
            self.start_line();
        }
        let at = 10 + self.col * 2;
        self.line[at] = HEX[(byte >> 4) as usize];
        self.line[at + 1] = HEX[(byte & 0x0f) as usize];
        self.col += 1;
        if self.col == BYTES_PER_LINE {
            self.flush_line(BYTES_PER_LINE);
        }
    }

    /// Queues a run of bytes.
    pub fn push_all(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.push(*byte);
        }
    }

    /// Emits any partial final line.
    pub fn finish(&mut self) {
        if self.col > 0 {
            let col = self.col;
            self.flush_line(col);
        }
    }

    /// Emits a literal marker line, e.g. when a storage write fails
    /// mid-report. Resets column state so hex output resumes cleanly.
    pub fn marker(&mut self, text: &[u8]) {
        self.finish();
        self.console.write_bytes(text);
        self.console.write_bytes(b"\r\n");
    }

    fn start_line(&mut self) {
        let mut value = self.offset;
        for i in (0..8).rev() {
            self.line[i] = HEX[(value & 0x0f) as usize];
            value >>= 4;
        }
        self.line[8] = b':';
        self.line[9] = b' ';
    }

    fn flush_line(&mut self, cols: usize) {
        let end = 10 + cols * 2;
        self.line[end] = b'\r';
        self.line[end + 1] = b'\n';
        self.console.write_bytes(&self.line[..end + 2]);
        self.offset += cols as u32;
        self.col = 0;
    }
}

impl core::fmt::Debug for HexWriter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HexWriter")
            .field("offset", &self.offset)
            .field("col", &self.col)
            .finish()
    }
}
