//! Resumable pulse symbol encoders
//!
//! Transmission channels hand encoders a bounded [`SymbolSlot`] and call
//! [`Encoder::encode`] repeatedly until the frame completes. A full slot is
//! ordinary backpressure, not an error: the encoder keeps its cursor and the
//! next call resumes exactly where the previous one stopped.

use crate::symbol::{PulseSymbol, SymbolSet};

const BITS_PER_BYTE: u8 = 8;

/// Symbols one full frame emits: eight per byte plus the trailing reset
pub const fn frame_symbols(byte_len: usize) -> usize {
    byte_len * 8 + 1
}

/// The slot ran out of room; resume with fresh storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFull;

/// Bounded window over caller-owned symbol storage
#[derive(Debug)]
pub struct SymbolSlot<'a> {
    symbols: &'a mut [PulseSymbol],
    written: usize,
}

impl<'a> SymbolSlot<'a> {
    pub fn new(symbols: &'a mut [PulseSymbol]) -> Self {
        Self {
            symbols,
            written: 0,
        }
    }

    /// Append one symbol
    ///
    /// # Errors
    /// [`SlotFull`] when no room remains; the slot is unchanged.
    pub fn push(&mut self, symbol: PulseSymbol) -> Result<(), SlotFull> {
        if self.written == self.symbols.len() {
            return Err(SlotFull);
        }
        self.symbols[self.written] = symbol;
        self.written += 1;
        Ok(())
    }

    /// Symbols appended so far
    pub const fn written(&self) -> usize {
        self.written
    }

    pub const fn remaining(&self) -> usize {
        self.symbols.len() - self.written
    }

    pub const fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// The appended symbols, in push order
    pub fn filled(&self) -> &[PulseSymbol] {
        &self.symbols[..self.written]
    }
}

/// Outcome of one [`Encoder::encode`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeResult {
    /// Symbols pushed by this call
    pub symbols: usize,
    /// The payload finished; the encoder has rewound for the next one
    pub complete: bool,
    /// The slot filled up first; call again with fresh storage
    pub slot_full: bool,
}

/// A resumable data-to-symbol translator
pub trait Encoder {
    /// Encode as much of `data` as the slot accepts, resuming from the
    /// position where the previous call stopped.
    fn encode(&mut self, data: &[u8], slot: &mut SymbolSlot<'_>) -> EncodeResult;

    /// Rewind to the start of a payload, dropping any partial progress
    fn reset(&mut self);
}

/// Expands bytes into bit symbols, most significant bit first
#[derive(Debug, Clone)]
pub struct ByteEncoder {
    bit0: PulseSymbol,
    bit1: PulseSymbol,
    cursor: usize,
    bit: u8,
}

impl ByteEncoder {
    pub const fn new(bit0: PulseSymbol, bit1: PulseSymbol) -> Self {
        Self {
            bit0,
            bit1,
            cursor: 0,
            bit: 0,
        }
    }

    pub const fn from_set(set: &SymbolSet) -> Self {
        Self::new(set.bit0, set.bit1)
    }
}

impl Encoder for ByteEncoder {
    fn encode(&mut self, data: &[u8], slot: &mut SymbolSlot<'_>) -> EncodeResult {
        let mut symbols = 0;
        while self.cursor < data.len() {
            let byte = data[self.cursor];
            // A slot may fill mid-byte, so the bit cursor persists too.
            while self.bit < BITS_PER_BYTE {
                let symbol = if byte & (0x80 >> self.bit) != 0 {
                    self.bit1
                } else {
                    self.bit0
                };
                if slot.push(symbol).is_err() {
                    return EncodeResult {
                        symbols,
                        complete: false,
                        slot_full: true,
                    };
                }
                symbols += 1;
                self.bit += 1;
            }
            self.bit = 0;
            self.cursor += 1;
        }
        self.reset();
        EncodeResult {
            symbols,
            complete: true,
            slot_full: false,
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.bit = 0;
    }
}

/// Emits one fixed symbol a fixed number of times, ignoring `data`
#[derive(Debug, Clone)]
pub struct CopyEncoder {
    symbol: PulseSymbol,
    repeats: usize,
    cursor: usize,
}

impl CopyEncoder {
    pub const fn new(symbol: PulseSymbol, repeats: usize) -> Self {
        Self {
            symbol,
            repeats,
            cursor: 0,
        }
    }
}

impl Encoder for CopyEncoder {
    fn encode(&mut self, _data: &[u8], slot: &mut SymbolSlot<'_>) -> EncodeResult {
        let mut symbols = 0;
        while self.cursor < self.repeats {
            if slot.push(self.symbol).is_err() {
                return EncodeResult {
                    symbols,
                    complete: false,
                    slot_full: true,
                };
            }
            symbols += 1;
            self.cursor += 1;
        }
        self.reset();
        EncodeResult {
            symbols,
            complete: true,
            slot_full: false,
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SendData,
    SendReset,
}

/// Frame encoder for one strip: pixel bytes, then the reset gap
///
/// Runs a two-phase session per frame. While in the data phase it forwards
/// to the byte encoder; once the bytes complete it falls through to the
/// reset symbol within the same call if the slot still has room. Completing
/// the reset flips the phase back so the next session starts clean. A frame
/// of `n` bytes always totals `n * 8 + 1` symbols across the session.
#[derive(Debug, Clone)]
pub struct StripEncoder {
    bytes: ByteEncoder,
    gap: CopyEncoder,
    phase: Phase,
}

impl StripEncoder {
    pub const fn new(set: &SymbolSet) -> Self {
        Self {
            bytes: ByteEncoder::from_set(set),
            gap: CopyEncoder::new(set.reset, 1),
            phase: Phase::SendData,
        }
    }
}

impl Encoder for StripEncoder {
    fn encode(&mut self, data: &[u8], slot: &mut SymbolSlot<'_>) -> EncodeResult {
        let mut result = EncodeResult::default();
        if self.phase == Phase::SendData {
            let step = self.bytes.encode(data, slot);
            result.symbols += step.symbols;
            if step.complete {
                self.phase = Phase::SendReset;
            }
            if step.slot_full {
                result.slot_full = true;
                return result;
            }
        }
        let step = self.gap.encode(&[], slot);
        result.symbols += step.symbols;
        if step.complete {
            self.phase = Phase::SendData;
            result.complete = true;
        }
        if step.slot_full {
            result.slot_full = true;
        }
        result
    }

    fn reset(&mut self) {
        self.bytes.reset();
        self.gap.reset();
        self.phase = Phase::SendData;
    }
}
