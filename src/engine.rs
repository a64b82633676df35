//! Generic SHA-1 compression engine.
//!
//! [`CompressionEngine`] buffers input elements into 64-element blocks and runs
//! the SHA-1 round function on every full block. It only uses the operations of
//! [`Word`] and [`Element`], so the same code computes
//!
//! - a real digest over `u8` elements and `u32` words ([`Sha1`]), and
//! - closed-form boolean formulas for every digest bit over symbolic
//!   bit-vectors ([`SymbolicSha1`]).
//!
//! ```rust
//! use dnf_rs::engine::{to_hex, Sha1};
//!
//! let mut engine = Sha1::new();
//! engine.update(b"abc").unwrap();
//! let digest = engine.terminate().unwrap();
//! assert_eq!(to_hex(&digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! ```

use std::fmt::Write;

use log::{debug, trace};

use crate::bitvec::BitVector;
use crate::error::{EngineError, FormulaError};
use crate::word::{Element, Widen, Word};

/// Elements per block.
pub const BLOCK_LEN: usize = 64;

/// Number of rounds per block.
const ROUNDS: usize = 80;

const INITIAL_STATE: [u64; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

const ROUND_CONSTANTS: [u64; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

/// Concrete SHA-1 over bytes.
pub type Sha1 = CompressionEngine<u8, u32>;

/// Symbolic SHA-1 over bit-vectors of formulas.
pub type SymbolicSha1 = CompressionEngine<BitVector<8>, BitVector<32>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EngineState {
    Absorbing,
    Finalized,
}

#[derive(Debug, Clone)]
pub struct CompressionEngine<E, W> {
    state: [W; 5],
    buffer: Vec<E>,
    count: u64,
    blocks: u64,
    phase: EngineState,
}

impl<E, W> Default for CompressionEngine<E, W>
where
    E: Element,
    W: Word + Widen<E>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, W> CompressionEngine<E, W>
where
    E: Element,
    W: Word + Widen<E>,
{
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE.map(W::constant),
            buffer: Vec::with_capacity(BLOCK_LEN),
            count: 0,
            blocks: 0,
            phase: EngineState::Absorbing,
        }
    }

    /// Number of elements absorbed so far (padding included after `terminate`).
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn phase(&self) -> EngineState {
        self.phase
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == EngineState::Finalized
    }

    /// Absorbs `elements` in order. Can be called any number of times with
    /// chunks of any size before [`terminate`](Self::terminate).
    ///
    /// If a block fails with [`EngineError::Formula`], the elements before the
    /// failing one stay absorbed and the failing one is not.
    pub fn add(&mut self, elements: impl IntoIterator<Item = E>) -> Result<(), EngineError> {
        self.ensure_absorbing()?;
        for element in elements {
            self.absorb(element)?;
        }
        Ok(())
    }

    /// Like [`add`](Self::add), for a slice.
    pub fn update(&mut self, elements: &[E]) -> Result<(), EngineError> {
        self.add(elements.iter().cloned())
    }

    /// Appends the padding and the message bit-length, and returns the state words.
    ///
    /// The engine is finalized afterwards: any further call fails with
    /// [`EngineError::Finalized`]. If padding fails with [`EngineError::Formula`],
    /// the engine is restored and stays absorbing.
    pub fn terminate(&mut self) -> Result<[W; 5], EngineError> {
        self.ensure_absorbing()?;

        let bit_len = self.count.wrapping_mul(8);
        debug!("terminate: {} elements, {} bits", self.count, bit_len);

        let saved = self.clone();
        if let Err(err) = self.pad(bit_len) {
            debug!("terminate: {}, engine restored", err);
            *self = saved;
            return Err(err.into());
        }
        debug_assert!(self.buffer.is_empty());

        self.phase = EngineState::Finalized;
        debug!("terminate: done after {} blocks", self.blocks);
        Ok(self.state.clone())
    }

    fn pad(&mut self, bit_len: u64) -> Result<(), FormulaError> {
        self.absorb(E::from_byte(0x80))?;
        let zeros = (56u64.wrapping_sub(self.count)) & 0x3f;
        for _ in 0..zeros {
            self.absorb(E::from_byte(0))?;
        }
        for byte in bit_len.to_be_bytes() {
            self.absorb(E::from_byte(byte))?;
        }
        Ok(())
    }

    fn ensure_absorbing(&self) -> Result<(), EngineError> {
        match self.phase {
            EngineState::Absorbing => Ok(()),
            EngineState::Finalized => Err(EngineError::Finalized),
        }
    }

    fn absorb(&mut self, element: E) -> Result<(), FormulaError> {
        self.buffer.push(element);
        if self.buffer.len() == BLOCK_LEN {
            if let Err(err) = self.process_block() {
                self.buffer.pop();
                return Err(err);
            }
            self.buffer.clear();
        }
        self.count = self.count.wrapping_add(1);
        Ok(())
    }

    /// Big-endian packing of four buffered elements into word `i`.
    fn load_word(&self, i: usize) -> Result<W, FormulaError> {
        let mut word = W::constant(0);
        for j in 0..4 {
            let byte = W::widen(&self.buffer[i * 4 + 3 - j]).shift_left(j * 8);
            word = word.try_or(&byte)?;
        }
        Ok(word)
    }

    /// Runs the 80 rounds over the full buffer. The state is only written on success.
    fn process_block(&mut self) -> Result<(), FormulaError> {
        debug!("process_block: block #{}", self.blocks);

        let mut w: Vec<W> = Vec::with_capacity(ROUNDS);
        for i in 0..16 {
            w.push(self.load_word(i)?);
        }
        for i in 16..ROUNDS {
            let x = w[i - 3].try_xor(&w[i - 8])?.try_xor(&w[i - 14])?.try_xor(&w[i - 16])?;
            w.push(x.rotate_left(1));
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state.clone();

        for (i, wi) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => (b.try_and(&c)?.try_or(&b.try_not()?.try_and(&d)?)?, ROUND_CONSTANTS[0]),
                20..=39 => (b.try_xor(&c)?.try_xor(&d)?, ROUND_CONSTANTS[1]),
                40..=59 => (
                    b.try_and(&c)?.try_or(&b.try_and(&d)?)?.try_or(&c.try_and(&d)?)?,
                    ROUND_CONSTANTS[2],
                ),
                _ => (b.try_xor(&c)?.try_xor(&d)?, ROUND_CONSTANTS[3]),
            };

            let temp = a
                .rotate_left(5)
                .try_add(&f)?
                .try_add(&e)?
                .try_add(&W::constant(k))?
                .try_add(wi)?;
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;

            trace!("round {}: a = {:?}", i, a.as_const());
        }

        let mut next = self.state.clone();
        for (h, x) in next.iter_mut().zip([a, b, c, d, e]) {
            *h = h.try_add(&x)?;
        }
        self.state = next;
        self.blocks += 1;
        Ok(())
    }
}

/// Big-endian serialization of the five state words.
pub fn digest_to_bytes(words: &[u32; 5]) -> [u8; 20] {
    let mut out = [0u8; 20];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Lowercase hex of the five state words, most significant word first.
pub fn to_hex(words: &[u32; 5]) -> String {
    let mut s = String::with_capacity(40);
    for word in words {
        // Writing to a String cannot fail.
        let _ = write!(s, "{:08x}", word);
    }
    s
}

/// SHA-1 digest of `data`.
pub fn sha1(data: &[u8]) -> [u8; 20] {
    let mut engine = Sha1::new();
    match engine.update(data).and_then(|()| engine.terminate()) {
        Ok(words) => digest_to_bytes(&words),
        Err(err) => unreachable!("native words cannot fail: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::config::FormulaConfig;
    use crate::value::BoolValue;

    #[test]
    fn test_empty() {
        let mut engine = Sha1::new();
        let digest = engine.terminate().unwrap();
        assert_eq!(to_hex(&digest), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_abc() {
        let mut engine = Sha1::new();
        engine.update(b"abc").unwrap();
        let digest = engine.terminate().unwrap();
        assert_eq!(to_hex(&digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_two_blocks_of_padding() {
        // 56 bytes leave no room for the length, so padding spills into a second block.
        let data = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(data.len(), 56);
        let mut engine = Sha1::new();
        engine.update(data).unwrap();
        let digest = engine.terminate().unwrap();
        assert_eq!(to_hex(&digest), "84983e441c3bd26ebaae4aa1f95129e5e54670f1");
        assert_eq!(engine.len(), 128);
    }

    #[test]
    fn test_add_after_terminate() {
        let mut engine = Sha1::new();
        engine.terminate().unwrap();
        assert!(engine.is_finalized());
        assert_eq!(engine.add([1u8]), Err(EngineError::Finalized));
        assert_eq!(engine.terminate(), Err(EngineError::Finalized));
    }

    #[test]
    fn test_count_across_chunks() {
        let mut engine = Sha1::new();
        engine.update(&[0; 10]).unwrap();
        engine.update(&[0; 60]).unwrap();
        engine.add(std::iter::repeat(7).take(3)).unwrap();
        assert_eq!(engine.len(), 73);
    }

    #[test]
    fn test_sha1_bytes() {
        let digest = sha1(b"abc");
        assert_eq!(&digest[..4], &[0xa9, 0x99, 0x3e, 0x36]);
        assert_eq!(digest[19], 0x9d);
    }

    #[test]
    fn test_failed_block_keeps_element_out() {
        let mut first = BitVector::<8>::from(b'a');
        first.set(0, BoolValue::var("x", 0));
        first.set(1, BoolValue::var("x", 1));

        let mut engine = SymbolicSha1::new();
        engine.add(std::iter::once(first).chain(std::iter::repeat(BitVector::zero()).take(62))).unwrap();
        assert_eq!(engine.len(), 63);

        let res = FormulaConfig::bounded(1).scope(|| engine.add([BitVector::zero()]));
        assert!(matches!(res, Err(EngineError::Formula(_))));
        assert_eq!(engine.len(), 63);

        engine.add([BitVector::zero()]).unwrap();
        assert_eq!(engine.len(), 64);
    }

    #[test]
    fn test_symbolic_engine_on_constants() {
        let mut engine = SymbolicSha1::new();
        engine
            .add(b"abc".iter().map(|&b| BitVector::<8>::from(b)))
            .unwrap();
        let words = engine.terminate().unwrap();
        let words = words.map(|w| w.to_u64().unwrap() as u32);
        assert_eq!(to_hex(&words), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
