//! Numeric contract of the compression engine.
//!
//! The engine is written once against these traits. Native integers give a
//! concrete hash; [`BitVector`]s of symbolic bits give symbolic execution.

use std::fmt::Debug;

use crate::bitvec::BitVector;
use crate::error::FormulaError;

/// A fixed-width machine word with bitwise operations and modular addition.
///
/// Bitwise operations and addition are fallible: symbolic words obey the
/// product limit of the current [`FormulaConfig`](crate::config::FormulaConfig).
/// Native integers never fail.
pub trait Word: Clone + Debug {
    const BITS: usize;

    /// The word holding the low `BITS` bits of `value`.
    fn constant(value: u64) -> Self;

    /// Known numeric value, `None` if some bit is symbolic.
    fn as_const(&self) -> Option<u64>;

    fn try_not(&self) -> Result<Self, FormulaError>;
    fn try_and(&self, rhs: &Self) -> Result<Self, FormulaError>;
    fn try_or(&self, rhs: &Self) -> Result<Self, FormulaError>;
    fn try_xor(&self, rhs: &Self) -> Result<Self, FormulaError>;
    fn try_add(&self, rhs: &Self) -> Result<Self, FormulaError>;

    fn shift_left(&self, n: usize) -> Self;
    fn rotate_left(&self, n: usize) -> Self;
}

/// An input element absorbed by the engine (one byte wide).
pub trait Element: Clone + Debug {
    fn from_byte(value: u8) -> Self;
}

/// Zero-extending conversion from an element to a word.
pub trait Widen<E> {
    fn widen(element: &E) -> Self;
}

impl Word for u32 {
    const BITS: usize = 32;

    fn constant(value: u64) -> Self {
        value as u32
    }

    fn as_const(&self) -> Option<u64> {
        Some(*self as u64)
    }

    fn try_not(&self) -> Result<Self, FormulaError> {
        Ok(!*self)
    }

    fn try_and(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Ok(*self & *rhs)
    }

    fn try_or(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Ok(*self | *rhs)
    }

    fn try_xor(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Ok(*self ^ *rhs)
    }

    fn try_add(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Ok(self.wrapping_add(*rhs))
    }

    fn shift_left(&self, n: usize) -> Self {
        u32::try_from(n).ok().and_then(|n| self.checked_shl(n)).unwrap_or(0)
    }

    fn rotate_left(&self, n: usize) -> Self {
        u32::rotate_left(*self, (n % 32) as u32)
    }
}

impl Element for u8 {
    fn from_byte(value: u8) -> Self {
        value
    }
}

impl Widen<u8> for u32 {
    fn widen(element: &u8) -> Self {
        *element as u32
    }
}

impl<const W: usize> Word for BitVector<W> {
    const BITS: usize = W;

    fn constant(value: u64) -> Self {
        BitVector::from_u64(value)
    }

    fn as_const(&self) -> Option<u64> {
        self.to_u64()
    }

    fn try_not(&self) -> Result<Self, FormulaError> {
        BitVector::try_not(self)
    }

    fn try_and(&self, rhs: &Self) -> Result<Self, FormulaError> {
        BitVector::try_and(self, rhs)
    }

    fn try_or(&self, rhs: &Self) -> Result<Self, FormulaError> {
        BitVector::try_or(self, rhs)
    }

    fn try_xor(&self, rhs: &Self) -> Result<Self, FormulaError> {
        BitVector::try_xor(self, rhs)
    }

    fn try_add(&self, rhs: &Self) -> Result<Self, FormulaError> {
        BitVector::try_add(self, rhs)
    }

    fn shift_left(&self, n: usize) -> Self {
        self << n
    }

    fn rotate_left(&self, n: usize) -> Self {
        BitVector::rotate_left(self, n)
    }
}

impl<const W: usize> Element for BitVector<W> {
    fn from_byte(value: u8) -> Self {
        BitVector::from(value)
    }
}

impl<const W: usize, const Z: usize> Widen<BitVector<Z>> for BitVector<W> {
    fn widen(element: &BitVector<Z>) -> Self {
        element.resize::<W>()
    }
}
