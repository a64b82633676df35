//! Scalar bit algebra shared by concrete and symbolic bits.
//!
//! The ripple-carry adder is written once against [`Bit`], so [`BitVector`]
//! addition has exactly the same bit semantics for `bool` and [`BoolValue`].
//!
//! [`BitVector`]: crate::bitvec::BitVector

use crate::config::FormulaConfig;
use crate::error::FormulaError;
use crate::value::BoolValue;

/// A single boolean bit: NOT, AND, OR, XOR and a view of constant values.
///
/// Gates are fallible because symbolic bits obey the product limit of the
/// current [`FormulaConfig`]. Concrete bits never fail.
pub trait Bit: Clone {
    fn constant(value: bool) -> Self;

    /// Returns `Some(b)` if the bit is the known constant `b`.
    fn as_const(&self) -> Option<bool>;

    fn try_not(&self) -> Result<Self, FormulaError>;
    fn try_and(&self, other: &Self) -> Result<Self, FormulaError>;
    fn try_or(&self, other: &Self) -> Result<Self, FormulaError>;
    fn try_xor(&self, other: &Self) -> Result<Self, FormulaError>;

    /// `(a & b) | (a & c) | (b & c)`.
    ///
    /// A constant `c` reduces the gate to `a & b` or `a | b`.
    fn majority(a: &Self, b: &Self, c: &Self) -> Result<Self, FormulaError> {
        match c.as_const() {
            Some(false) => a.try_and(b),
            Some(true) => a.try_or(b),
            None => a.try_and(b)?.try_or(&a.try_and(c)?)?.try_or(&b.try_and(c)?),
        }
    }
}

impl Bit for bool {
    fn constant(value: bool) -> Self {
        value
    }

    fn as_const(&self) -> Option<bool> {
        Some(*self)
    }

    fn try_not(&self) -> Result<Self, FormulaError> {
        Ok(!*self)
    }

    fn try_and(&self, other: &Self) -> Result<Self, FormulaError> {
        Ok(*self && *other)
    }

    fn try_or(&self, other: &Self) -> Result<Self, FormulaError> {
        Ok(*self || *other)
    }

    fn try_xor(&self, other: &Self) -> Result<Self, FormulaError> {
        Ok(*self != *other)
    }
}

impl Bit for BoolValue {
    fn constant(value: bool) -> Self {
        BoolValue::Const(value)
    }

    fn as_const(&self) -> Option<bool> {
        BoolValue::as_const(self)
    }

    fn try_not(&self) -> Result<Self, FormulaError> {
        self.not_with(&FormulaConfig::current())
    }

    fn try_and(&self, other: &Self) -> Result<Self, FormulaError> {
        self.and_with(other, &FormulaConfig::current())
    }

    fn try_or(&self, other: &Self) -> Result<Self, FormulaError> {
        Ok(self.or_with(other, &FormulaConfig::current()))
    }

    fn try_xor(&self, other: &Self) -> Result<Self, FormulaError> {
        self.xor_with(other, &FormulaConfig::current())
    }
}

/// Ripple-carry addition modulo `2^n` over LSB-first bit slices of equal length `n`.
///
/// `sum[i] = a[i] ^ b[i] ^ carry`, `carry' = maj(a[i], b[i], carry)`.
///
/// # Panics
///
/// Panics if the operands differ in length.
pub fn ripple_add<B: Bit>(a: &[B], b: &[B]) -> Result<Vec<B>, FormulaError> {
    assert_eq!(a.len(), b.len(), "Operand widths must match");
    let mut carry = B::constant(false);
    let mut sum = Vec::with_capacity(a.len());
    for (x, y) in a.iter().zip(b) {
        sum.push(x.try_xor(y)?.try_xor(&carry)?);
        carry = B::majority(x, y, &carry)?;
    }
    Ok(sum)
}
