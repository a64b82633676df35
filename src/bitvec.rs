//! Fixed-width vectors of symbolic bits.

use std::collections::HashMap;
use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not, Shl, Shr,
};

use crate::bit::{ripple_add, Bit};
use crate::error::{EvalError, FormulaError, WidthError};
use crate::types::Var;
use crate::value::{check, BoolValue};

/// An array of exactly `W` [`BoolValue`]s, index 0 is the least significant bit.
///
/// Operands of binary operators always have the same width: mixing widths is
/// a type error. Use [`resize`](BitVector::resize) to change width explicitly.
///
/// Operators panic if a bit exceeds the configured product limit; the `try_*`
/// methods return the error instead.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BitVector<const W: usize> {
    bits: [BoolValue; W],
}

impl<const W: usize> Default for BitVector<W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const W: usize> BitVector<W> {
    pub const WIDTH: usize = W;

    pub fn zero() -> Self {
        Self::from_fn(|_| BoolValue::zero())
    }

    pub fn from_fn(f: impl FnMut(usize) -> BoolValue) -> Self {
        BitVector {
            bits: std::array::from_fn(f),
        }
    }

    /// Bit `i` is `(value >> i) & 1`; bits above 63 are zero.
    pub fn from_u64(value: u64) -> Self {
        Self::from_fn(|i| BoolValue::Const(i < 64 && (value >> i) & 1 == 1))
    }

    /// Fresh symbolic bits `name[first + i]` for `i` in `0..W`.
    pub fn symbolic(name: &str, first: u32) -> Self {
        let var = |i: usize| Var::new(name, first + i as u32);
        Self::from_fn(|i| BoolValue::from(var(i)))
    }

    /// Copies the low `min(W, Z)` bits, extra high bits are zero.
    pub fn resize<const Z: usize>(&self) -> BitVector<Z> {
        BitVector::from_fn(|i| self.bits.get(i).cloned().unwrap_or_default())
    }

    pub fn get(&self, i: usize) -> &BoolValue {
        &self.bits[i]
    }

    pub fn set(&mut self, i: usize, value: impl Into<BoolValue>) {
        self.bits[i] = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoolValue> + '_ {
        self.bits.iter()
    }

    pub fn bits(&self) -> &[BoolValue; W] {
        &self.bits
    }

    /// Total number of disjuncts over all bits.
    pub fn size(&self) -> usize {
        self.bits.iter().map(BoolValue::size).sum()
    }

    pub fn is_const(&self) -> bool {
        self.bits.iter().all(BoolValue::is_const)
    }

    /// Numeric value if every bit is constant and `W <= 64`.
    pub fn to_u64(&self) -> Option<u64> {
        if W > 64 {
            return None;
        }
        self.bits.iter().enumerate().try_fold(0u64, |acc, (i, bit)| {
            bit.as_const().map(|b| acc | ((b as u64) << i))
        })
    }

    /// Numeric value under a variable assignment.
    ///
    /// # Panics
    ///
    /// Panics if `W > 64`.
    pub fn eval(&self, env: &HashMap<Var, bool>) -> Result<u64, EvalError> {
        assert!(W <= 64, "Width {} does not fit into u64", W);
        let mut value = 0u64;
        for (i, bit) in self.bits.iter().enumerate() {
            if bit.eval(env)? {
                value |= 1u64 << i;
            }
        }
        Ok(value)
    }

    /// `(self << n) | (self >> (W - n))`, with `n` taken modulo `W`.
    pub fn rotate_left(&self, n: usize) -> Self {
        if W == 0 {
            return self.clone();
        }
        let n = n % W;
        Self::from_fn(|i| self.bits[(i + W - n) % W].clone())
    }

    pub fn try_not(&self) -> Result<Self, FormulaError> {
        Self::try_from_fn(|i| self.bits[i].try_not())
    }

    pub fn try_and(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Self::try_from_fn(|i| self.bits[i].try_and(&rhs.bits[i]))
    }

    pub fn try_or(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Self::try_from_fn(|i| self.bits[i].try_or(&rhs.bits[i]))
    }

    pub fn try_xor(&self, rhs: &Self) -> Result<Self, FormulaError> {
        Self::try_from_fn(|i| self.bits[i].try_xor(&rhs.bits[i]))
    }

    /// Modular addition via a ripple-carry chain.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, FormulaError> {
        ripple_add(&self.bits, &rhs.bits).map(Self::from_exact)
    }

    fn try_from_fn(f: impl FnMut(usize) -> Result<BoolValue, FormulaError>) -> Result<Self, FormulaError> {
        let bits = (0..W).map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_exact(bits))
    }

    /// Takes a vector already known to hold `W` bits.
    fn from_exact(bits: Vec<BoolValue>) -> Self {
        debug_assert_eq!(bits.len(), W);
        let mut bits = bits.into_iter();
        Self::from_fn(|_| bits.next().unwrap_or_default())
    }
}

impl<const W: usize> From<u64> for BitVector<W> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<const W: usize> From<u32> for BitVector<W> {
    fn from(value: u32) -> Self {
        Self::from_u64(value as u64)
    }
}

impl<const W: usize> From<u8> for BitVector<W> {
    fn from(value: u8) -> Self {
        Self::from_u64(value as u64)
    }
}

impl<const W: usize> From<[BoolValue; W]> for BitVector<W> {
    fn from(bits: [BoolValue; W]) -> Self {
        BitVector { bits }
    }
}

impl<const W: usize> TryFrom<Vec<BoolValue>> for BitVector<W> {
    type Error = WidthError;

    fn try_from(bits: Vec<BoolValue>) -> Result<Self, Self::Error> {
        let actual = bits.len();
        let bits: [BoolValue; W] = bits.try_into().map_err(|_| WidthError { expected: W, actual })?;
        Ok(BitVector { bits })
    }
}

impl<const W: usize> Index<usize> for BitVector<W> {
    type Output = BoolValue;

    fn index(&self, i: usize) -> &Self::Output {
        &self.bits[i]
    }
}

impl<const W: usize> Not for &BitVector<W> {
    type Output = BitVector<W>;

    fn not(self) -> Self::Output {
        check(self.try_not())
    }
}

impl<const W: usize> Not for BitVector<W> {
    type Output = BitVector<W>;

    fn not(self) -> Self::Output {
        !&self
    }
}

macro_rules! impl_bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $try_method:ident) => {
        impl<const W: usize> $trait<&BitVector<W>> for &BitVector<W> {
            type Output = BitVector<W>;

            fn $method(self, rhs: &BitVector<W>) -> Self::Output {
                check(self.$try_method(rhs))
            }
        }

        impl<const W: usize> $trait for BitVector<W> {
            type Output = BitVector<W>;

            fn $method(self, rhs: BitVector<W>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl<const W: usize> $trait<&BitVector<W>> for BitVector<W> {
            type Output = BitVector<W>;

            fn $method(self, rhs: &BitVector<W>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<const W: usize> $assign_trait<&BitVector<W>> for BitVector<W> {
            fn $assign_method(&mut self, rhs: &BitVector<W>) {
                *self = (&*self).$method(rhs);
            }
        }

        impl<const W: usize> $assign_trait for BitVector<W> {
            fn $assign_method(&mut self, rhs: BitVector<W>) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, try_and);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, try_or);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, try_xor);

/// Modular addition via a ripple-carry chain.
impl<const W: usize> Add<&BitVector<W>> for &BitVector<W> {
    type Output = BitVector<W>;

    fn add(self, rhs: &BitVector<W>) -> Self::Output {
        check(self.try_add(rhs))
    }
}

impl<const W: usize> Add for BitVector<W> {
    type Output = BitVector<W>;

    fn add(self, rhs: BitVector<W>) -> Self::Output {
        &self + &rhs
    }
}

impl<const W: usize> Add<&BitVector<W>> for BitVector<W> {
    type Output = BitVector<W>;

    fn add(self, rhs: &BitVector<W>) -> Self::Output {
        &self + rhs
    }
}

impl<const W: usize> AddAssign<&BitVector<W>> for BitVector<W> {
    fn add_assign(&mut self, rhs: &BitVector<W>) {
        *self = &*self + rhs;
    }
}

impl<const W: usize> AddAssign for BitVector<W> {
    fn add_assign(&mut self, rhs: BitVector<W>) {
        *self = &*self + &rhs;
    }
}

/// Logical shift towards higher indices, zero-filled.
impl<const W: usize> Shl<usize> for &BitVector<W> {
    type Output = BitVector<W>;

    fn shl(self, sz: usize) -> Self::Output {
        BitVector::from_fn(|i| {
            if i < sz {
                BoolValue::zero()
            } else {
                self.bits[i - sz].clone()
            }
        })
    }
}

impl<const W: usize> Shl<usize> for BitVector<W> {
    type Output = BitVector<W>;

    fn shl(self, sz: usize) -> Self::Output {
        &self << sz
    }
}

/// Logical shift towards lower indices, zero-filled.
impl<const W: usize> Shr<usize> for &BitVector<W> {
    type Output = BitVector<W>;

    fn shr(self, sz: usize) -> Self::Output {
        BitVector::from_fn(|i| match i.checked_add(sz) {
            Some(j) if j < W => self.bits[j].clone(),
            _ => BoolValue::zero(),
        })
    }
}

impl<const W: usize> Shr<usize> for BitVector<W> {
    type Output = BitVector<W>;

    fn shr(self, sz: usize) -> Self::Output {
        &self >> sz
    }
}

impl<const W: usize> fmt::Display for BitVector<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (i, bit) in self.bits.iter().enumerate() {
            writeln!(f, "    [{}] = {{{}}},", i, bit)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::config::FormulaConfig;

    #[test]
    fn test_from_u64() {
        let v = BitVector::<8>::from_u64(0b1010_0110);
        let bits: Vec<_> = v.iter().map(|b| b.as_const().unwrap()).collect();
        assert_eq!(bits, [false, true, true, false, false, true, false, true]);
        assert_eq!(v.to_u64(), Some(0b1010_0110));
        assert_eq!(BitVector::<4>::from_u64(0xff).to_u64(), Some(0xf));
    }

    #[test]
    fn test_resize() {
        let v = BitVector::<8>::from_u64(0xa5);
        assert_eq!(v.resize::<4>().to_u64(), Some(0x5));
        assert_eq!(v.resize::<32>().to_u64(), Some(0xa5));
        assert_eq!(v.resize::<8>(), v);
    }

    #[test]
    fn test_resize_symbolic() {
        let v = BitVector::<4>::symbolic("x", 0);
        let w = v.resize::<8>();
        assert_eq!(w[3], BoolValue::var("x", 3));
        assert!(w[4].is_false());
    }

    #[test]
    fn test_try_from_vec() {
        let ok = BitVector::<2>::try_from(vec![BoolValue::one(), BoolValue::zero()]);
        assert_eq!(ok.unwrap().to_u64(), Some(1));
        let err = BitVector::<3>::try_from(vec![BoolValue::one()]).unwrap_err();
        assert_eq!(err, WidthError { expected: 3, actual: 1 });
    }

    #[test]
    fn test_add_exhaustive_8() {
        for x in 0..=255u64 {
            for y in 0..=255u64 {
                let sum = BitVector::<8>::from(x) + BitVector::<8>::from(y);
                assert_eq!(sum.to_u64(), Some((x + y) & 0xff), "{} + {}", x, y);
            }
        }
    }

    #[test]
    fn test_add_random_32() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x: u32 = rng.gen();
            let y: u32 = rng.gen();
            let sum = BitVector::<32>::from(x) + BitVector::<32>::from(y);
            assert_eq!(sum.to_u64(), Some(x.wrapping_add(y) as u64));
        }
    }

    #[test]
    fn test_bitwise_ops() {
        let a = BitVector::<8>::from(0b1100_1010u8);
        let b = BitVector::<8>::from(0b1010_0110u8);
        assert_eq!((&a & &b).to_u64(), Some(0b1000_0010));
        assert_eq!((&a | &b).to_u64(), Some(0b1110_1110));
        assert_eq!((&a ^ &b).to_u64(), Some(0b0110_1100));
        assert_eq!((!&a).to_u64(), Some(0b0011_0101));
    }

    #[test]
    fn test_shift_laws() {
        let v = BitVector::<8>::symbolic("x", 0);
        for s in 0..=8 {
            let res = &(&v << s) >> s;
            for i in 0..8 {
                if i < 8 - s {
                    assert_eq!(res[i], v[i], "s = {}, i = {}", s, i);
                } else {
                    assert!(res[i].is_false(), "s = {}, i = {}", s, i);
                }
            }
        }
    }

    #[test]
    fn test_shift_concrete() {
        let v = BitVector::<8>::from(0b1001_0011u8);
        assert_eq!((&v << 2).to_u64(), Some(0b0100_1100));
        assert_eq!((&v >> 3).to_u64(), Some(0b0001_0010));
        assert_eq!((&v << 9).to_u64(), Some(0));
        assert_eq!((&v >> usize::MAX).to_u64(), Some(0));
    }

    #[test]
    fn test_rotate_left() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let x: u32 = rng.gen();
            let n = rng.gen_range(0..40);
            let v = BitVector::<32>::from(x).rotate_left(n);
            assert_eq!(v.to_u64(), Some(x.rotate_left(n as u32) as u64));
        }
    }

    #[test]
    fn test_symbolic_add_eval() {
        let x = BitVector::<3>::symbolic("x", 0);
        let y = BitVector::<3>::symbolic("y", 0);
        let sum = &x + &y;
        for a in 0..8u64 {
            for b in 0..8u64 {
                let mut env = HashMap::new();
                for i in 0..3 {
                    env.insert(Var::new("x", i), (a >> i) & 1 == 1);
                    env.insert(Var::new("y", i), (b >> i) & 1 == 1);
                }
                assert_eq!(sum.eval(&env), Ok((a + b) % 8));
            }
        }
    }

    #[test]
    fn test_compound_assign() {
        let mut v = BitVector::<8>::from(3u8);
        v += BitVector::from(5u8);
        assert_eq!(v.to_u64(), Some(8));
        v |= BitVector::from(1u8);
        v &= BitVector::from(0x0fu8);
        v ^= BitVector::from(0x01u8);
        assert_eq!(v.to_u64(), Some(8));
    }

    #[test]
    fn test_try_ops_report_product_limit() {
        let x = BitVector::<2>::symbolic("x", 0);
        let y = BitVector::<2>::symbolic("y", 0);
        let wide = &x | &y.rotate_left(1);
        let res = FormulaConfig::bounded(1).scope(|| wide.try_and(&wide.rotate_left(1)));
        assert!(matches!(res, Err(FormulaError::ProductTooLarge { left: 2, right: 2, limit: 1 })));
        assert!(FormulaConfig::bounded(1).scope(|| x.try_add(&y)).is_err());
        assert_eq!(wide.try_and(&wide).unwrap(), wide);
    }

    #[test]
    fn test_display() {
        let mut v = BitVector::<2>::zero();
        v.set(1, BoolValue::var("x", 0));
        assert_eq!(v.to_string(), "{\n    [0] = {0},\n    [1] = {(x[0])},\n}");
    }
}
