//! The scalar "bit" type: a constant or a formula.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::config::FormulaConfig;
use crate::error::{EvalError, FormulaError};
use crate::formula::Formula;
use crate::types::{Lit, Var};

/// A boolean value that is either known (`Const`) or symbolic (`Expr`).
///
/// An `Expr` never holds a formula that reduced to a constant; every operation
/// collapses such results eagerly. Binary operations short-circuit on constant
/// operands before touching formulas.
///
/// Operators use the current thread's [`FormulaConfig`] and panic if a
/// configured product limit is exceeded; use the `*_with` methods to get the
/// error instead.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BoolValue {
    Const(bool),
    Expr(Formula),
}

impl Default for BoolValue {
    fn default() -> Self {
        BoolValue::Const(false)
    }
}

impl BoolValue {
    pub const fn zero() -> Self {
        BoolValue::Const(false)
    }

    pub const fn one() -> Self {
        BoolValue::Const(true)
    }

    pub const fn constant(value: bool) -> Self {
        BoolValue::Const(value)
    }

    /// The positive literal `name[index]`.
    pub fn var(name: &str, index: u32) -> Self {
        BoolValue::from(Var::new(name, index))
    }

    pub fn as_const(&self) -> Option<bool> {
        match self {
            BoolValue::Const(b) => Some(*b),
            BoolValue::Expr(_) => None,
        }
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            BoolValue::Const(_) => None,
            BoolValue::Expr(f) => Some(f),
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, BoolValue::Const(_))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, BoolValue::Const(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, BoolValue::Const(false))
    }

    /// Number of disjuncts, 0 for constants.
    pub fn size(&self) -> usize {
        self.as_formula().map_or(0, Formula::len)
    }

    pub fn support(&self) -> BTreeSet<Var> {
        self.as_formula().map(Formula::support).unwrap_or_default()
    }

    pub fn not_with(&self, config: &FormulaConfig) -> Result<BoolValue, FormulaError> {
        match self {
            BoolValue::Const(b) => Ok(BoolValue::Const(!b)),
            BoolValue::Expr(f) => f.not(config),
        }
    }

    pub fn or_with(&self, other: &BoolValue, config: &FormulaConfig) -> BoolValue {
        match (self, other) {
            (BoolValue::Const(true), _) | (_, BoolValue::Const(true)) => BoolValue::Const(true),
            (BoolValue::Const(false), x) | (x, BoolValue::Const(false)) => x.clone(),
            (BoolValue::Expr(a), BoolValue::Expr(b)) => a.or(b, config),
        }
    }

    pub fn and_with(&self, other: &BoolValue, config: &FormulaConfig) -> Result<BoolValue, FormulaError> {
        match (self, other) {
            (BoolValue::Const(false), _) | (_, BoolValue::Const(false)) => Ok(BoolValue::Const(false)),
            (BoolValue::Const(true), x) | (x, BoolValue::Const(true)) => Ok(x.clone()),
            (BoolValue::Expr(a), BoolValue::Expr(b)) => a.and(b, config),
        }
    }

    /// `(a & ~b) | (~a & b)`.
    pub fn xor_with(&self, other: &BoolValue, config: &FormulaConfig) -> Result<BoolValue, FormulaError> {
        let left = self.and_with(&other.not_with(config)?, config)?;
        let right = self.not_with(config)?.and_with(other, config)?;
        Ok(left.or_with(&right, config))
    }

    /// Cofactor with respect to `var := value`.
    pub fn restrict(&self, var: &Var, value: bool) -> BoolValue {
        match self {
            BoolValue::Const(_) => self.clone(),
            BoolValue::Expr(f) => f.restrict(var, value, &FormulaConfig::current()),
        }
    }

    /// Evaluates the value, `lookup` supplies variable values.
    pub fn eval_with<F>(&self, lookup: F) -> Result<bool, EvalError>
    where
        F: Fn(&Var) -> Option<bool>,
    {
        match self {
            BoolValue::Const(b) => Ok(*b),
            BoolValue::Expr(f) => f.eval_with(lookup),
        }
    }

    pub fn eval(&self, env: &HashMap<Var, bool>) -> Result<bool, EvalError> {
        self.eval_with(|v| env.get(v).copied())
    }
}

pub(crate) fn check<T>(result: Result<T, FormulaError>) -> T {
    result.unwrap_or_else(|err| panic!("{}", err))
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        BoolValue::Const(value)
    }
}

impl From<Lit> for BoolValue {
    fn from(lit: Lit) -> Self {
        BoolValue::Expr(Formula::from(lit))
    }
}

impl From<Var> for BoolValue {
    fn from(var: Var) -> Self {
        BoolValue::Expr(Formula::from(var))
    }
}

impl From<Formula> for BoolValue {
    fn from(formula: Formula) -> Self {
        BoolValue::Expr(formula)
    }
}

impl Not for &BoolValue {
    type Output = BoolValue;

    fn not(self) -> Self::Output {
        check(self.not_with(&FormulaConfig::current()))
    }
}

impl Not for BoolValue {
    type Output = BoolValue;

    fn not(self) -> Self::Output {
        !&self
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, |$a:ident, $b:ident, $config:ident| $body:expr) => {
        impl $trait<&BoolValue> for &BoolValue {
            type Output = BoolValue;

            fn $method(self, rhs: &BoolValue) -> Self::Output {
                let ($a, $b, $config) = (self, rhs, FormulaConfig::current());
                $body
            }
        }

        impl $trait for BoolValue {
            type Output = BoolValue;

            fn $method(self, rhs: BoolValue) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BoolValue> for BoolValue {
            type Output = BoolValue;

            fn $method(self, rhs: &BoolValue) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl $assign_trait<&BoolValue> for BoolValue {
            fn $assign_method(&mut self, rhs: &BoolValue) {
                *self = (&*self).$method(rhs);
            }
        }

        impl $assign_trait for BoolValue {
            fn $assign_method(&mut self, rhs: BoolValue) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b, config| check(a.and_with(b, &config)));
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b, config| a.or_with(b, &config));
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b, config| check(a.xor_with(b, &config)));

impl fmt::Display for BoolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolValue::Const(b) => write!(f, "{}", *b as u8),
            BoolValue::Expr(formula) => write!(f, "{}", formula),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const T: BoolValue = BoolValue::one();
    const F: BoolValue = BoolValue::zero();

    #[test]
    fn test_constants() {
        assert_eq!(!&T, F);
        assert_eq!(!&F, T);
        assert_eq!(T.to_string(), "1");
        assert_eq!(F.to_string(), "0");
    }

    #[test]
    fn test_short_circuit() {
        let x = BoolValue::var("x", 0);
        assert_eq!(&T | &x, T);
        assert_eq!(&F | &x, x);
        assert_eq!(&F & &x, F);
        assert_eq!(&T & &x, x);
        assert_eq!(&x | &T, T);
        assert_eq!(&x & &F, F);
    }

    #[test]
    fn test_xor_truth_table() {
        for (a, b, expected) in [(F, F, F), (F, T, T), (T, F, T), (T, T, F)] {
            assert_eq!(&a ^ &b, expected, "{} ^ {}", a, b);
        }
    }

    #[test]
    fn test_double_negation_literal() {
        let x = BoolValue::var("x", 0);
        assert_eq!(!!x.clone(), x);
    }

    #[test]
    fn test_double_negation_keeps_consensus_term() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        let c = BoolValue::var("c", 0);
        let f = &(&a & &b) | &(&!&a & &c);
        let twice = !!f.clone();
        // Absorption cannot remove the consensus `b & c`, so the form differs.
        assert_eq!(twice.to_string(), "(a[0] & b[0]) | (~a[0] & c[0]) | (b[0] & c[0])");
        assert_ne!(twice, f);
        assert!(twice.is_equivalent(&f));
    }

    #[test]
    fn test_contradiction_is_false() {
        let x = BoolValue::var("x", 0);
        assert_eq!(&x & &!&x, F);
    }

    #[test]
    fn test_complement_is_true() {
        let x = BoolValue::var("x", 0);
        assert_eq!(&x | &!&x, T);
    }

    #[test]
    fn test_absorption() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        assert_eq!(&a | &(&a & &b), a);
    }

    #[test]
    fn test_de_morgan() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        assert_eq!(!(&a & &b), &!&a | &!&b);
        assert_eq!(!(&a | &b), &!&a & &!&b);
    }

    #[test]
    fn test_xor_self_is_false() {
        let a = BoolValue::var("a", 0);
        assert_eq!(&a ^ &a, F);
        assert_eq!(&a ^ &!&a, T);
    }

    #[test]
    fn test_xor_display() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 1);
        assert_eq!((&a ^ &b).to_string(), "(a[0] & ~b[1]) | (~a[0] & b[1])");
    }

    #[test]
    fn test_assign_ops() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        let mut x = a.clone();
        x |= &b;
        assert_eq!(x, &a | &b);
        x &= F;
        assert_eq!(x, F);
        x ^= T;
        assert_eq!(x, T);
    }

    #[test]
    fn test_product_limit_with() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        let c = BoolValue::var("c", 0);
        let d = BoolValue::var("d", 0);
        let left = &a | &b;
        let right = &c | &d;
        let config = FormulaConfig::bounded(3);
        assert!(matches!(
            left.and_with(&right, &config),
            Err(FormulaError::ProductTooLarge { left: 2, right: 2, limit: 3 })
        ));
    }

    #[test]
    #[should_panic(expected = "exceeds the product limit")]
    fn test_product_limit_operator_panics() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        let left = &a | &b;
        let right = &!&a | &!&b;
        FormulaConfig::bounded(1).scope(|| &left & &right);
    }

    #[test]
    fn test_cancel_only_keeps_tautology_symbolic() {
        let a = BoolValue::var("a", 0);
        let res = FormulaConfig::fast().scope(|| &a | &!&a);
        assert_eq!(res.size(), 2);
        let res = &a | &!&a;
        assert_eq!(res, T);
    }

    #[test]
    fn test_eval() {
        let a = BoolValue::var("a", 0);
        let b = BoolValue::var("b", 0);
        let f = &a ^ &b;
        for x in [false, true] {
            for y in [false, true] {
                let env = HashMap::from([(Var::new("a", 0), x), (Var::new("b", 0), y)]);
                assert_eq!(f.eval(&env), Ok(x != y));
            }
        }
    }
}
