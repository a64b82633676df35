//! Variables and literals.
//!
//! A [`Var`] names one boolean input bit, a [`Lit`] is a variable with a polarity.
//! Both are totally ordered, and this order fixes the iteration order of
//! conjuncts and formulas (and therefore their printed form).
use std::fmt;
use std::ops::Not;
use std::sync::Arc;

/// A named boolean input bit, identified by `(name, index)`.
///
/// Variables are compared by name first, then by index.
/// The name is shared, so cloning a variable is cheap.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var {
    name: Arc<str>,
    index: u32,
}

impl Var {
    /// Creates a new variable `name[index]`.
    pub fn new(name: impl Into<Arc<str>>, index: u32) -> Self {
        Var {
            name: name.into(),
            index,
        }
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variable index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Positive literal of this variable.
    pub fn pos(&self) -> Lit {
        Lit::pos(self.clone())
    }

    /// Negative literal of this variable.
    pub fn neg(&self) -> Lit {
        Lit::neg(self.clone())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

/// A variable together with its polarity.
///
/// Literals are ordered by variable, then by polarity (positive first),
/// so both polarities of one variable are always adjacent in a sorted set.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub fn new(var: Var, negated: bool) -> Self {
        Lit { var, negated }
    }

    pub fn pos(var: Var) -> Self {
        Lit::new(var, false)
    }

    pub fn neg(var: Var) -> Self {
        Lit::new(var, true)
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    /// Value of this literal when its variable is assigned `value`.
    pub fn apply(&self, value: bool) -> bool {
        value != self.negated
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit::new(self.var, !self.negated)
    }
}

impl Not for &Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit::new(self.var.clone(), !self.negated)
    }
}

impl From<Var> for Lit {
    fn from(var: Var) -> Self {
        Lit::pos(var)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        write!(f, "{}", self.var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_order() {
        let a0 = Var::new("a", 0);
        let a1 = Var::new("a", 1);
        let b0 = Var::new("b", 0);
        assert!(a0 < a1);
        assert!(a1 < b0);
        assert_eq!(a0, Var::new("a", 0));
    }

    #[test]
    fn test_var_display() {
        assert_eq!(Var::new("x", 7).to_string(), "x[7]");
    }

    #[test]
    fn test_lit_negation() {
        let x = Var::new("x", 0);
        let pos = x.pos();
        let neg = !&pos;
        assert!(pos.is_positive());
        assert!(neg.is_negated());
        assert_eq!(neg.var(), &x);
        assert_eq!(!neg, pos);
    }

    #[test]
    fn test_lit_order() {
        let x = Var::new("x", 0);
        let y = Var::new("x", 1);
        assert!(x.pos() < x.neg());
        assert!(x.neg() < y.pos());
    }

    #[test]
    fn test_lit_display() {
        let x = Var::new("x", 3);
        assert_eq!(x.pos().to_string(), "x[3]");
        assert_eq!(x.neg().to_string(), "~x[3]");
    }

    #[test]
    fn test_lit_apply() {
        let x = Var::new("x", 0);
        assert!(x.pos().apply(true));
        assert!(!x.pos().apply(false));
        assert!(x.neg().apply(false));
        assert!(!x.neg().apply(true));
    }
}
