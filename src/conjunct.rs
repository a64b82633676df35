//! Conjunctions of literals.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Not;

use crate::formula::Formula;
use crate::types::{Lit, Var};

/// A set of literals, semantically their logical AND.
///
/// The empty conjunct is TRUE. A conjunct holding both polarities of some
/// variable is FALSE; such a conjunct may exist transiently while a formula is
/// being built, but [`Formula`] never stores one.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Conjunct {
    lits: BTreeSet<Lit>,
}

impl Conjunct {
    /// The empty (TRUE) conjunct.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Literals in ascending order.
    pub fn literals(&self) -> impl Iterator<Item = &Lit> + '_ {
        self.lits.iter()
    }

    pub fn contains(&self, lit: &Lit) -> bool {
        self.lits.contains(lit)
    }

    /// Variables mentioned by this conjunct.
    pub fn vars(&self) -> impl Iterator<Item = &Var> + '_ {
        self.lits.iter().map(Lit::var)
    }

    /// Returns `true` if some variable appears with both polarities.
    pub fn is_contradictory(&self) -> bool {
        // Both polarities of one variable are neighbours in literal order.
        let mut prev: Option<&Lit> = None;
        for lit in &self.lits {
            if let Some(p) = prev {
                if p.var() == lit.var() {
                    return true;
                }
            }
            prev = Some(lit);
        }
        false
    }

    /// Returns `true` if every literal of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Conjunct) -> bool {
        self.lits.len() <= other.lits.len() && self.lits.is_subset(&other.lits)
    }

    /// The single literal of a unit conjunct.
    pub fn as_unit(&self) -> Option<&Lit> {
        if self.lits.len() == 1 {
            self.lits.first()
        } else {
            None
        }
    }

    /// Union of both literal sets, without the contradiction check.
    pub(crate) fn union(&self, other: &Conjunct) -> Conjunct {
        let (big, small) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut lits = big.lits.clone();
        lits.extend(small.lits.iter().cloned());
        Conjunct { lits }
    }

    /// Conjunction of two conjuncts, `None` if the result is FALSE.
    pub fn and(&self, other: &Conjunct) -> Option<Conjunct> {
        let merged = self.union(other);
        if merged.is_contradictory() {
            None
        } else {
            Some(merged)
        }
    }

    /// Conjunct restricted by `var := value`, `None` if it becomes FALSE.
    pub(crate) fn restrict(&self, var: &Var, value: bool) -> Option<Conjunct> {
        let falsified = Lit::new(var.clone(), value);
        if self.lits.contains(&falsified) {
            return None;
        }
        let mut lits = self.lits.clone();
        lits.remove(&!falsified);
        Some(Conjunct { lits })
    }

    /// Evaluates the conjunct, reporting the first literal whose variable
    /// `lookup` has no value for.
    pub(crate) fn eval_with<F>(&self, lookup: &F) -> Result<bool, Var>
    where
        F: Fn(&Var) -> Option<bool>,
    {
        for lit in &self.lits {
            match lookup(lit.var()) {
                Some(value) if lit.apply(value) => {}
                Some(_) => return Ok(false),
                None => return Err(lit.var().clone()),
            }
        }
        Ok(true)
    }
}

impl From<Lit> for Conjunct {
    fn from(lit: Lit) -> Self {
        Conjunct {
            lits: BTreeSet::from([lit]),
        }
    }
}

impl FromIterator<Lit> for Conjunct {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Conjunct {
            lits: iter.into_iter().collect(),
        }
    }
}

/// De Morgan: `~(l1 & ... & ln) = ~l1 | ... | ~ln`.
///
/// # Panics
///
/// Panics on the empty conjunct, whose negation is the constant FALSE.
impl Not for &Conjunct {
    type Output = Formula;

    fn not(self) -> Self::Output {
        assert!(!self.is_empty(), "Negation of the empty conjunct is constant");
        Formula::from_disjuncts_unchecked(self.lits.iter().map(|lit| Conjunct::from(!lit)).collect())
    }
}

impl Not for Conjunct {
    type Output = Formula;

    fn not(self) -> Self::Output {
        !&self
    }
}

impl fmt::Display for Conjunct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
