//! Boolean formulas in disjunctive normal form.
//!
//! A [`Formula`] is a set of [`Conjunct`]s, semantically their logical OR.
//! Every operation ends with a [`reduce`](Formula::reduce) pass that keeps the
//! representation small and returns a [`BoolValue`], so a formula that
//! collapses to a constant is never handed out as a `Formula`.
//!
//! ## Reduction
//!
//! 1. **Cancellation.** Contradictory disjuncts (`x & ~x & ...`) are dropped.
//!    No disjuncts left means FALSE, an empty (TRUE) disjunct means TRUE.
//! 2. **Complement pairs.** If a unit disjunct `l` and its complement `~l` are
//!    both present, the formula is TRUE.
//! 3. **Absorption.** A disjunct whose literal set contains the literal set of
//!    another disjunct is redundant (`a | (a & b) = a`) and is removed.
//!
//! Passes 2 and 3 only run under [`Reduction::Full`].
//! This is not a minimisation procedure: a tautology such as
//! `(x & y) | (x & ~y) | ~x` stays in non-constant form.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use log::trace;

use crate::config::{FormulaConfig, Reduction};
use crate::conjunct::Conjunct;
use crate::error::{EvalError, FormulaError};
use crate::types::{Lit, Var};
use crate::value::BoolValue;

/// A non-constant boolean formula in DNF.
///
/// Invariants: at least one disjunct, no contradictory or empty disjunct,
/// and (under full reduction) no disjunct absorbed by another.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Formula {
    disjuncts: BTreeSet<Conjunct>,
}

impl Formula {
    /// Wraps an already normalized disjunct set.
    pub(crate) fn from_disjuncts_unchecked(disjuncts: BTreeSet<Conjunct>) -> Self {
        debug_assert!(!disjuncts.is_empty());
        Formula { disjuncts }
    }

    /// Builds the disjunction of `conjuncts` and reduces it.
    pub fn from_conjuncts(conjuncts: impl IntoIterator<Item = Conjunct>) -> BoolValue {
        Self::reduce(conjuncts.into_iter().collect(), &FormulaConfig::current())
    }

    /// Number of disjuncts.
    pub fn len(&self) -> usize {
        self.disjuncts.len()
    }

    /// Always `false`: an empty formula is represented as constant FALSE.
    pub fn is_empty(&self) -> bool {
        self.disjuncts.is_empty()
    }

    /// Disjuncts in canonical order.
    pub fn disjuncts(&self) -> impl Iterator<Item = &Conjunct> + '_ {
        self.disjuncts.iter()
    }

    /// Set of variables the formula mentions.
    pub fn support(&self) -> BTreeSet<Var> {
        self.disjuncts
            .iter()
            .flat_map(|c| c.vars().cloned())
            .collect()
    }

    /// Normalizes a disjunct set into a [`BoolValue`].
    pub fn reduce(disjuncts: BTreeSet<Conjunct>, config: &FormulaConfig) -> BoolValue {
        let before = disjuncts.len();

        // Pass 1: cancellation.
        let mut live = BTreeSet::new();
        for c in disjuncts {
            if c.is_empty() {
                return BoolValue::Const(true);
            }
            if !c.is_contradictory() {
                live.insert(c);
            }
        }
        if live.is_empty() {
            trace!("reduce: {} disjuncts cancelled to 0", before);
            return BoolValue::Const(false);
        }

        if config.reduction == Reduction::CancelOnly {
            return BoolValue::Expr(Formula { disjuncts: live });
        }

        // Pass 2: complement pairs.
        for c in &live {
            if let Some(lit) = c.as_unit() {
                if live.contains(&Conjunct::from(!lit)) {
                    trace!("reduce: complement pair on {}", lit.var());
                    return BoolValue::Const(true);
                }
            }
        }

        // Pass 3: absorption. A strict subset is always shorter, so checking
        // candidates by ascending length against the kept ones is enough.
        let mut by_len: Vec<Conjunct> = live.into_iter().collect();
        by_len.sort_by_key(Conjunct::len);
        let mut kept: Vec<Conjunct> = Vec::with_capacity(by_len.len());
        for c in by_len {
            if !kept.iter().any(|k| k.is_subset_of(&c)) {
                kept.push(c);
            }
        }

        trace!("reduce: {} -> {} disjuncts", before, kept.len());
        BoolValue::Expr(Formula {
            disjuncts: kept.into_iter().collect(),
        })
    }

    /// Disjunction: union of the disjunct sets.
    pub fn or(&self, other: &Formula, config: &FormulaConfig) -> BoolValue {
        let mut disjuncts = self.disjuncts.clone();
        disjuncts.extend(other.disjuncts.iter().cloned());
        Self::reduce(disjuncts, config)
    }

    /// Conjunction: pairwise AND of all disjuncts (distributing AND over OR).
    pub fn and(&self, other: &Formula, config: &FormulaConfig) -> Result<BoolValue, FormulaError> {
        let (left, right) = (self.len(), other.len());
        if let Some(limit) = config.max_product {
            if left.saturating_mul(right) > limit {
                return Err(FormulaError::ProductTooLarge { left, right, limit });
            }
        }
        trace!("and: product of {} x {} disjuncts", left, right);

        let mut disjuncts = BTreeSet::new();
        for a in &self.disjuncts {
            for b in &other.disjuncts {
                disjuncts.insert(a.union(b));
            }
        }
        Ok(Self::reduce(disjuncts, config))
    }

    /// Negation: AND of the negations of all disjuncts.
    pub fn not(&self, config: &FormulaConfig) -> Result<BoolValue, FormulaError> {
        let mut iter = self.disjuncts.iter();
        let mut acc = match iter.next() {
            Some(first) => BoolValue::Expr(!first),
            None => return Ok(BoolValue::Const(true)),
        };
        for c in iter {
            acc = acc.and_with(&BoolValue::Expr(!c), config)?;
            if acc.is_false() {
                break;
            }
        }
        Ok(acc)
    }

    /// Cofactor with respect to `var := value`.
    pub fn restrict(&self, var: &Var, value: bool, config: &FormulaConfig) -> BoolValue {
        let disjuncts = self
            .disjuncts
            .iter()
            .filter_map(|c| c.restrict(var, value))
            .collect();
        Self::reduce(disjuncts, config)
    }

    /// Evaluates the formula, `lookup` supplies variable values.
    pub fn eval_with<F>(&self, lookup: F) -> Result<bool, EvalError>
    where
        F: Fn(&Var) -> Option<bool>,
    {
        for c in &self.disjuncts {
            if c.eval_with(&lookup).map_err(EvalError::Unassigned)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Evaluates the formula under a complete assignment.
    pub fn eval(&self, env: &HashMap<Var, bool>) -> Result<bool, EvalError> {
        self.eval_with(|v| env.get(v).copied())
    }
}

impl From<Lit> for Formula {
    fn from(lit: Lit) -> Self {
        Formula::from_disjuncts_unchecked(BTreeSet::from([Conjunct::from(lit)]))
    }
}

impl From<Var> for Formula {
    fn from(var: Var) -> Self {
        Formula::from(Lit::pos(var))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.disjuncts.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "({})", c)?;
        }
        Ok(())
    }
}
