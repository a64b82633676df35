use std::collections::BTreeSet;

use num_bigint::BigUint;

use crate::types::{Lit, Var};
use crate::value::BoolValue;

impl BoolValue {
    /// Returns one satisfying assignment, if any exists.
    ///
    /// The assignment is given as literals over the support of the value;
    /// variables not mentioned are unconstrained. Returns `None` for FALSE.
    pub fn one_sat(&self) -> Option<Vec<Lit>> {
        match self {
            BoolValue::Const(false) => None,
            BoolValue::Const(true) => Some(Vec::new()),
            // Every stored disjunct is non-contradictory, so any of them is a model.
            BoolValue::Expr(f) => f.disjuncts().next().map(|c| c.literals().cloned().collect()),
        }
    }

    /// Number of satisfying assignments over `num_vars` variables.
    ///
    /// Computed by Shannon expansion on the support variables.
    ///
    /// # Panics
    ///
    /// Panics if the support has more than `num_vars` variables.
    pub fn sat_count(&self, num_vars: usize) -> BigUint {
        let support = self.support();
        assert!(
            support.len() <= num_vars,
            "Support of {} variables does not fit into {} variables",
            support.len(),
            num_vars
        );
        let support: Vec<Var> = support.into_iter().collect();
        let free = num_vars - support.len();
        count(self, &support) << free
    }

    /// Returns `true` if both values denote the same boolean function.
    ///
    /// Decided by enumerating the joint support, so only practical for a small
    /// number of variables.
    pub fn is_equivalent(&self, other: &BoolValue) -> bool {
        let support: BTreeSet<Var> = self.support().union(&other.support()).cloned().collect();
        let support: Vec<Var> = support.into_iter().collect();
        equivalent(self, other, &support)
    }
}

fn count(value: &BoolValue, vars: &[Var]) -> BigUint {
    match (value, vars.split_first()) {
        (BoolValue::Const(false), _) => BigUint::ZERO,
        (BoolValue::Const(true), _) => BigUint::from(1u8) << vars.len(),
        (BoolValue::Expr(_), Some((var, rest))) => {
            count(&value.restrict(var, false), rest) + count(&value.restrict(var, true), rest)
        }
        (BoolValue::Expr(_), None) => unreachable!("formula with empty support"),
    }
}

fn equivalent(a: &BoolValue, b: &BoolValue, vars: &[Var]) -> bool {
    if let (Some(x), Some(y)) = (a.as_const(), b.as_const()) {
        return x == y;
    }
    match vars.split_first() {
        None => a == b,
        Some((var, rest)) => {
            [false, true]
                .into_iter()
                .all(|value| equivalent(&a.restrict(var, value), &b.restrict(var, value), rest))
        }
    }
}
