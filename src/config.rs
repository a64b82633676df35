//! Simplification settings for formula operations.
//!
//! Boolean operators (`&`, `|`, `!`, `^`) have no room for an extra argument,
//! so they read the configuration of the current thread. Use
//! [`FormulaConfig::scope`] to run a computation under different settings,
//! or call the explicit `*_with` methods on [`BoolValue`][crate::value::BoolValue].

use std::cell::Cell;

use log::debug;

/// How much work [`reduce`][crate::formula::Formula] does after each operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Reduction {
    /// Drop contradictory disjuncts, detect complement pairs, apply absorption.
    #[default]
    Full,
    /// Only drop contradictory disjuncts.
    ///
    /// Cheaper per operation, but formulas may keep redundant disjuncts
    /// and tautologies may stay in non-constant form.
    CancelOnly,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FormulaConfig {
    /// Reduction applied after every OR/AND.
    pub reduction: Reduction,
    /// Maximum size `|left| * |right|` of an AND cross-product, `None` for unbounded.
    pub max_product: Option<usize>,
}

thread_local! {
    static CURRENT: Cell<FormulaConfig> = const {
        Cell::new(FormulaConfig {
            reduction: Reduction::Full,
            max_product: None,
        })
    };
}

impl FormulaConfig {
    pub fn new(reduction: Reduction, max_product: Option<usize>) -> Self {
        Self {
            reduction,
            max_product,
        }
    }

    /// Full reduction, cross-product capped at `limit`.
    pub fn bounded(limit: usize) -> Self {
        Self::new(Reduction::Full, Some(limit))
    }

    /// Cancellation-only reduction, unbounded products.
    pub fn fast() -> Self {
        Self::new(Reduction::CancelOnly, None)
    }

    /// Configuration of the current thread.
    pub fn current() -> Self {
        CURRENT.with(|c| c.get())
    }

    /// Runs `f` with `self` installed as the current thread's configuration.
    ///
    /// The previous configuration is restored when `f` returns or unwinds.
    pub fn scope<R>(self, f: impl FnOnce() -> R) -> R {
        struct Restore(FormulaConfig);

        impl Drop for Restore {
            fn drop(&mut self) {
                CURRENT.with(|c| c.set(self.0));
            }
        }

        debug!("entering formula config scope: {:?}", self);
        let _restore = Restore(CURRENT.with(|c| c.replace(self)));
        f()
    }
}
