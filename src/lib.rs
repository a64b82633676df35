//! # dnf-rs: symbolic boolean formulas in disjunctive normal form
//!
//! **`dnf-rs`** represents boolean functions of named input bits as formulas in
//! **disjunctive normal form** (an OR of ANDs of literals), and lets them flow
//! through ordinary bit-level code: bitwise operators, shifts, rotations and
//! ripple-carry addition on fixed-width bit-vectors.
//!
//! The same generic code runs on concrete integers and on symbolic bit-vectors,
//! so running a circuit symbolically yields a closed-form formula for every
//! output bit. The bundled [`engine`] does exactly this for the SHA-1
//! compression function.
//!
//! ## Normal form
//!
//! - A [`Conjunct`][crate::conjunct::Conjunct] is an ordered set of literals.
//! - A [`Formula`][crate::formula::Formula] is an ordered set of conjuncts.
//! - A [`BoolValue`][crate::value::BoolValue] is either a constant or a formula;
//!   formulas that reduce to a constant are always collapsed.
//!
//! After every operation, contradictory conjuncts are dropped, complementary
//! unit disjuncts (`x | ~x`) collapse to TRUE, and absorbed disjuncts
//! (`a | (a & b)`) are removed. This keeps formulas small, but it is not a
//! minimisation: some tautologies remain in non-constant form.
//! See [`config`] for the cheaper cancellation-only mode and for bounding the
//! AND cross-product.
//!
//! ## Basic usage
//!
//! ```rust
//! use dnf_rs::value::BoolValue;
//!
//! let a = BoolValue::var("a", 0);
//! let b = BoolValue::var("b", 0);
//!
//! let f = &a ^ &b;
//! assert_eq!(f.to_string(), "(a[0] & ~b[0]) | (~a[0] & b[0])");
//!
//! // Absorption and complement detection:
//! assert_eq!(&a | &(&a & &b), a);
//! assert!((&a | &!&a).is_true());
//! ```
//!
//! ## Bit-vectors
//!
//! ```rust
//! use dnf_rs::bitvec::BitVector;
//!
//! let x = BitVector::<8>::from(200u8);
//! let y = BitVector::<8>::from(100u8);
//! assert_eq!((x + y).to_u64(), Some(44));
//! ```

pub mod bit;
pub mod bitvec;
pub mod config;
pub mod conjunct;
pub mod engine;
pub mod error;
pub mod formula;
pub mod sat;
pub mod types;
pub mod value;
pub mod word;
