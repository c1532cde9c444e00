//! # fdd-rs: Finite Domain Blocks over Binary Decision Diagrams
//!
//! **`fdd-rs`** lets you declare integer-valued variables with bounded ranges and
//! work with relations over them symbolically. Each variable is encoded as a
//! block of boolean variables of a **Binary Decision Diagram** manager.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All boolean operations go through the [`Bdd`][crate::bdd::Bdd] manager, which hash-conses every node so equal functions share one [`Ref`][crate::reference::Ref].
//! - **Explicit Lifetimes**: Functions are protected with `hold`/`release` and reclaimed only by an explicit [`collect_garbage`][crate::bdd::Bdd::collect_garbage] sweep.
//! - **Interleaved Blocks**: Blocks declared together get their bits interleaved in the variable ordering, which keeps relations between them small.
//! - **Rich API**: Exact values, legal ranges, equality, variable sets, renaming, reverse lookup and printing of satisfying assignments.
//! - **1-Based Indexing**: Boolean variables are 1-indexed (0 is reserved for terminals). Blocks are 0-indexed.
//!
//! ## Basic Usage
//!
//! ```rust
//! use fdd_rs::bdd::Bdd;
//! use fdd_rs::fdd::Domains;
//! use fdd_rs::pairing::Pairing;
//!
//! let bdd = Bdd::default();
//! let mut domains = Domains::new();
//!
//! // A counter with values 0..5 and its next-state copy.
//! let cur = domains.extend(&bdd, &[5, 5]).unwrap();
//! let next = cur + 1;
//!
//! // Transition relation: next = cur + 1 (saturating at 4).
//! let mut rel = bdd.zero();
//! for k in 0..5 {
//!     let step = bdd.apply_and(
//!         domains.ithvar(&bdd, cur, k).unwrap(),
//!         domains.ithvar(&bdd, next, (k + 1).min(4)).unwrap(),
//!     );
//!     rel = bdd.apply_or(rel, step);
//! }
//!
//! // Image of {cur = 2}, renamed back to `cur`.
//! let from = domains.ithvar(&bdd, cur, 2).unwrap();
//! let image = bdd.exists(bdd.apply_and(rel, from), domains.ithset(cur).unwrap());
//! let mut pairing = Pairing::new();
//! domains.pairing(&bdd, &mut pairing, next, cur).unwrap();
//! let image = bdd.replace(image, &pairing);
//!
//! assert_eq!(image, domains.ithvar(&bdd, cur, 3).unwrap());
//! assert_eq!(domains.printset_to_string(&bdd, image).unwrap(), "<0:3>");
//! ```
//!
//! ## Core Components
//!
//! - **[`fdd`]**: Finite domain blocks: allocation, encoding, renaming, scanning and printing.
//! - **[`bdd`]**: The [`Bdd`][crate::bdd::Bdd] manager and core boolean operations.
//! - **[`varset`]**: Variable sets and quantification.
//! - **[`pairing`]**: Variable renaming.
//! - **[`sat`]**: Model counting and satisfying assignments.
//! - **[`error`]**: The crate [`Error`][crate::error::Error] type.

pub mod bdd;
pub mod cache;
pub mod error;
pub mod fdd;
pub mod node;
pub mod pairing;
pub mod reference;
pub mod sat;
pub mod subtable;
pub mod types;
pub mod varset;
