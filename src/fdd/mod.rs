//! Finite domain blocks.
//!
//! A finite domain block encodes an integer variable with values in
//! `0..size` using `bit_width(size)` boolean variables of a [`Bdd`], in plain
//! binary with the most significant bit first. Blocks are registered in a
//! [`Domains`] table, which is passed together with the manager to every
//! operation:
//!
//! ```
//! use fdd_rs::bdd::Bdd;
//! use fdd_rs::fdd::Domains;
//!
//! let bdd = Bdd::default();
//! let mut domains = Domains::new();
//!
//! // Two blocks with values 0..4, their bits interleaved.
//! let x = domains.extend(&bdd, &[4, 4]).unwrap();
//! let y = x + 1;
//!
//! let f = bdd.apply_or(
//!     domains.ithvar(&bdd, x, 2).unwrap(),
//!     domains.ithvar(&bdd, x, 3).unwrap(),
//! );
//! assert_eq!(domains.printset_to_string(&bdd, f).unwrap(), "<0:2/3>");
//!
//! let eq = domains.equals(&bdd, x, y).unwrap();
//! assert_eq!(domains.scanset(&bdd, eq).unwrap(), vec![x, y]);
//! ```
//!
//! The table holds one reference to each block's variable set until
//! [`Domains::teardown`]. Every other function returned here is unheld:
//! callers that keep it across [`Bdd::collect_garbage`] must
//! [`hold`][Bdd::hold] it.
//!
//! [`Bdd`]: crate::bdd::Bdd
//! [`Bdd::collect_garbage`]: crate::bdd::Bdd::collect_garbage
//! [Bdd::hold]: crate::bdd::Bdd::hold

mod domain;
mod encode;
mod print;
mod rename;
mod scan;
mod table;

pub use domain::{bit_width, Domain};
pub use table::Domains;
