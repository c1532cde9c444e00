//! Boolean encodings of block values, ranges, equality and variable sets.
//!
//! Every fold below keeps its running intermediate held while the next
//! operand is built and combined, and returns its result unheld.

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::fdd::Domains;
use crate::reference::Ref;

impl Domains {
    /// The function true exactly when block `block` encodes `value`.
    ///
    /// Values up to and including the block size are accepted. Bits of
    /// `value` above the block's width are ignored, so `value == size` for a
    /// power-of-two size wraps around to the encoding of `0`.
    pub fn ithvar(&self, bdd: &Bdd, block: usize, value: u64) -> Result<Ref> {
        self.check_engine(bdd)?;
        let domain = self.get(block)?;
        if value > domain.size() {
            return Err(Error::ValueRange {
                block,
                value,
                size: domain.size(),
            });
        }

        let mut res = Ref::ONE;
        let mut rest = value;
        for var in domain.bits() {
            bdd.hold(res);
            let lit = if rest & 1 == 1 { bdd.mk_var(var) } else { bdd.mk_nvar(var) };
            let tmp = bdd.apply_and(lit, res);
            bdd.release(res);
            res = tmp;
            rest >>= 1;
        }

        Ok(res)
    }

    /// The variable set of block `block`. Owned by the table; do not release.
    pub fn ithset(&self, block: usize) -> Result<Ref> {
        Ok(self.get(block)?.varset())
    }

    /// The function true exactly for the legal encodings `0..size` of `block`.
    pub fn domain(&self, bdd: &Bdd, block: usize) -> Result<Ref> {
        self.check_engine(bdd)?;
        let domain = self.get(block)?;

        // Encode `value <= size - 1` bit by bit, from the least significant.
        let mut res = Ref::ONE;
        let mut max = domain.size() - 1;
        for var in domain.bits() {
            let nlit = bdd.mk_nvar(var);
            let tmp = if max & 1 == 1 {
                bdd.apply_or(nlit, res)
            } else {
                bdd.apply_and(nlit, res)
            };
            bdd.hold(tmp);
            bdd.release(res);
            res = tmp;
            max >>= 1;
        }
        bdd.release(res);

        Ok(res)
    }

    /// The function true when blocks `left` and `right` encode the same value.
    pub fn equals(&self, bdd: &Bdd, left: usize, right: usize) -> Result<Ref> {
        self.check_engine(bdd)?;
        let l = self.get(left)?;
        let r = self.get(right)?;
        if l.size() != r.size() {
            return Err(Error::Mismatch {
                what: "size",
                left,
                right,
                left_value: l.size(),
                right_value: r.size(),
            });
        }
        if l.bit_width() != r.bit_width() {
            return Err(Error::Mismatch {
                what: "bit width",
                left,
                right,
                left_value: l.bit_width() as u64,
                right_value: r.bit_width() as u64,
            });
        }

        let mut res = bdd.hold(Ref::ONE);
        for (a, b) in l.bits().zip(r.bits()) {
            let bit = bdd.hold(bdd.apply_biimp(bdd.mk_var(a), bdd.mk_var(b)));
            let tmp = bdd.hold(bdd.apply_and(res, bit));
            bdd.release(bit);
            bdd.release(res);
            res = tmp;
        }
        bdd.release(res);

        Ok(res)
    }

    /// The variable set of all listed blocks.
    pub fn makeset(&self, bdd: &Bdd, blocks: &[usize]) -> Result<Ref> {
        self.check_engine(bdd)?;
        for &block in blocks {
            self.get(block)?;
        }

        let mut res = Ref::ONE;
        for &block in blocks {
            bdd.hold(res);
            let tmp = bdd.apply_and(self.get(block)?.varset(), res);
            bdd.release(res);
            res = tmp;
        }

        Ok(res)
    }
}
