use log::debug;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::fdd::Domains;
use crate::pairing::Pairing;

impl Domains {
    /// Pair every variable of block `from` with the variable at the same
    /// position in block `to`.
    ///
    /// Both blocks must have the same bit width.
    pub fn pairing(&self, bdd: &Bdd, pairing: &mut Pairing, from: usize, to: usize) -> Result<()> {
        self.check_engine(bdd)?;
        let src = self.get(from)?;
        let dst = self.get(to)?;
        if src.bit_width() != dst.bit_width() {
            return Err(Error::Mismatch {
                what: "bit width",
                left: from,
                right: to,
                left_value: src.bit_width() as u64,
                right_value: dst.bit_width() as u64,
            });
        }

        debug!("pairing: block {} -> block {}", from, to);
        for (&a, &b) in src.vars().iter().zip(dst.vars()) {
            bdd.set_pair(pairing, a, b)?;
        }
        Ok(())
    }

    /// Apply [`pairing`][Domains::pairing] to each `(from, to)` pair in turn.
    ///
    /// All indices are checked up front. A width mismatch is only detected
    /// when its pair is reached, and the pairs committed before it are kept.
    pub fn pairing_batch(&self, bdd: &Bdd, pairing: &mut Pairing, pairs: &[(usize, usize)]) -> Result<()> {
        self.check_engine(bdd)?;
        for &(from, to) in pairs {
            self.get(from)?;
            self.get(to)?;
        }
        for &(from, to) in pairs {
            self.pairing(bdd, pairing, from, to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_pairing_renames_values() {
        let bdd = Bdd::default();
        let mut domains = Domains::new();
        domains.extend(&bdd, &[5, 6]).unwrap();

        let mut p = Pairing::new();
        domains.pairing(&bdd, &mut p, 0, 1).unwrap();
        assert_eq!(p.len(), 3);

        for value in 0..5 {
            let f = domains.ithvar(&bdd, 0, value).unwrap();
            let g = domains.ithvar(&bdd, 1, value).unwrap();
            assert_eq!(bdd.replace(f, &p), g);
        }
    }

    #[test]
    fn test_pairing_mismatch() {
        let bdd = Bdd::default();
        let mut domains = Domains::new();
        domains.extend(&bdd, &[4, 8]).unwrap();

        let mut p = Pairing::new();
        let err = domains.pairing(&bdd, &mut p, 0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeMismatch);
        assert!(p.is_empty());
    }

    #[test]
    fn test_pairing_batch() {
        let bdd = Bdd::default();
        let mut domains = Domains::new();
        domains.extend(&bdd, &[4, 4, 2, 2]).unwrap();

        let mut p = Pairing::new();
        domains.pairing_batch(&bdd, &mut p, &[(0, 1), (2, 3)]).unwrap();
        assert_eq!(p.len(), 3);

        let f = bdd.apply_and(domains.ithvar(&bdd, 0, 3).unwrap(), domains.ithvar(&bdd, 2, 1).unwrap());
        let g = bdd.apply_and(domains.ithvar(&bdd, 1, 3).unwrap(), domains.ithvar(&bdd, 3, 1).unwrap());
        assert_eq!(bdd.replace(f, &p), g);
    }

    #[test]
    fn test_pairing_batch_bad_index() {
        let bdd = Bdd::default();
        let mut domains = Domains::new();
        domains.extend(&bdd, &[4, 4]).unwrap();

        let mut p = Pairing::new();
        let res = domains.pairing_batch(&bdd, &mut p, &[(0, 1), (1, 7)]);
        assert_eq!(res, Err(Error::BlockIndex { index: 7, count: 2 }));
        assert!(p.is_empty());
    }

    #[test]
    fn test_pairing_batch_partial() {
        let bdd = Bdd::default();
        let mut domains = Domains::new();
        domains.extend(&bdd, &[4, 4, 8]).unwrap();

        let mut p = Pairing::new();
        let err = domains.pairing_batch(&bdd, &mut p, &[(0, 1), (1, 2), (1, 0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeMismatch);
        // The first pair stays committed; the third is never reached.
        assert_eq!(p.len(), 2);
        assert_eq!(p.get(domains.vars(0).unwrap()[0]), Some(domains.vars(1).unwrap()[0]));
        assert_eq!(p.get(domains.vars(1).unwrap()[0]), None);
    }
}
