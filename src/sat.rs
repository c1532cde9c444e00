use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::Var;

impl Bdd {
    /// Returns one satisfying assignment for `f`, if any exists.
    ///
    /// Only the variables tested along the chosen path are reported, in
    /// ordering. Returns `None` if `f` is the constant false function.
    pub fn one_sat(&self, f: Ref) -> Option<Vec<(Var, bool)>> {
        if f.is_zero() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;

        // Walk down, always picking a satisfying branch
        while !current.is_one() {
            let node = self.node(current);
            if !node.high.is_zero() {
                path.push((node.variable, true));
                current = node.high;
            } else {
                path.push((node.variable, false));
                current = node.low;
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments of `f` over all allocated variables.
    pub fn sat_count(&self, f: Ref) -> BigUint {
        let max = BigUint::from(1u32) << self.num_vars();
        let mut cache = HashMap::new();
        self._sat_count(f, &max, &mut cache)
    }

    /// Number of satisfying assignments of `f` over the variables of `set`.
    ///
    /// The support of `f` is expected to be contained in `set`; variables
    /// outside of it are not counted.
    pub fn sat_count_set(&self, f: Ref, set: Ref) -> BigUint {
        let width = self.set_vars(set).len();
        self.sat_count(f) >> (self.num_vars() - width)
    }

    fn _sat_count(&self, f: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if f.is_zero() {
            return BigUint::ZERO;
        } else if f.is_one() {
            return max.clone();
        }

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let node = self.node(f);
        let count_low = self._sat_count(node.low, max, cache);
        let count_high = self._sat_count(node.high, max, cache);
        let count: BigUint = (count_low + count_high) >> 1;

        cache.insert(f, count.clone());
        count
    }
}
