//! Variable sets and quantification.
//!
//! A variable set is represented as a positive cube: the conjunction of the
//! positive literals of its members. Walking a set means following `high`
//! edges until the ONE terminal.

use std::collections::BTreeSet;

use crate::bdd::Bdd;
use crate::cache::OpKey;
use crate::reference::Ref;
use crate::types::Var;

impl Bdd {
    /// Variables that appear on any path of `f`, in ordering.
    pub fn support(&self, f: Ref) -> Vec<Var> {
        let mut vars = BTreeSet::new();
        for node in self.descendants([f]) {
            if !node.is_terminal() {
                vars.insert(self.variable(node));
            }
        }
        vars.into_iter().collect()
    }

    /// The positive cube over `vars`. Duplicates are ignored.
    pub fn makeset(&self, vars: impl IntoIterator<Item = Var>) -> Ref {
        let vars: BTreeSet<Var> = vars.into_iter().collect();
        let mut res = Ref::ONE;
        for &v in vars.iter().rev() {
            res = self.mk_node(v, Ref::ZERO, res);
        }
        res
    }

    /// Members of the set represented by the cube `set`.
    pub fn set_vars(&self, set: Ref) -> Vec<Var> {
        let mut vars = Vec::new();
        let mut current = set;
        while !current.is_terminal() {
            vars.push(self.variable(current));
            current = self.high(current);
        }
        vars
    }

    /// Skip the set members above `v`.
    fn set_from(&self, set: Ref, v: Var) -> Ref {
        let mut current = set;
        while !current.is_terminal() && self.variable(current) < v {
            current = self.high(current);
        }
        current
    }

    /// Existential quantification of `f` over the variables in `set`.
    pub fn exists(&self, f: Ref, set: Ref) -> Ref {
        if f.is_terminal() {
            return f;
        }
        let node = self.node(f);
        let set = self.set_from(set, node.variable);
        if set.is_terminal() {
            return f;
        }

        let key = OpKey::Exists(f, set);
        if let Some(res) = self.cache().get(&key) {
            return res;
        }

        let res = if self.variable(set) == node.variable {
            let rest = self.high(set);
            let low = self.exists(node.low, rest);
            let high = self.exists(node.high, rest);
            self.apply_or(low, high)
        } else {
            let low = self.exists(node.low, set);
            let high = self.exists(node.high, set);
            self.mk_node(node.variable, low, high)
        };

        self.cache_insert(key, res);
        res
    }

    /// Universal quantification of `f` over the variables in `set`.
    pub fn forall(&self, f: Ref, set: Ref) -> Ref {
        if f.is_terminal() {
            return f;
        }
        let node = self.node(f);
        let set = self.set_from(set, node.variable);
        if set.is_terminal() {
            return f;
        }

        let key = OpKey::Forall(f, set);
        if let Some(res) = self.cache().get(&key) {
            return res;
        }

        let res = if self.variable(set) == node.variable {
            let rest = self.high(set);
            let low = self.forall(node.low, rest);
            let high = self.forall(node.high, rest);
            self.apply_and(low, high)
        } else {
            let low = self.forall(node.low, set);
            let high = self.forall(node.high, set);
            self.mk_node(node.variable, low, high)
        };

        self.cache_insert(key, res);
        res
    }
}
