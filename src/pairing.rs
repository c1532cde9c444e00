//! Variable renaming.
//!
//! A [`Pairing`] maps some variables to replacement variables. It is built
//! through [`Bdd::set_pair`] and consumed by [`Bdd::replace`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::bdd::Bdd;
use crate::cache::OpKey;
use crate::error::Result;
use crate::reference::Ref;
use crate::types::Var;

static NEXT_PAIRING_ID: AtomicU64 = AtomicU64::new(1);

fn fresh_id() -> u64 {
    NEXT_PAIRING_ID.fetch_add(1, Ordering::Relaxed)
}

/// A renaming table from variables to variables.
///
/// Every mutation gives the pairing a new identity, so results cached for an
/// older version are never reused.
#[derive(Debug, Clone)]
pub struct Pairing {
    id: u64,
    map: BTreeMap<Var, Var>,
}

impl Pairing {
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            map: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The replacement for `v`, if any.
    pub fn get(&self, v: Var) -> Option<Var> {
        self.map.get(&v).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, Var)> + '_ {
        self.map.iter().map(|(&from, &to)| (from, to))
    }

    /// Remove all entries.
    pub fn reset(&mut self) {
        self.map.clear();
        self.id = fresh_id();
    }

    fn insert(&mut self, from: Var, to: Var) {
        self.map.insert(from, to);
        self.id = fresh_id();
    }
}

impl Default for Pairing {
    fn default() -> Self {
        Pairing::new()
    }
}

impl Bdd {
    /// Record that `from` should be renamed to `to`.
    ///
    /// Both variables must be allocated. A later call for the same `from`
    /// overwrites the earlier target.
    pub fn set_pair(&self, pairing: &mut Pairing, from: Var, to: Var) -> Result<()> {
        self.check_var(from)?;
        self.check_var(to)?;
        debug!("set_pair: {} -> {}", from, to);
        pairing.insert(from, to);
        Ok(())
    }

    /// Rename the variables of `f` according to `pairing`.
    ///
    /// The targets need not be above or below the sources in the ordering:
    /// the result is rebuilt with ITE, so it stays ordered.
    pub fn replace(&self, f: Ref, pairing: &Pairing) -> Ref {
        if f.is_terminal() || pairing.is_empty() {
            return f;
        }

        let key = OpKey::Replace(f, pairing.id());
        if let Some(res) = self.cache().get(&key) {
            return res;
        }

        let node = self.node(f);
        let low = self.replace(node.low, pairing);
        let high = self.replace(node.high, pairing);
        let v = pairing.get(node.variable).unwrap_or(node.variable);
        let res = self.apply_ite(self.mk_var(v), high, low);

        self.cache_insert(key, res);
        res
    }
}
