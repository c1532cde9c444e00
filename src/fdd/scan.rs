use std::collections::HashSet;

use crate::bdd::Bdd;
use crate::error::Result;
use crate::fdd::Domains;
use crate::reference::Ref;
use crate::types::Var;

impl Domains {
    /// Indices of the blocks having at least one variable in the support
    /// of `f`, in table order.
    pub fn scanset(&self, bdd: &Bdd, f: Ref) -> Result<Vec<usize>> {
        self.check_engine(bdd)?;
        let support: HashSet<Var> = bdd.support(f).into_iter().collect();
        let blocks = self
            .iter()
            .filter(|domain| domain.vars().iter().any(|v| support.contains(v)))
            .map(|domain| domain.index())
            .collect();
        Ok(blocks)
    }
}
