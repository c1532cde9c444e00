use crate::reference::Ref;
use crate::types::Var;

/// Number of bits needed to encode the values `0..size`.
///
/// Always at least 1, even for `size == 1`.
pub fn bit_width(size: u64) -> usize {
    let mut width = 1;
    let mut calc: u128 = 2;
    while calc < size as u128 {
        width += 1;
        calc <<= 1;
    }
    width
}

/// A finite domain block: a group of boolean variables jointly encoding one
/// integer in `0..size` in plain binary.
#[derive(Debug, Clone)]
pub struct Domain {
    pub(crate) index: usize,
    pub(crate) size: u64,
    /// Most significant bit first.
    pub(crate) vars: Vec<Var>,
    /// Positive cube over `vars`, held by the owning table.
    pub(crate) varset: Ref,
}

impl Domain {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of legal values.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn bit_width(&self) -> usize {
        self.vars.len()
    }

    /// Variables encoding this block, most significant bit first.
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn varset(&self) -> Ref {
        self.varset
    }

    /// Variables from the least significant bit up.
    pub fn bits(&self) -> impl Iterator<Item = Var> + '_ {
        self.vars.iter().rev().copied()
    }

    /// The variable holding bit `i` (`0` is the least significant).
    pub fn bit(&self, i: usize) -> Var {
        self.vars[self.vars.len() - 1 - i]
    }
}
