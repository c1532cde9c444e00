use crate::reference::Ref;
use crate::types::Var;

/// A decision node: `if variable then high else low`.
///
/// Terminal slots and free slots hold `Var::ZERO`; free slots additionally
/// have `low == Ref::INVALID`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub variable: Var,
    pub low: Ref,
    pub high: Ref,
}

impl Node {
    pub fn new(variable: Var, low: Ref, high: Ref) -> Self {
        debug_assert_ne!(low, high, "Redundant node for {}", variable);
        Self { variable, low, high }
    }

    pub(crate) fn terminal() -> Self {
        Self {
            variable: Var::ZERO,
            low: Ref::ZERO,
            high: Ref::ZERO,
        }
    }

    pub(crate) fn free() -> Self {
        Self {
            variable: Var::ZERO,
            low: Ref::INVALID,
            high: Ref::INVALID,
        }
    }

    pub fn is_free(&self) -> bool {
        self.variable.is_zero() && self.low == Ref::INVALID
    }
}
