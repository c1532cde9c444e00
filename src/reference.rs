use std::fmt::{Display, Formatter};

/// A reference to a BDD node.
///
/// References are plain indices into the manager's node arena. There are no
/// complement edges, so negation builds a new diagram.
///
/// # Terminal Values
///
/// - `Ref::ZERO`: constant false
/// - `Ref::ONE`: constant true
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Ref(u32);

impl Ref {
    /// Constant false.
    pub const ZERO: Ref = Ref(0);

    /// Constant true.
    pub const ONE: Ref = Ref(1);

    /// Sentinel for free arena slots.
    pub const INVALID: Ref = Ref(0xFFFF_FFFF);

    /// Creates a reference from a raw arena index.
    pub const fn new(index: u32) -> Self {
        Ref(index)
    }

    /// Returns the raw index value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the index for arena access.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is one of the two terminals.
    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    /// Returns true if this is constant false.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this is constant true.
    pub const fn is_one(self) -> bool {
        self.0 == 1
    }

    /// The terminal for a boolean constant.
    pub const fn constant(value: bool) -> Self {
        if value {
            Ref::ONE
        } else {
            Ref::ZERO
        }
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "@{}", self.0),
        }
    }
}
