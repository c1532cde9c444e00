//! The BDD manager.
//!
//! All nodes live in a single arena owned by [`Bdd`] and are addressed by
//! [`Ref`] indices. Nodes are hash-consed through per-variable
//! [`Subtable`]s, so two equal functions always get the same `Ref`.
//!
//! # Lifetimes
//!
//! The manager keeps an explicit reference-count table next to the arena.
//! Callers protect the functions they want to keep with [`Bdd::hold`] and
//! give them up with [`Bdd::release`]. Nothing is ever reclaimed implicitly:
//! nodes are freed only by [`Bdd::collect_garbage`], which keeps exactly the
//! nodes reachable from held roots. Any `Ref` that was not held across a
//! collection must be considered dangling afterwards.
//!
//! # Ordering
//!
//! Variables are tested in id order: `x1` is at the top. New variables are
//! always appended below the existing ones.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::cache::{BinOp, Cache, OpKey};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::subtable::Subtable;
use crate::types::Var;

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

/// Manager configuration.
///
/// # Examples
///
/// ```
/// use fdd_rs::bdd::{Bdd, BddConfig};
///
/// let bdd = Bdd::with_config(BddConfig {
///     max_vars: 16,
///     ..BddConfig::default()
/// });
/// assert!(bdd.new_vars(17).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Initial node arena capacity (default: 2^16)
    pub capacity: usize,
    /// The computed table has `2^cache_bits` slots, at most 31 (default: 14)
    pub cache_bits: usize,
    /// Maximum number of variables the manager may allocate (default: 2^21 - 1)
    pub max_vars: u32,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            capacity: 1 << 16,
            cache_bits: 14,
            max_vars: 0x1F_FFFF,
        }
    }
}

pub struct Bdd {
    id: u64,
    config: BddConfig,
    /// Node arena. Index 0 = ZERO terminal, index 1 = ONE terminal.
    nodes: RefCell<Vec<Node>>,
    /// Reference counts, parallel to `nodes`.
    refs: RefCell<Vec<u32>>,
    /// Free arena slots left behind by garbage collection.
    free: RefCell<Vec<u32>>,
    /// Unique table: `subtables[v - 1]` holds the nodes testing variable `v`.
    subtables: RefCell<Vec<Subtable>>,
    num_vars: Cell<u32>,
    cache: RefCell<Cache>,
}

impl Bdd {
    pub fn new() -> Self {
        Self::with_config(BddConfig::default())
    }

    pub fn with_config(config: BddConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.capacity.max(2));
        nodes.push(Node::terminal());
        nodes.push(Node::terminal());
        let mut refs = Vec::with_capacity(config.capacity.max(2));
        refs.resize(2, 0);

        let id = NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed);
        debug!("Bdd #{} created with {:?}", id, config);

        Self {
            id,
            cache: RefCell::new(Cache::new(config.cache_bits)),
            config,
            nodes: RefCell::new(nodes),
            refs: RefCell::new(refs),
            free: RefCell::new(Vec::new()),
            subtables: RefCell::new(Vec::new()),
            num_vars: Cell::new(0),
        }
    }
}

/// First variable of an allocation of `n` variables after `current` ones.
fn first_new_var(current: u32, n: usize, max_vars: u32) -> Result<Var> {
    let available = max_vars.saturating_sub(current) as usize;
    match current.checked_add(1) {
        Some(id) if n <= available => Ok(Var::new(id)),
        _ => Err(Error::Memory { requested: n, available }),
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new()
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("id", &self.id)
            .field("num_vars", &self.num_vars())
            .field("num_nodes", &self.num_nodes())
            .field("arena", &self.nodes.borrow().len())
            .field("cache", &self.cache.borrow().len())
            .finish()
    }
}

impl Bdd {
    /// Process-unique identity of this manager.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &BddConfig {
        &self.config
    }

    pub fn cache(&self) -> std::cell::Ref<'_, Cache> {
        self.cache.borrow()
    }

    pub(crate) fn cache_insert(&self, key: OpKey, res: Ref) {
        self.cache.borrow_mut().insert(key, res);
    }

    pub fn zero(&self) -> Ref {
        Ref::ZERO
    }
    pub fn one(&self) -> Ref {
        Ref::ONE
    }

    pub fn is_zero(&self, f: Ref) -> bool {
        f.is_zero()
    }
    pub fn is_one(&self, f: Ref) -> bool {
        f.is_one()
    }
    pub fn is_terminal(&self, f: Ref) -> bool {
        f.is_terminal()
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Number of allocated variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars.get() as usize
    }

    /// Appends `n` fresh variables at the bottom of the ordering and returns
    /// the first of them. The new variables are consecutive.
    ///
    /// When `n == 0` nothing is allocated and the returned variable is the
    /// one the next allocation would start at.
    pub fn new_vars(&self, n: usize) -> Result<Var> {
        let current = self.num_vars.get();
        let first = first_new_var(current, n, self.config.max_vars)?;
        let mut subtables = self.subtables.borrow_mut();
        for i in 0..n as u32 {
            subtables.push(Subtable::new(first.offset(i)));
        }
        self.num_vars.set(current + n as u32);
        debug!("new_vars(n = {}) -> first = {}, total = {}", n, first, self.num_vars.get());

        Ok(first)
    }

    /// Check that `v` has been allocated.
    pub fn check_var(&self, v: Var) -> Result<()> {
        if v.id() > self.num_vars.get() {
            return Err(Error::VarIndex {
                var: v.id(),
                count: self.num_vars(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Node access
    // ========================================================================

    pub fn node(&self, f: Ref) -> Node {
        let node = self.nodes.borrow()[f.index()];
        debug_assert!(!node.is_free(), "Node {} was reclaimed", f);
        node
    }

    /// The variable tested by a non-terminal node.
    pub fn variable(&self, f: Ref) -> Var {
        assert!(!f.is_terminal(), "Terminal {} has no variable", f);
        self.node(f).variable
    }

    pub fn low(&self, f: Ref) -> Ref {
        self.node(f).low
    }

    pub fn high(&self, f: Ref) -> Ref {
        self.node(f).high
    }

    /// The variable tested at the root, or `None` for terminals.
    pub fn top_var(&self, f: Ref) -> Option<Var> {
        if f.is_terminal() {
            None
        } else {
            Some(self.variable(f))
        }
    }

    /// Number of live decision nodes (terminals excluded).
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len() - 2 - self.free.borrow().len()
    }

    /// Create (or find) the node `if v then high else low`.
    pub fn mk_node(&self, v: Var, low: Ref, high: Ref) -> Ref {
        assert!(
            !v.is_zero() && v.id() <= self.num_vars.get(),
            "Variable {} is not allocated",
            v
        );

        if low == high {
            return low;
        }
        debug_assert!(self.top_var(low).map_or(true, |w| v < w), "Ordering violated at {}", v);
        debug_assert!(self.top_var(high).map_or(true, |w| v < w), "Ordering violated at {}", v);

        {
            let subtables = self.subtables.borrow();
            let subtable = &subtables[v.index() - 1];
            debug_assert_eq!(subtable.variable, v, "Subtable out of place");
            if let Some(res) = subtable.find(low, high) {
                return res;
            }
        }

        let node = Node::new(v, low, high);
        let res = match self.free.borrow_mut().pop() {
            Some(index) => {
                self.nodes.borrow_mut()[index as usize] = node;
                self.refs.borrow_mut()[index as usize] = 0;
                Ref::new(index)
            }
            None => {
                let mut nodes = self.nodes.borrow_mut();
                let index = nodes.len() as u32;
                nodes.push(node);
                self.refs.borrow_mut().push(0);
                Ref::new(index)
            }
        };
        self.subtables.borrow_mut()[v.index() - 1].insert(low, high, res);
        res
    }

    /// The function that is true iff `v` is true.
    pub fn mk_var(&self, v: Var) -> Ref {
        self.mk_node(v, Ref::ZERO, Ref::ONE)
    }

    /// The function that is true iff `v` is false.
    pub fn mk_nvar(&self, v: Var) -> Ref {
        self.mk_node(v, Ref::ONE, Ref::ZERO)
    }

    pub fn top_cofactors(&self, f: Ref, v: Var) -> (Ref, Ref) {
        if f.is_terminal() {
            return (f, f);
        }
        let node = self.node(f);
        if v < node.variable {
            return (f, f);
        }
        assert_eq!(v, node.variable);
        (node.low, node.high)
    }

    /// The topmost variable among the non-terminal arguments.
    fn min_variable(&self, nodes: &[Ref]) -> Var {
        let top = nodes.iter().filter(|f| !f.is_terminal()).map(|&f| self.variable(f)).min();
        match top {
            Some(v) => v,
            None => panic!("No decision node among {:?}", nodes),
        }
    }

    // ========================================================================
    // Reference counting
    // ========================================================================

    /// Protect `f` from garbage collection. Returns `f` for chaining.
    pub fn hold(&self, f: Ref) -> Ref {
        if !f.is_terminal() {
            assert!(!self.nodes.borrow()[f.index()].is_free(), "Holding reclaimed node {}", f);
            self.refs.borrow_mut()[f.index()] += 1;
        }
        f
    }

    /// Drop one reference to `f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` is not currently held.
    pub fn release(&self, f: Ref) {
        if f.is_terminal() {
            return;
        }
        let mut refs = self.refs.borrow_mut();
        let count = &mut refs[f.index()];
        assert!(*count > 0, "Releasing unreferenced node {}", f);
        *count -= 1;
    }

    /// Current number of holds on `f`. Terminals always report zero.
    pub fn ref_count(&self, f: Ref) -> u32 {
        if f.is_terminal() {
            0
        } else {
            self.refs.borrow()[f.index()]
        }
    }

    /// All nodes reachable from `roots`, terminals included.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        visited.insert(Ref::ZERO);
        visited.insert(Ref::ONE);
        let mut queue = VecDeque::from_iter(roots);

        while let Some(f) = queue.pop_front() {
            if visited.insert(f) {
                let node = self.node(f);
                queue.push_back(node.low);
                queue.push_back(node.high);
            }
        }

        visited
    }

    /// Number of nodes in `f`, terminals included.
    pub fn size(&self, f: Ref) -> usize {
        if f.is_terminal() {
            return 1;
        }
        // A non-constant function reaches both terminals.
        self.descendants([f]).len()
    }

    /// Reclaim every node not reachable from a held root.
    ///
    /// This is the only place where nodes are freed. The computed table is
    /// cleared. Returns the number of reclaimed nodes.
    pub fn collect_garbage(&self) -> usize {
        debug!("Collecting garbage...");

        self.cache.borrow_mut().clear();

        let roots: Vec<Ref> = self
            .refs
            .borrow()
            .iter()
            .enumerate()
            .skip(2)
            .filter(|&(_, &count)| count > 0)
            .map(|(i, _)| Ref::new(i as u32))
            .collect();
        let alive = self.descendants(roots.iter().copied());

        let mut freed = 0;
        {
            let mut nodes = self.nodes.borrow_mut();
            let mut free = self.free.borrow_mut();
            for (i, node) in nodes.iter_mut().enumerate().skip(2) {
                if !node.is_free() && !alive.contains(&Ref::new(i as u32)) {
                    *node = Node::free();
                    free.push(i as u32);
                    freed += 1;
                }
            }
        }
        for subtable in self.subtables.borrow_mut().iter_mut() {
            subtable.retain(|f| alive.contains(&f));
        }

        debug!(
            "Garbage collected: {} roots, {} alive, {} freed",
            roots.len(),
            alive.len() - 2,
            freed
        );
        freed
    }

    // ========================================================================
    // Boolean operations
    // ========================================================================

    /// Apply a binary connective.
    pub fn apply(&self, op: BinOp, f: Ref, g: Ref) -> Ref {
        if let Some(res) = self.apply_terminal(op, f, g) {
            return res;
        }

        let key = OpKey::apply(op, f, g);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let m = self.min_variable(&[f, g]);
        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);

        let low = self.apply(op, f0, g0);
        let high = self.apply(op, f1, g1);
        let res = self.mk_node(m, low, high);

        self.cache.borrow_mut().insert(key, res);
        res
    }

    fn apply_terminal(&self, op: BinOp, f: Ref, g: Ref) -> Option<Ref> {
        if f.is_terminal() && g.is_terminal() {
            return Some(Ref::constant(op.eval(f.is_one(), g.is_one())));
        }
        match op {
            BinOp::And => {
                if f.is_zero() || g.is_zero() {
                    Some(Ref::ZERO)
                } else if f.is_one() || f == g {
                    Some(g)
                } else if g.is_one() {
                    Some(f)
                } else {
                    None
                }
            }
            BinOp::Or => {
                if f.is_one() || g.is_one() {
                    Some(Ref::ONE)
                } else if f.is_zero() || f == g {
                    Some(g)
                } else if g.is_zero() {
                    Some(f)
                } else {
                    None
                }
            }
            BinOp::Xor => {
                if f == g {
                    Some(Ref::ZERO)
                } else if f.is_zero() {
                    Some(g)
                } else if g.is_zero() {
                    Some(f)
                } else {
                    None
                }
            }
            BinOp::Biimp => {
                if f == g {
                    Some(Ref::ONE)
                } else if f.is_one() {
                    Some(g)
                } else if g.is_one() {
                    Some(f)
                } else {
                    None
                }
            }
        }
    }

    pub fn apply_and(&self, f: Ref, g: Ref) -> Ref {
        self.apply(BinOp::And, f, g)
    }

    pub fn apply_or(&self, f: Ref, g: Ref) -> Ref {
        self.apply(BinOp::Or, f, g)
    }

    pub fn apply_xor(&self, f: Ref, g: Ref) -> Ref {
        self.apply(BinOp::Xor, f, g)
    }

    pub fn apply_biimp(&self, f: Ref, g: Ref) -> Ref {
        self.apply(BinOp::Biimp, f, g)
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        if f.is_terminal() {
            return Ref::constant(f.is_zero());
        }

        let key = OpKey::Not(f);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let node = self.node(f);
        let low = self.apply_not(node.low);
        let high = self.apply_not(node.high);
        let res = self.mk_node(node.variable, low, high);

        self.cache.borrow_mut().insert(key, res);
        res
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        //   ite(F,0,1) => ~F
        //   ite(F,1,H) => F ∨ H
        //   ite(F,G,0) => F ∧ G
        if f.is_one() || g == h {
            return g;
        }
        if f.is_zero() {
            return h;
        }
        if g.is_one() && h.is_zero() {
            return f;
        }
        if g.is_zero() && h.is_one() {
            return self.apply_not(f);
        }
        if g.is_one() {
            return self.apply_or(f, h);
        }
        if h.is_zero() {
            return self.apply_and(f, g);
        }

        let key = OpKey::Ite(f, g, h);
        if let Some(res) = self.cache.borrow().get(&key) {
            return res;
        }

        let m = self.min_variable(&[f, g, h]);
        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let low = self.apply_ite(f0, g0, h0);
        let high = self.apply_ite(f1, g1, h1);
        let res = self.mk_node(m, low, high);

        self.cache.borrow_mut().insert(key, res);
        res
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = Ref::ONE;
        for f in nodes {
            res = self.apply_and(res, f);
        }
        res
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = Ref::ZERO;
        for f in nodes {
            res = self.apply_or(res, f);
        }
        res
    }

    pub fn to_bracket_string(&self, f: Ref) -> String {
        if f.is_zero() {
            return "(0)".to_string();
        } else if f.is_one() {
            return "(1)".to_string();
        }

        let node = self.node(f);
        format!(
            "{}:({}, {}, {})",
            f,
            node.variable,
            self.to_bracket_string(node.high),
            self.to_bracket_string(node.low)
        )
    }
}
