//! Printing functions as sets of block values.
//!
//! Every path from the root to the ONE terminal is printed as one group:
//!
//! ```text
//! <0:1/3, 2:0>
//! ```
//!
//! Each block constrained on the path is listed as `index:values`, where the
//! values are all those in `0..size` whose binary code agrees with the bits
//! fixed on the path. A block with no bit fixed on the path is left out of
//! its group, even if other paths constrain it.
//!
//! The traversal visits low edges before high edges. It keeps an explicit
//! stack of pending nodes, each paired with the partial assignment leading
//! to it. Assignments are persistent lists sharing their common prefix, so
//! sibling branches never see each other's choices.
//!
//! Note: shared nodes are revisited once per path, so the output can be
//! exponential in the size of the diagram.

use std::fmt::Write;
use std::rc::Rc;

use log::trace;

use crate::bdd::Bdd;
use crate::error::Result;
use crate::fdd::{Domain, Domains};
use crate::reference::Ref;
use crate::types::Var;

/// One variable choice, linked to the choices above it.
#[derive(Debug)]
struct Step {
    var: Var,
    value: bool,
    parent: Option<Rc<Step>>,
}

impl Domains {
    /// Write the satisfying assignments of `f` to `out`, grouped by block.
    ///
    /// The constant functions print as `F` and `T`.
    pub fn printset(&self, bdd: &Bdd, f: Ref, out: &mut impl Write) -> Result<()> {
        self.check_engine(bdd)?;

        if f.is_terminal() {
            out.write_str(if f.is_zero() { "F" } else { "T" })?;
            return Ok(());
        }

        let mut stack: Vec<(Ref, Option<Rc<Step>>)> = vec![(f, None)];
        while let Some((node, path)) = stack.pop() {
            if node.is_zero() {
                continue;
            }
            if node.is_one() {
                let cells = self.materialize(bdd, path.as_deref());
                self.print_leaf(&cells, out)?;
                continue;
            }

            let n = bdd.node(node);
            let high = Step {
                var: n.variable,
                value: true,
                parent: path.clone(),
            };
            let low = Step {
                var: n.variable,
                value: false,
                parent: path,
            };
            stack.push((n.high, Some(Rc::new(high))));
            stack.push((n.low, Some(Rc::new(low))));
        }

        Ok(())
    }

    /// Same as [`printset`][Domains::printset], collected into a string.
    pub fn printset_to_string(&self, bdd: &Bdd, f: Ref) -> Result<String> {
        let mut s = String::new();
        self.printset(bdd, f, &mut s)?;
        Ok(s)
    }

    /// Per-variable cells for a leaf: `None` for variables not on the path.
    fn materialize(&self, bdd: &Bdd, mut path: Option<&Step>) -> Vec<Option<bool>> {
        let mut cells = vec![None; bdd.num_vars() + 1];
        while let Some(step) = path {
            cells[step.var.index()] = Some(step.value);
            path = step.parent.as_deref();
        }
        cells
    }

    fn print_leaf(&self, cells: &[Option<bool>], out: &mut impl Write) -> Result<()> {
        let mut line = String::from("<");
        let mut first = true;

        for domain in self.iter() {
            if domain.vars().iter().all(|v| cells[v.index()].is_none()) {
                continue;
            }
            if !first {
                line.push_str(", ");
            }
            first = false;

            write!(line, "{}:", domain.index())?;
            let values = (0..domain.size()).filter(|&m| matches(domain, cells, m));
            for (k, m) in values.enumerate() {
                if k > 0 {
                    line.push('/');
                }
                write!(line, "{}", m)?;
            }
        }

        line.push('>');
        trace!("printset leaf: {}", line);
        out.write_str(&line)?;
        Ok(())
    }
}

/// Whether the binary code of `value` agrees with every assigned bit.
fn matches(domain: &Domain, cells: &[Option<bool>], value: u64) -> bool {
    (0..domain.bit_width()).all(|i| {
        let bit = value.checked_shr(i as u32).unwrap_or(0) & 1 == 1;
        cells[domain.bit(i).index()].map_or(true, |b| b == bit)
    })
}
