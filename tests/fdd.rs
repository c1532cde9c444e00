//! End-to-end tests for finite domain blocks.
//!
//! Tests cover allocation, encoders, renaming, scanning, printing, and
//! the reference discipline against garbage collection.

use fdd_rs::bdd::{Bdd, BddConfig};
use fdd_rs::error::{Error, ErrorKind};
use fdd_rs::fdd::Domains;
use fdd_rs::pairing::Pairing;
use fdd_rs::reference::Ref;
use fdd_rs::types::Var;
use num_bigint::BigUint;
use test_log::test;

fn setup(sizes: &[u64]) -> (Bdd, Domains) {
    let bdd = Bdd::default();
    let mut domains = Domains::new();
    domains.extend(&bdd, sizes).unwrap();
    (bdd, domains)
}

/// Decode the value of `block` from a full assignment of its bits.
fn decode(domains: &Domains, block: usize, model: &[(Var, bool)]) -> u64 {
    let vars = domains.vars(block).unwrap();
    let mut value = 0;
    for v in vars {
        let bit = model.iter().find(|(w, _)| w == v).map_or(false, |&(_, b)| b);
        value = (value << 1) | bit as u64;
    }
    value
}

// ─── Allocation ────────────────────────────────────────────────────────────────

#[test]
fn extend_interleaves_by_column() {
    let (_bdd, domains) = setup(&[2, 4]);
    let b0 = domains.vars(0).unwrap();
    let b1 = domains.vars(1).unwrap();

    // [block0.bit0, block1.bit0, block1.bit1]
    assert_eq!(b0, &[Var::new(1)]);
    assert_eq!(b1, &[Var::new(2), Var::new(3)]);
}

#[test]
fn extend_returns_first_index() {
    let (bdd, mut domains) = setup(&[3]);
    assert_eq!(domains.extend(&bdd, &[7, 7, 7]).unwrap(), 1);
    assert_eq!(domains.len(), 4);
    for i in 1..4 {
        assert_eq!(domains.domain_size(i).unwrap(), 7);
        assert_eq!(domains.bit_width(i).unwrap(), 3);
    }

    // Every variable belongs to exactly one block.
    let mut all: Vec<Var> = (0..4).flat_map(|i| domains.vars(i).unwrap().to_vec()).collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), bdd.num_vars());
}

#[test]
fn extend_errors() {
    let bdd = Bdd::with_config(BddConfig {
        max_vars: 3,
        ..BddConfig::default()
    });
    let mut domains = Domains::new();

    assert_eq!(domains.extend(&bdd, &[0]).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(domains.extend(&bdd, &[16]).unwrap_err().kind(), ErrorKind::Memory);
    assert!(domains.is_empty());
    assert_eq!(domains.extend(&bdd, &[8]).unwrap(), 0);
}

#[test]
fn teardown_then_extend_reuses_index_zero() {
    let (bdd, mut domains) = setup(&[4, 8]);
    let old = domains.ithset(1).unwrap();
    assert_eq!(bdd.ref_count(old), 1);

    domains.teardown(&bdd).unwrap();
    assert_eq!(bdd.ref_count(old), 0);
    assert_eq!(domains.ithset(0), Err(Error::BlockIndex { index: 0, count: 0 }));

    assert_eq!(domains.extend(&bdd, &[4]).unwrap(), 0);
    assert_eq!(domains.len(), 1);
}

// ─── Overlap ───────────────────────────────────────────────────────────────────

#[test]
fn overlap_size_and_width() {
    let (bdd, mut domains) = setup(&[3, 5]);
    let v = domains.overlap(&bdd, 0, 1).unwrap();

    assert_eq!(domains.domain_size(v).unwrap(), 15);
    assert_eq!(domains.bit_width(v).unwrap(), 2 + 3);
}

#[test]
fn overlap_encodes_pairs() {
    let (bdd, mut domains) = setup(&[3, 5]);
    let v = domains.overlap(&bdd, 0, 1).unwrap();
    let set = domains.ithset(v).unwrap();

    for i in 0..3 {
        for j in 0..5 {
            let f = bdd.apply_and(domains.ithvar(&bdd, 0, i).unwrap(), domains.ithvar(&bdd, 1, j).unwrap());
            assert_ne!(f, bdd.zero());

            // Exactly one encoding of the overlapped block: `i` in the high
            // bits followed by `j` in the low bits.
            assert_eq!(bdd.sat_count_set(f, set), BigUint::from(1u32));
            let model = bdd.one_sat(f).unwrap();
            assert_eq!(decode(&domains, v, &model), (i << 3) | j);
        }
    }
}

#[test]
fn printset_overlapped_block() {
    let (bdd, mut domains) = setup(&[2, 2]);
    let v = domains.overlap(&bdd, 0, 1).unwrap();
    assert_eq!(v, 2);

    // The overlapped block is printed alongside its parts.
    let f = bdd.apply_and(domains.ithvar(&bdd, 0, 1).unwrap(), domains.ithvar(&bdd, 1, 0).unwrap());
    assert_eq!(domains.printset_to_string(&bdd, f).unwrap(), "<0:1, 1:0, 2:2>");
}

#[test]
fn printset_overlapped_block_out_of_range() {
    let (bdd, mut domains) = setup(&[3, 5]);
    let v = domains.overlap(&bdd, 0, 1).unwrap();
    assert_eq!(domains.domain_size(v).unwrap(), 15);

    // (1, 1) encodes as 0b01_001 = 9.
    let f = bdd.apply_and(domains.ithvar(&bdd, 0, 1).unwrap(), domains.ithvar(&bdd, 1, 1).unwrap());
    assert_eq!(domains.printset_to_string(&bdd, f).unwrap(), "<0:1, 1:1, 2:9>");

    // (2, 1) encodes as 0b10_001 = 17, past the block's 15 values: nothing
    // is listed for block 2.
    let f = bdd.apply_and(domains.ithvar(&bdd, 0, 2).unwrap(), domains.ithvar(&bdd, 1, 1).unwrap());
    assert_eq!(domains.printset_to_string(&bdd, f).unwrap(), "<0:2, 1:1, 2:>");
}

// ─── Encoders ──────────────────────────────────────────────────────────────────

#[test]
fn ithvar_decodes_to_value() {
    let (bdd, domains) = setup(&[6, 11]);
    for block in 0..2 {
        let size = domains.domain_size(block).unwrap();
        let set = domains.ithset(block).unwrap();
        for value in 0..size {
            let f = domains.ithvar(&bdd, block, value).unwrap();
            assert_eq!(bdd.sat_count_set(f, set), BigUint::from(1u32));
            let model = bdd.one_sat(f).unwrap();
            assert_eq!(model.len(), domains.bit_width(block).unwrap());
            assert_eq!(decode(&domains, block, &model), value);
        }
    }
}

#[test]
fn domain_is_disjunction_of_values() {
    let (bdd, domains) = setup(&[1, 2, 3, 5, 8, 13]);
    for block in 0..domains.len() {
        let size = domains.domain_size(block).unwrap();
        let d = domains.domain(&bdd, block).unwrap();
        let all = bdd.apply_or_many((0..size).map(|k| domains.ithvar(&bdd, block, k).unwrap()));
        assert_eq!(d, all, "block {}", block);
    }
}

#[test]
fn equals_is_symmetric() {
    let (bdd, domains) = setup(&[5, 5, 5]);
    for a in 0..3 {
        for b in 0..3 {
            assert_eq!(domains.equals(&bdd, a, b).unwrap(), domains.equals(&bdd, b, a).unwrap());
        }
    }
    assert_eq!(domains.equals(&bdd, 1, 1).unwrap(), bdd.one());
}

#[test]
fn equals_rejects_different_sizes() {
    let (bdd, domains) = setup(&[5, 6]);
    let err = domains.equals(&bdd, 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeMismatch);
    assert_eq!(err.to_string(), "blocks 0 and 1 differ in size: 5 vs 6");
}

// ─── Sets, renaming, scanning ──────────────────────────────────────────────────

#[test]
fn scanset_of_makeset() {
    let (bdd, domains) = setup(&[2, 3, 4, 5]);
    for v in 0..4 {
        let set = domains.makeset(&bdd, &[v]).unwrap();
        assert_eq!(domains.scanset(&bdd, set).unwrap(), vec![v]);
    }
    let set = domains.makeset(&bdd, &[3, 1]).unwrap();
    assert_eq!(domains.scanset(&bdd, set).unwrap(), vec![1, 3]);
}

#[test]
fn image_through_relation() {
    let (bdd, domains) = setup(&[4, 4]);
    let (cur, next) = (0, 1);

    // next = (cur + 1) mod 4
    let rel = bdd.apply_or_many((0..4).map(|k| {
        bdd.apply_and(domains.ithvar(&bdd, cur, k).unwrap(), domains.ithvar(&bdd, next, (k + 1) % 4).unwrap())
    }));
    let rel = bdd.hold(rel);

    let mut back = Pairing::new();
    domains.pairing(&bdd, &mut back, next, cur).unwrap();
    let cur_set = domains.makeset(&bdd, &[cur]).unwrap();

    let mut state = domains.ithvar(&bdd, cur, 0).unwrap();
    for step in 1..=8 {
        let image = bdd.exists(bdd.apply_and(rel, state), cur_set);
        state = bdd.replace(image, &back);
        assert_eq!(state, domains.ithvar(&bdd, cur, step % 4).unwrap());
    }

    bdd.release(rel);
}

// ─── Printing ──────────────────────────────────────────────────────────────────

#[test]
fn printset_merges_values() {
    let (bdd, domains) = setup(&[6]);
    let f = bdd.apply_or(domains.ithvar(&bdd, 0, 2).unwrap(), domains.ithvar(&bdd, 0, 3).unwrap());
    assert_eq!(domains.printset_to_string(&bdd, f).unwrap(), "<0:2/3>");
}

#[test]
fn printset_into_sink() {
    let (bdd, domains) = setup(&[4, 4]);
    let f = domains.equals(&bdd, 0, 1).unwrap();

    let mut out = String::from("eq = ");
    domains.printset(&bdd, f, &mut out).unwrap();
    assert_eq!(out, "eq = <0:0, 1:0><0:1, 1:1><0:2, 1:2><0:3, 1:3>");
}

// ─── Manager binding ───────────────────────────────────────────────────────────

#[test]
fn other_manager_is_state_error() {
    let (bdd, domains) = setup(&[4]);
    let other = Bdd::default();
    other.new_vars(2).unwrap();

    let kinds = [
        domains.ithvar(&other, 0, 1).unwrap_err().kind(),
        domains.domain(&other, 0).unwrap_err().kind(),
        domains.equals(&other, 0, 0).unwrap_err().kind(),
        domains.makeset(&other, &[0]).unwrap_err().kind(),
        domains.scanset(&other, other.one()).unwrap_err().kind(),
        domains.printset_to_string(&other, other.one()).unwrap_err().kind(),
        domains.pairing(&other, &mut Pairing::new(), 0, 0).unwrap_err().kind(),
    ];
    assert!(kinds.iter().all(|&k| k == ErrorKind::State), "{:?}", kinds);

    assert!(domains.ithvar(&bdd, 0, 1).is_ok());
}

// ─── Reference discipline ──────────────────────────────────────────────────────

#[test]
fn encoders_leave_no_references() {
    let (bdd, mut domains) = setup(&[5, 5, 3]);
    domains.overlap(&bdd, 0, 2).unwrap();
    let baseline = bdd.num_nodes();

    let mut results: Vec<Ref> = Vec::new();
    results.push(domains.ithvar(&bdd, 0, 4).unwrap());
    results.push(domains.domain(&bdd, 1).unwrap());
    results.push(domains.equals(&bdd, 0, 1).unwrap());
    results.push(domains.makeset(&bdd, &[0, 1, 2]).unwrap());
    for &f in &results {
        assert_eq!(bdd.ref_count(f), 0);
    }

    // Only the table's variable sets survive a collection.
    bdd.collect_garbage();
    assert_eq!(bdd.num_nodes(), baseline);
    for i in 0..domains.len() {
        let set = domains.ithset(i).unwrap();
        assert_eq!(bdd.ref_count(set), 1);
        assert_eq!(bdd.set_vars(set).len(), {
            let mut vars = domains.vars(i).unwrap().to_vec();
            vars.sort();
            vars.dedup();
            vars.len()
        });
    }

    domains.teardown(&bdd).unwrap();
    bdd.collect_garbage();
    assert_eq!(bdd.num_nodes(), 0);
}

#[test]
fn held_results_survive_collection() {
    let (bdd, domains) = setup(&[8, 8]);
    let eq = bdd.hold(domains.equals(&bdd, 0, 1).unwrap());
    let printed = domains.printset_to_string(&bdd, eq).unwrap();

    bdd.collect_garbage();
    assert_eq!(domains.printset_to_string(&bdd, eq).unwrap(), printed);
    assert_eq!(eq, domains.equals(&bdd, 0, 1).unwrap());

    bdd.release(eq);
}
