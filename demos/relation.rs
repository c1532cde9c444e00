//! Reachability over a finite-domain transition relation.
//!
//! A counter `c` in `0..size` advances by `step` modulo `size`. Starting from
//! `start`, the reachable set is computed by repeated image steps and printed
//! grouped by block.
//!
//! ```text
//! cargo run --example relation -- --size 12 --step 3 --start 1
//! ```

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use log::info;

use fdd_rs::bdd::Bdd;
use fdd_rs::fdd::Domains;
use fdd_rs::pairing::Pairing;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reachable states of a modular counter")]
struct Cli {
    /// Number of counter values
    #[arg(long, default_value_t = 10)]
    size: u64,

    /// Increment per transition
    #[arg(long, default_value_t = 4)]
    step: u64,

    /// Initial value
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if cli.start >= cli.size {
        return Err(eyre!("start value {} is outside 0..{}", cli.start, cli.size));
    }

    let time_total = std::time::Instant::now();

    let bdd = Bdd::default();
    let mut domains = Domains::new();
    let cur = domains.extend(&bdd, &[cli.size, cli.size])?;
    let next = cur + 1;
    info!(
        "Counter blocks: cur = {:?}, next = {:?}",
        domains.vars(cur)?,
        domains.vars(next)?
    );

    // next = (cur + step) mod size
    let mut rel = bdd.hold(bdd.zero());
    for k in 0..cli.size {
        let edge = bdd.apply_and(
            domains.ithvar(&bdd, cur, k)?,
            domains.ithvar(&bdd, next, (k + cli.step) % cli.size)?,
        );
        let tmp = bdd.hold(bdd.apply_or(rel, edge));
        bdd.release(rel);
        rel = tmp;
    }
    info!("Transition relation has {} nodes", bdd.size(rel));

    let mut back = Pairing::new();
    domains.pairing(&bdd, &mut back, next, cur)?;
    let cur_set = bdd.hold(domains.makeset(&bdd, &[cur])?);

    let mut reached = bdd.hold(domains.ithvar(&bdd, cur, cli.start)?);
    let mut iterations = 0;
    loop {
        iterations += 1;
        let image = bdd.exists(bdd.apply_and(rel, reached), cur_set);
        let image = bdd.replace(image, &back);
        let total = bdd.hold(bdd.apply_or(reached, image));
        bdd.release(reached);
        if total == reached {
            reached = total;
            break;
        }
        reached = total;
        let freed = bdd.collect_garbage();
        info!("Iteration {}: freed {} nodes", iterations, freed);
    }

    let count = bdd.sat_count_set(reached, domains.ithset(cur)?);
    println!("Reached {} states after {} iterations", count, iterations);
    println!("reached = {}", domains.printset_to_string(&bdd, reached)?);

    bdd.release(reached);
    bdd.release(cur_set);
    bdd.release(rel);
    domains.teardown(&bdd)?;
    bdd.collect_garbage();
    println!("bdd = {:?}", bdd);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
