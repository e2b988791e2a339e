// Performance measurement for Table instances. Measure:
// * Initial load of random keys.
// * Mixed set, remove, get and range operations on the loaded table.
// * Full table scan.
//
// Passing --demo runs the console walk-through instead: insert 1..5,
// self-check, remove 1..5 and print what is left.

use log::{error, info};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{Config, LevelFilter, SimpleLogger};
use structopt::StructOpt;

use std::{process, time};

use symtab::Table;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "demo")]
    demo: bool,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "sets", default_value = "0")]
    sets: usize,

    #[structopt(long = "removes", default_value = "0")]
    removes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "ranges", default_value = "0")]
    ranges: usize,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();
    if let Err(err) = SimpleLogger::init(opts.log_level, Config::default()) {
        eprintln!("logger: {}", err);
    }

    let res = match opts.demo {
        true => do_demo(),
        false => do_perf(opts),
    };
    if let Err(err) = res {
        error!("{}", err);
        process::exit(1);
    }
}

fn do_demo() -> symtab::Result<()> {
    let mut st: Table<i32, String> = Table::new();

    for i in 1..=5 {
        let val = ((b'A' + (i as u8 - 1)) as char).to_string();
        st.put(i, Some(val));
    }
    st.validate()?;

    for i in 1..=5 {
        st.remove(&i);
    }
    st.validate()?;

    for (key, value) in st.iter() {
        println!("{} {}", key, value);
    }
    st.clear();
    Ok(())
}

fn do_perf(opts: Opt) -> symtab::Result<()> {
    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: Table<u64, u64> = Table::new();

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        let (key, val): (u64, u64) = (rng.gen(), rng.gen());
        index.set(key, val);
    }
    info!("loaded {} items in {:?}", opts.loads, start.elapsed());

    let start = time::Instant::now();
    let total = opts.sets + opts.removes + opts.gets + opts.ranges;
    let mut n = total;
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        let key = rng.gen::<u64>();
        if op < opts.sets {
            index.set(key, rng.gen());
        } else if op < (opts.sets + opts.removes) {
            index.remove(&key);
        } else if op < (opts.sets + opts.removes + opts.gets) {
            index.get(&key);
        } else {
            let high = key.saturating_add(rng.gen::<u32>() as u64);
            index.keys_in_range(&key, &high).take(100).count();
        }
        n -= 1;
    }
    info!("incremental operations {}, took {:?}", total, start.elapsed());

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iterating {} entries, took {:?}", n, start.elapsed());

    let start = time::Instant::now();
    index.validate()?;
    info!(
        "validated len:{} height:{}, took {:?}",
        index.len(),
        index.height(),
        start.elapsed()
    );

    Ok(())
}
