//! Deferred Start Example
//!
//! Two benchmarks with the same 2 ms setup and 1 ms of work per iteration.
//! `setup_measured` never calls `timer.start()`, so its setup is spread over
//! the iterations of every sample. `setup_excluded` calls it after setup and
//! reports ~1 ms/op.
//!
//! Run with: cargo run --example deferred_start -p passbench-demos --release -- --passes 2

use passbench::prelude::*;
use std::time::Duration;

const SETUP: Duration = Duration::from_millis(2);
const WORK: Duration = Duration::from_millis(1);

fn main() {
    let suite = Suite::new()
        .register("setup_measured", |n, _timer| {
            busy_wait(SETUP);
            for _ in 0..n {
                busy_wait(WORK);
            }
        })
        .register("setup_excluded", |n, timer| {
            busy_wait(SETUP);
            timer.start();
            for _ in 0..n {
                busy_wait(WORK);
            }
        });

    if let Err(e) = passbench::run(suite) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
