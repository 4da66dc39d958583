//! PassBench Demos
//!
//! Runnable example suites. This crate is not published; it exists solely
//! to host examples that depend on `passbench`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p passbench-demos --release
//! ```
//!
//! | Example | Shows |
//! |---------|-------|
//! | `bench_01` | Mixed suite: empty loop, `sqrt`, hashing, JSON serialization |
//! | `deferred_start` | `timer.start()` excluding setup from the measurement |
//!
//! Every example accepts the passbench CLI flags, e.g.
//! `-- --passes 1 --target-ms 200 json` or `-- list`.
