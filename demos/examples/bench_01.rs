//! Mixed Benchmark Suite
//!
//! The reference suite: a baseline empty loop followed by arithmetic,
//! hashing and JSON serialization. `empty_loop` is registered first, so
//! it is the baseline for the results history.
//!
//! Run with:
//!   cargo run --example bench_01 -p passbench-demos --release
//!   cargo run --example bench_01 -p passbench-demos --release -- --passes 1 hash
//!   cargo run --example bench_01 -p passbench-demos --release -- --format json

use passbench::prelude::*;
use serde_json::{Map, Value};
use std::hash::{BuildHasher, DefaultHasher, Hash, Hasher, RandomState};
use std::hint::black_box;
use std::sync::LazyLock;

/// Concatenated decimal integers 0..1Mi
static SAMPLE_CONTENT: LazyLock<String> = LazyLock::new(|| {
    let mut s = String::new();
    for i in 0..1024 * 1024 {
        s.push_str(&i.to_string());
    }
    s
});

/// Object of `c` keys, each holding a `c - 1` object, down to a string leaf
fn make_nested_object(c: usize) -> Value {
    if c == 0 {
        return Value::String("value".to_string());
    }
    let mut m = Map::new();
    for i in 0..c {
        m.insert(format!("key{i}"), make_nested_object(c - 1));
    }
    Value::Object(m)
}

fn json_stringify(depth: usize) -> impl FnMut(u64, &mut Timer<'_>) + 'static {
    move |n, timer| {
        let obj = make_nested_object(depth);
        timer.start();
        for _ in 0..n {
            black_box(serde_json::to_string(&obj).ok());
        }
    }
}

fn main() {
    let suite = Suite::new()
        .register("empty_loop", |n, _timer| {
            for i in 0..n {
                black_box(i);
            }
        })
        .register("sqrt", |n, _timer| {
            for _ in 0..n {
                black_box(black_box(42.0_f64).sqrt());
            }
        })
        // Builds the hasher inside the measured loop
        .register("hash_default", |n, _timer| {
            for _ in 0..n {
                let mut hasher = DefaultHasher::new();
                SAMPLE_CONTENT.hash(&mut hasher);
                black_box(hasher.finish());
            }
        })
        // Content and keys prepared before the clock restarts
        .register("hash_keyed", |n, timer| {
            let content = SAMPLE_CONTENT.as_str();
            let state = RandomState::new();
            timer.start();
            for _ in 0..n {
                black_box(state.hash_one(content));
            }
        })
        .register("json_stringify-4", json_stringify(4))
        .register("json_stringify-8", json_stringify(8));

    if let Err(e) = passbench::run(suite) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
