//! Criterion benchmarks for the key register and shortcut parsing.
//!
//! Key lookups sit on the hook thread only while signals are built, but the
//! shortcut file is re-parsed on every rebuild, so both are worth watching.
//!
//! Run with:
//! ```bash
//! cargo bench --package beacon-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use beacon_core::keymap::{linux_x11, windows_vk};
use beacon_core::{KeyConfig, KeyMapper, KeyRegister};

// ── Representative inputs ─────────────────────────────────────────────────────

const BENCH_KEY_NAMES: &[&str] = &[
    "A", "Z", "0", "9", "F1", "F12", "Num 1", "Num 9", "Ctrl", "Alt", "Shift", "Win", "/",
    "Enter", "Esc", "Space", "Left", "Right", "Up", "Down",
];

const BENCH_SHORTCUTS: &str = "\
; overlay shortcuts
[general]
theme = dark

[commands]
toggle = Ctrl+Num 1
stop = Win+/
toggle-transparency = Ctrl+Num 3 ; dims the overlay
toggle-window-anonymity = Ctrl+Num 4
clear-screenshot = Ctrl+Num 9
";

// ── Benchmarks: register lookup ───────────────────────────────────────────────

fn bench_register_lookup(c: &mut Criterion) {
    let register = KeyRegister::with_table(windows_vk::KEY_TABLE, windows_vk::PRESSED_MASK);
    let mut group = c.benchmark_group("key_register");

    group.bench_with_input(BenchmarkId::new("get", "A"), &"A", |b, &name| {
        b.iter(|| register.get(black_box(name)))
    });

    group.bench_with_input(BenchmarkId::new("get", "missing"), &"Hyper", |b, &name| {
        b.iter(|| register.get(black_box(name)))
    });

    group.bench_function("key_code_batch_20", |b| {
        b.iter(|| {
            BENCH_KEY_NAMES
                .iter()
                .map(|name| KeyMapper::key_code(&register, black_box(name)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_register_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_register");

    group.bench_function("with_table_x11", |b| {
        b.iter(|| {
            KeyRegister::with_table(black_box(linux_x11::KEY_TABLE), linux_x11::PRESSED_MASK)
        })
    });

    group.finish();
}

// ── Benchmarks: shortcut parsing ──────────────────────────────────────────────

fn bench_shortcut_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_config");

    group.bench_function("parse_default_file", |b| {
        b.iter(|| KeyConfig::parse(black_box(BENCH_SHORTCUTS)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_register_lookup,
    bench_register_build,
    bench_shortcut_parse,
);
criterion_main!(benches);
