//! Benchmarks for viewport windowing and render-plan derivation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vgrid::{EmployeeStatus, FieldKey, GridView, RowRecord, ROW_HEIGHT};

fn synthetic_rows(n: u64) -> Vec<RowRecord> {
    (0..n)
        .map(|id| RowRecord {
            id,
            name: format!("Employee {id}"),
            email: format!("employee{id}@example.com"),
            department: match id % 4 {
                0 => "Engineering".to_string(),
                1 => "Sales".to_string(),
                2 => "Support".to_string(),
                _ => "Marketing".to_string(),
            },
            salary: 40_000.0 + (id % 90) as f64 * 1_000.0,
            performance: (id % 101) as f64 / 10.0,
            status: EmployeeStatus::Active,
            start_date: "2021-06-15".to_string(),
        })
        .collect()
}

fn loaded_grid(n: u64) -> GridView {
    let mut grid = GridView::new();
    grid.load_rows(synthetic_rows(n))
        .expect("synthetic ids are unique");
    grid.resize(1280.0, 720.0);
    grid
}

/// Row-range arithmetic at a mid-dataset scroll position.
fn bench_visible_row_range(c: &mut Criterion) {
    let mut grid = loaded_grid(100_000);
    grid.set_scroll(0.0, 50_000.0 * ROW_HEIGHT);
    let viewport = grid.viewport().clone();

    c.bench_function("visible_row_range_100k", |b| {
        b.iter(|| black_box(&viewport).visible_row_range(black_box(100_000)))
    });
}

/// Full plan derivation, which layers column windowing, cell formatting and
/// slice assembly on top of the row range.
fn bench_render_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_plan");

    for rows in [1_000u64, 10_000, 100_000] {
        let mut grid = loaded_grid(rows);
        grid.set_scroll(120.0, rows as f32 / 2.0 * ROW_HEIGHT);

        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("derive", rows), &rows, |b, _| {
            b.iter(|| black_box(&grid).render_plan())
        });
    }

    group.finish();
}

/// The same plan serialized, which is what a host actually pulls per frame.
fn bench_render_plan_json(c: &mut Criterion) {
    let mut grid = loaded_grid(100_000);
    grid.set_scroll(120.0, 50_000.0 * ROW_HEIGHT);

    c.bench_function("render_plan_json_100k", |b| {
        b.iter(|| {
            black_box(&grid)
                .render_plan_json()
                .expect("plan serializes")
        })
    });
}

/// Multi-key re-sort of the full dataset, the heaviest committed-state
/// recompute an input can trigger.
fn bench_resort(c: &mut Criterion) {
    let mut group = c.benchmark_group("resort");

    for rows in [10_000u64, 100_000] {
        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("two_keys", rows), &rows, |b, &rows| {
            let mut grid = loaded_grid(rows);
            b.iter(|| {
                grid.toggle_sort(FieldKey::Department);
                grid.toggle_sort(FieldKey::Salary);
                // Walk both columns back to unsorted so each iteration does
                // the same work.
                for _ in 0..2 {
                    grid.toggle_sort(FieldKey::Department);
                    grid.toggle_sort(FieldKey::Salary);
                }
                black_box(grid.sort_sequence().len())
            })
        });
    }

    group.finish();
}

/// Scroll sweep across the dataset, re-deriving the plan at each stop.
fn bench_scroll_sweep(c: &mut Criterion) {
    let mut grid = loaded_grid(100_000);
    grid.toggle_sort(FieldKey::Salary);

    c.bench_function("scroll_sweep_100k", |b| {
        b.iter(|| {
            for step in 0..32u32 {
                grid.set_scroll(0.0, step as f32 * 3_000.0 * ROW_HEIGHT / 32.0);
                black_box(grid.render_plan().rows.len());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_visible_row_range,
    bench_render_plan,
    bench_render_plan_json,
    bench_resort,
    bench_scroll_sweep,
);

criterion_main!(benches);
