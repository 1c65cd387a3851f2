//! Coverage Operations Benchmarks
//!
//! Benchmarks for summarizing, merging and converting coverage maps.
//!
//! Run with: `cargo bench --bench coverage_ops`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use covkit::{
    merge_coverage_maps, summarize_coverage, yui_coverage, BranchMeta, CoverageMap, FileCoverage,
    FunctionMeta, LcovFormatter, Location, MergeOptions,
};

fn create_file(path: &str, statements: u32, seed: u64) -> FileCoverage {
    let mut file = FileCoverage::new(path);
    for i in 0..statements {
        let count = (u64::from(i) * 7 + seed) % 5;
        file.insert_statement(i.to_string(), Location::at_line(i / 2 + 1), count);
    }
    for i in 0..statements / 10 {
        let count = (u64::from(i) + seed) % 3;
        file.insert_function(
            i.to_string(),
            FunctionMeta::new(format!("fn_{i}"), i * 20 + 1),
            count,
        );
        file.insert_branch(
            i.to_string(),
            BranchMeta::new(i * 20 + 2, "if"),
            vec![count, (count + 1) % 2],
        );
    }
    file
}

fn create_map(files: usize, statements: u32, seed: u64) -> CoverageMap {
    (0..files)
        .map(|i| {
            let path = format!("src/module_{i}.js");
            let file = create_file(&path, statements, seed);
            (path, file)
        })
        .collect()
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_coverage");

    for files in [10, 100, 500] {
        let map = create_map(files, 200, 1);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{files}_files")),
            &map,
            |bench, map| {
                bench.iter(|| {
                    let mut map = map.clone();
                    black_box(summarize_coverage(&mut map));
                });
            },
        );
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_coverage_maps");
    let options = MergeOptions::strict();

    for runs in [2, 8, 32] {
        let maps: Vec<CoverageMap> = (0..runs).map(|seed| create_map(50, 200, seed)).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{runs}_runs")),
            &maps,
            |bench, maps| {
                bench.iter(|| black_box(merge_coverage_maps(maps.iter(), &options)));
            },
        );
    }

    group.finish();
}

fn bench_yui_conversion(c: &mut Criterion) {
    let map = create_map(100, 200, 3);
    c.bench_function("yui_coverage_100_files", |bench| {
        bench.iter(|| black_box(yui_coverage(black_box(&map))));
    });
}

fn bench_lcov_generation(c: &mut Criterion) {
    let map = create_map(100, 200, 4);
    c.bench_function("lcov_generate_100_files", |bench| {
        bench.iter(|| black_box(LcovFormatter::new(black_box(&map)).generate()));
    });
}

criterion_group!(
    benches,
    bench_summarize,
    bench_merge,
    bench_yui_conversion,
    bench_lcov_generation
);
criterion_main!(benches);
