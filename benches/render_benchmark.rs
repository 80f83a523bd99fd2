//! Benchmarks for dir2docx rendering performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dir2docx::{package, DocxRenderer, FileEntry, RenderOptions};

/// Creates `file_count` synthetic Rust files of `line_count` lines each.
fn create_sources(file_count: usize, line_count: usize) -> Vec<FileEntry> {
    (0..file_count)
        .map(|f| {
            let mut content = String::new();
            for i in 0..line_count {
                content.push_str(&format!(
                    "    let value_{} = \"line {}\".len() + {}; // note\n",
                    i, i, f
                ));
            }
            FileEntry::new(format!("src/file_{}.rs", f), format!("fn f() {{\n{}}}\n", content))
        })
        .collect()
}

/// Benchmark highlighting and assembly at various sizes.
fn bench_render(c: &mut Criterion) {
    let renderer = DocxRenderer::new(RenderOptions::default()).unwrap();
    let mut group = c.benchmark_group("render");

    for (files, lines) in [(1, 100), (10, 100), (10, 1000)] {
        let sources = create_sources(files, lines);
        group.bench_function(format!("{}_files_{}_lines", files, lines), |b| {
            b.iter(|| renderer.render(black_box(&sources)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark fallback rendering without highlighting.
fn bench_plain(c: &mut Criterion) {
    let options = RenderOptions::new().with_association("*.rs", "no such language");
    let renderer = DocxRenderer::new(options).unwrap();
    let sources = create_sources(10, 1000);

    c.bench_function("render_plain_10_files", |b| {
        b.iter(|| renderer.render(black_box(&sources)).unwrap());
    });
}

/// Benchmark packaging an assembled document.
fn bench_package(c: &mut Criterion) {
    let renderer = DocxRenderer::new(RenderOptions::default()).unwrap();
    let result = renderer.render(&create_sources(10, 500)).unwrap();

    c.bench_function("package_10_files", |b| {
        b.iter(|| package::to_docx_bytes(black_box(&result.document)).unwrap());
    });
}

criterion_group!(benches, bench_render, bench_plain, bench_package);
criterion_main!(benches);
