//! Benchmarks for page map normalization and queries.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sitenav::{NormalizeOptions, normalize_pages};
use sitenav_pagemap::{FolderEntry, MetaRecord, MetaEntry, PageEntry, PageMap, PageMapItem};

/// Build a content tree with the given depth and breadth.
///
/// Every folder carries an index page, a meta record ordering its children
/// in reverse, and `breadth` leaf pages next to `breadth` subfolders.
fn build_items(route: &str, depth: usize, breadth: usize) -> Vec<PageMapItem> {
    let mut children: Vec<PageMapItem> = Vec::new();

    let mut record = MetaRecord::new();
    for i in (0..breadth).rev() {
        record.insert(format!("page-{i}"), format!("Page {i}"));
    }
    children.push(MetaEntry::new(record).into());

    let base = if route == "/" { String::new() } else { route.to_owned() };
    let index_route = if base.is_empty() { "/".to_owned() } else { base.clone() };
    children.push(PageEntry::new("index", index_route).into());

    for i in 0..breadth {
        children.push(PageEntry::new(format!("page-{i}"), format!("{base}/page-{i}")).into());
    }

    if depth > 0 {
        for i in 0..breadth {
            let child_route = format!("{base}/section-{i}");
            children.push(
                FolderEntry::new(format!("section-{i}"), child_route.clone())
                    .with_children(build_items(&child_route, depth - 1, breadth))
                    .into(),
            );
        }
    }

    children
}

fn deepest_route(depth: usize) -> String {
    let mut route = String::new();
    for _ in 0..depth {
        route.push_str("/section-0");
    }
    route.push_str("/page-0");
    route
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    // Small: ~40 nodes, Medium: ~400 nodes, Large: ~3400 nodes
    for (depth, breadth, label) in [(2, 3, "small"), (3, 4, "medium"), (4, 5, "large")] {
        let items = build_items("/", depth, breadth);
        let options = NormalizeOptions::for_route(deepest_route(depth));

        group.bench_with_input(
            BenchmarkId::new("build_views", label),
            &items,
            |b, items| b.iter(|| normalize_pages(items, &options)),
        );
    }

    group.finish();
}

fn bench_active_resolution(c: &mut Criterion) {
    let items = build_items("/", 3, 4);

    let mut group = c.benchmark_group("active_resolution");

    group.bench_function("route_hit", |b| {
        let options = NormalizeOptions::for_route(deepest_route(3));
        b.iter(|| normalize_pages(&items, &options))
    });

    group.bench_function("route_miss", |b| {
        let options = NormalizeOptions::for_route("/nonexistent/route");
        b.iter(|| normalize_pages(&items, &options))
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let page_map = PageMap::new(build_items("/", 3, 4));

    let mut group = c.benchmark_group("queries");

    group.bench_function("get_all_pages", |b| {
        b.iter(|| sitenav::get_all_pages(&page_map, None))
    });

    group.bench_function("get_pages_under_route", |b| {
        b.iter(|| sitenav::get_pages_under_route(&page_map, "/section-0", None))
    });

    group.bench_function("get_current_level_pages", |b| {
        b.iter(|| sitenav::get_current_level_pages(&page_map, &deepest_route(3), None))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_active_resolution, bench_queries);

criterion_main!(benches);
