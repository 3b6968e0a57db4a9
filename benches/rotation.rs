use banner_rotator::{BannerSet, ElementRef, ManualScheduler, MemoryDocument, Rotator, Selector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn banner_set(count: usize) -> BannerSet<ElementRef> {
    let sources: Vec<String> = (0..count).map(|i| format!("banner-{}.png", i)).collect();
    let document = MemoryDocument::image_slider(sources, "active");
    let selector = Selector::parse(".image-slider img").unwrap();
    BannerSet::query(&document, &selector)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for &count in &[3usize, 32, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rotator = Rotator::new(banner_set(count));
            b.iter(|| black_box(rotator.tick()));
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for &count in &[3usize, 32, 1024] {
        let sources: Vec<String> = (0..count).map(|i| format!("banner-{}.png", i)).collect();
        let document = MemoryDocument::image_slider(sources, "active");
        let selector = Selector::parse(".image-slider img").unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(BannerSet::query(&document, &selector).len()));
        });
    }

    group.finish();
}

fn bench_manual_schedule(c: &mut Criterion) {
    c.bench_function("manual_scheduler_100_firings", |b| {
        b.iter(|| {
            let scheduler = ManualScheduler::new();
            let _handle = Rotator::new(banner_set(8))
                .start(&scheduler, Duration::from_millis(10))
                .unwrap();
            black_box(scheduler.advance(Duration::from_millis(1000)))
        });
    });
}

criterion_group!(benches, bench_tick, bench_query, bench_manual_schedule);
criterion_main!(benches);
