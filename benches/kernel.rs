use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fractal_stream::{
    ExecutorKind, PixelBuffer, RunConfig, RunController, Tile, Viewport, compute_iterations,
    compute_iterations_parallel_rayon,
};

fn frame_tile(viewport: &Viewport, max_iterations: u32) -> Tile {
    Tile {
        start: 0,
        stop: viewport.total_pixels(),
        width: viewport.pixel_width(),
        offset_x: viewport.offset_x(),
        offset_y: viewport.offset_y(),
        pan_x: viewport.pan_x(),
        pan_y: viewport.pan_y(),
        zoom: viewport.zoom(),
        max_iterations,
    }
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel");
    let viewport = Viewport::new(320, 240, -40.0, 0.0, 80.0).expect("valid viewport");

    for max_iterations in [100_u32, 500] {
        let tile = frame_tile(&viewport, max_iterations);

        group.bench_with_input(BenchmarkId::new("serial", max_iterations), &tile, |b, tile| {
            b.iter(|| black_box(compute_iterations(black_box(tile))))
        });
        group.bench_with_input(BenchmarkId::new("rayon", max_iterations), &tile, |b, tile| {
            b.iter(|| black_box(compute_iterations_parallel_rayon(black_box(tile))))
        });
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    group.sample_size(20);

    for strategy in [
        ExecutorKind::Serial,
        ExecutorKind::WorkerPool,
        ExecutorKind::BatchedFeedback,
        ExecutorKind::Accelerated,
    ] {
        let config = RunConfig {
            viewport: Viewport::new(320, 240, 0.0, 0.0, 80.0).expect("valid viewport"),
            max_iterations: 200,
            strategy,
            num_workers: 4,
            ..RunConfig::default()
        };

        group.bench_with_input(
            BenchmarkId::new("render", strategy.config_name()),
            &config,
            |b, config| {
                let mut controller = RunController::new();
                controller.live_viewport().set_dimensions(config.viewport.dimensions());
                b.iter(|| {
                    let mut buffer = PixelBuffer::new(config.viewport.dimensions());
                    controller.start_run(config.clone()).expect("valid config");
                    black_box(controller.render_into(&mut buffer))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_kernel, bench_strategies);
criterion_main!(benches);
