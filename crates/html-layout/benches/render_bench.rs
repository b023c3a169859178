//! HTML 레이아웃 벤치마크
//!
//! 패턴 컴파일과 행 렌더링(페이지 경계 포함) 처리량을 측정합니다.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loglayout_core::event::{Level, LoggingEvent, ThrowableProxy};
use loglayout_html::{ConverterChain, ConverterRegistry, HtmlLayoutBuilder};

const PATTERNS: &[(&str, &str)] = &[
    ("simple", "%level%msg"),
    ("default", "%date%thread%level%logger%mdc%msg"),
    ("decorated", "%d{HH:mm:ss.SSS} [%-10.30thread] %-5level %logger{36} - %X{request_id} %msg%n"),
];

fn sample_event() -> LoggingEvent {
    LoggingEvent::new(Level::Info, "com.example.api.OrderController", "order <1234> accepted")
        .with_thread("http-nio-8080-exec-7")
        .with_mdc("request_id", "550e8400-e29b-41d4-a716-446655440000")
        .with_mdc("user", "kim")
}

fn bench_compile(c: &mut Criterion) {
    let registry = ConverterRegistry::with_defaults();
    let mut group = c.benchmark_group("chain_compile");

    for (name, pattern) in PATTERNS {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, p| {
            b.iter(|| ConverterChain::compile(black_box(p), &registry).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let event = sample_event();
    let failing = sample_event().with_throwable(
        ThrowableProxy::new("IllegalStateException", Some("inventory mismatch".to_owned()))
            .with_frame("com.example.Inventory.reserve(Inventory.java:88)")
            .with_frame("com.example.OrderService.place(OrderService.java:41)"),
    );

    let mut group = c.benchmark_group("row_render");
    group.throughput(Throughput::Elements(1));

    for (name, pattern) in PATTERNS {
        let mut layout = HtmlLayoutBuilder::new().pattern(*pattern).build().unwrap();
        layout.start().unwrap();
        group.bench_function(BenchmarkId::new("row", name), |b| {
            b.iter(|| layout.do_layout(black_box(&event)).unwrap())
        });
    }

    let mut layout = HtmlLayoutBuilder::new().build().unwrap();
    layout.start().unwrap();
    group.bench_function("row_with_throwable", |b| {
        b.iter(|| layout.do_layout(black_box(&failing)).unwrap())
    });

    // 매 행마다 페이지 경계
    let mut layout = HtmlLayoutBuilder::new().row_limit(1).build().unwrap();
    layout.start().unwrap();
    group.bench_function("row_with_page_break", |b| {
        b.iter(|| layout.do_layout(black_box(&event)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_compile, bench_render);
criterion_main!(benches);
