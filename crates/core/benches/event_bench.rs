//! 이벤트 모델 벤치마크
//!
//! 이벤트 구성, 필드 조회, 태그 검사, 프리미티브 파서 성능을 측정합니다.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ceelog_core::{Context, Event, Field, PrimitiveType, TagBucket, parse_first};

const FIELD_NAMES: [&str; 8] = [
    "host", "ident", "user", "date", "request", "status", "bytes", "referer",
];

fn build_event(ctx: &std::rc::Rc<Context>) -> Event {
    let mut event = Event::new(ctx);
    for name in FIELD_NAMES {
        event
            .add_string_field(name, format!("{name}-value"))
            .unwrap();
    }
    event.add_tag("web").unwrap();
    event.add_tag("access").unwrap();
    event
}

fn bench_event_building(c: &mut Criterion) {
    let ctx = Context::new();

    let mut group = c.benchmark_group("event_building");
    group.throughput(Throughput::Elements(1));

    group.bench_function("event_8_fields_2_tags", |b| {
        b.iter(|| build_event(black_box(&ctx)))
    });

    group.bench_function("field_255_values", |b| {
        b.iter(|| {
            let mut field = Field::new();
            field.set_name("many").unwrap();
            for i in 0..255 {
                field.add_string_value(i.to_string()).unwrap();
            }
            black_box(field)
        })
    });

    group.bench_function("shared_tagbucket_assign", |b| {
        let bucket = TagBucket::new(&ctx);
        bucket.add_tag("shared").unwrap();
        b.iter(|| {
            let mut event = Event::new(&ctx);
            event.assign_tagbucket(bucket.add_ref()).unwrap();
            black_box(event)
        })
    });

    group.finish();
}

fn bench_event_lookup(c: &mut Criterion) {
    let ctx = Context::new();
    let event = build_event(&ctx);

    let mut group = c.benchmark_group("event_lookup");
    group.throughput(Throughput::Elements(1));

    group.bench_function("field_first", |b| {
        b.iter(|| event.field(black_box("host")))
    });

    group.bench_function("field_last", |b| {
        b.iter(|| event.field(black_box("referer")))
    });

    group.bench_function("field_as_string_tags", |b| {
        b.iter(|| {
            let mut acc = String::new();
            event.field_as_string(black_box("event.tags"), &mut acc).unwrap();
            acc
        })
    });

    group.bench_function("has_tag", |b| b.iter(|| event.has_tag(black_box("access"))));

    group.finish();
}

fn bench_primitive_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_parsers");
    group.throughput(Throughput::Elements(1));

    let inputs = [
        (PrimitiveType::Rfc5424Date, "2003-10-11T22:14:15.003Z host"),
        (PrimitiveType::Rfc3164Date, "Oct 11 22:14:15 host"),
        (PrimitiveType::Ipv4, "192.168.100.200 rest"),
        (PrimitiveType::Number, "1234567890 rest"),
    ];

    for (ty, input) in inputs {
        group.bench_function(ty.name(), |b| {
            b.iter(|| {
                let mut offset = 0;
                ty.parse(black_box(input), &mut offset, None)
            })
        });
    }

    let order = PrimitiveType::ALL;
    group.bench_function("parse_first_all_types", |b| {
        b.iter(|| {
            let mut offset = 0;
            parse_first(&order, black_box("10:11:12 x"), &mut offset, Some("="))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_event_building,
    bench_event_lookup,
    bench_primitive_parsers
);
criterion_main!(benches);
