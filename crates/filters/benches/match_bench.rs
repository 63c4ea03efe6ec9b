use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use notescope_filters::{KeywordFilter, LanguageSelector, Selector};

fn bench_keyword(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword");

    let summaries = vec![
        Some("Claim about the new fuel tax is misleading"),
        Some("Video of the ELECTION rally is from 2019"),
        Some("Cricket score posted before the match ended"),
        None,
        Some("Quote attributed to the minister was fabricated"),
        Some("Flood photo is from a different state; the caption is wrong"),
    ];

    group.throughput(Throughput::Elements(summaries.len() as u64));
    group.bench_function("hit_and_miss", |b| {
        let filter = KeywordFilter::new("Election");
        b.iter(|| {
            for s in &summaries {
                black_box(filter.matches(*s));
            }
        });
    });

    group.bench_function("inactive", |b| {
        let filter = KeywordFilter::new("");
        b.iter(|| {
            for s in &summaries {
                black_box(filter.matches(*s));
            }
        });
    });

    group.finish();
}

fn bench_selectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("selectors");

    let languages = vec![Some("hi"), Some("en"), Some("ta"), None, Some("mr"), Some("fr")];
    group.throughput(Throughput::Elements(languages.len() as u64));

    group.bench_function("india_composite", |b| {
        let selector = LanguageSelector::India;
        b.iter(|| {
            for l in &languages {
                black_box(selector.matches(*l));
            }
        });
    });

    group.bench_function("sentiment_exact", |b| {
        let selector: Selector<String> = Selector::Only("negative".to_string());
        let values = ["positive", "negative", "neutral"];
        b.iter(|| {
            for v in &values {
                black_box(selector.matches::<str>(Some(*v)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_keyword, bench_selectors);
criterion_main!(benches);
