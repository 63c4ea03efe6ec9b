use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use notescope_core::{compute_view, Dataset};
use notescope_filters::{FilterCriteria, LanguageSelector, Selector};
use notescope_formats::{Record, Schema};

const LANGUAGES: [&str; 6] = ["hi", "en", "ta", "ur", "mr", "fr"];
const SENTIMENTS: [&str; 3] = ["positive", "neutral", "negative"];
const WEEK_MILLIS: u64 = 7 * 24 * 60 * 60 * 1000;

fn synthetic_dataset(rows: usize) -> Dataset {
    let headers = [
        "noteId",
        "tweetId",
        "createdAtMillis",
        "detected_language",
        "sentiment_category",
        "is_political",
        "is_hateful",
        "summary_en",
        "political_keywords_flagged",
    ];
    let schema = Schema::new(headers.iter().map(|h| h.to_string()).collect());

    let records = (0..rows)
        .map(|i| {
            let values = vec![
                i.to_string(),
                (1_000_000 + i).to_string(),
                (1_704_240_000_000 + (i as u64 % 26) * WEEK_MILLIS).to_string(),
                LANGUAGES[i % LANGUAGES.len()].to_string(),
                SENTIMENTS[i % SENTIMENTS.len()].to_string(),
                (i % 2 == 0).to_string(),
                (i % 7 == 0).to_string(),
                format!("Note {} about election spending and tax policy", i),
                format!("tax, election, kw{}", i % 40),
            ];
            Record::new(values, i + 2)
        })
        .collect();

    Dataset::derive(schema, records)
}

fn bench_compute_view(c: &mut Criterion) {
    let dataset = synthetic_dataset(50_000);

    let mut group = c.benchmark_group("compute_view");
    group.throughput(Throughput::Elements(dataset.len() as u64));

    group.bench_function("unfiltered_50k", |b| {
        let criteria = FilterCriteria::default();
        b.iter(|| black_box(compute_view(&dataset, &criteria)));
    });

    group.bench_function("india_keyword_50k", |b| {
        let criteria = FilterCriteria {
            language: LanguageSelector::India,
            keyword: "ELECTION".to_string(),
            ..Default::default()
        };
        b.iter(|| black_box(compute_view(&dataset, &criteria)));
    });

    group.bench_function("week_sentiment_flags_50k", |b| {
        let criteria = FilterCriteria {
            week: Selector::Only("2024-01-08".to_string()),
            sentiment: Selector::Only("negative".to_string()),
            is_political: Selector::Only(true),
            ..Default::default()
        };
        b.iter(|| black_box(compute_view(&dataset, &criteria)));
    });

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("derive_10k", |b| {
        b.iter(|| black_box(synthetic_dataset(10_000)));
    });

    group.finish();
}

criterion_group!(benches, bench_compute_view, bench_load);
criterion_main!(benches);
