// benches/clean_bench.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::{borrow::Cow, hint::black_box};
use textproc::{
    COLLAPSE_AND_TRIM, Cleaner, Context, OutputFormat, RemoveSingleChars, Stage, StripDigits,
    StripPunctuation, StripTags, WordClass, profile::preset,
};

const SAMPLES: &[(&str, &str)] = &[
    ("sentence", "Hello, World! 123 a b test-case."),
    ("clean", "already clean lower case words with nothing to strip"),
    (
        "markup",
        "<div class=\"post\"><h2>Weekly notes</h2><p>Shipped 3 fixes &amp; 2 features, \
         see <a href=\"/log\">the log</a>.</p></div>",
    ),
    ("cyrillic", "Привет, мир! Это тестовая строка: 42 слова и 7 чисел."),
];

fn page(repeat: usize) -> String {
    let body = "<p>The quick brown fox jumps over the lazy dog, 12 times &mdash; again!</p>\n";
    format!(
        "<html><head><style>p {{ margin: 0 }}</style><script>init();</script></head><body>{}</body></html>",
        body.repeat(repeat)
    )
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stage");
    let ctx = Context::default();
    let stages: [(&str, &dyn Stage); 5] = [
        ("strip_tags", &StripTags),
        ("strip_punctuation", &StripPunctuation),
        ("strip_digits", &StripDigits),
        ("remove_single_chars", &RemoveSingleChars),
        ("collapse_whitespace", &COLLAPSE_AND_TRIM),
    ];

    for (stage_name, stage) in stages {
        for &(sample_name, input) in SAMPLES {
            group.throughput(Throughput::Bytes(input.len() as u64));
            group.bench_with_input(BenchmarkId::new(stage_name, sample_name), input, |b, input| {
                b.iter(|| {
                    let text = black_box(input);
                    if stage.needs_apply(text, &ctx) {
                        black_box(stage.apply(Cow::Borrowed(text), &ctx).len())
                    } else {
                        black_box(text.len())
                    }
                });
            });
        }
    }
    group.finish();
}

fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");
    for word_class in WordClass::ALL {
        let cleaner = Cleaner::builder().word_class(*word_class).build();
        for &(sample_name, input) in SAMPLES {
            group.throughput(Throughput::Bytes(input.len() as u64));
            let id = BenchmarkId::new(format!("{word_class:?}"), sample_name);
            group.bench_with_input(id, input, |b, input| {
                b.iter(|| black_box(cleaner.clean(black_box(input)).render(OutputFormat::Csv)));
            });
        }
    }
    group.finish();
}

fn bench_web_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("web_page");
    let cleaner = Cleaner::new();
    let profile = preset::web_page();
    for repeat in [10, 1_000] {
        let input = page(repeat);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &input, |b, input| {
            b.iter(|| black_box(cleaner.clean_with_profile(&profile, black_box(input)).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stages, bench_clean, bench_web_page);
criterion_main!(benches);
