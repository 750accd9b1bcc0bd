use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use watchstat::{
    aggregation::Aggregator,
    cleaner::clean_records,
    data_loader::parse_viewing_activity,
    filters::{MatchField, ViewingFilter},
    timezone::TimezoneConfig,
    types::{CleanedRecord, WatchTime},
};

const TITLES: [&str; 4] = [
    "The Office (U.S.): Season 3: The Merger (Episode 8)",
    "The Office: Series 1: Downsize (Episode 1)",
    "Dark: Season 1: Secrets (Episode 1)",
    "Squid Game: Season 1: Gganbu (Episode 6)",
];

fn create_test_records(count: usize) -> Vec<CleanedRecord> {
    let base_time = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| CleanedRecord {
            profile_name: if i % 2 == 0 { "Ekow" } else { "Ama" }.to_string(),
            title: TITLES[i % TITLES.len()].to_string(),
            start_time: base_time + Duration::minutes((i * 37) as i64),
            duration: WatchTime::from_secs(((i * 131) % 5400) as u64),
        })
        .collect()
}

fn create_export_text(count: usize) -> String {
    let mut text = String::from(
        "Profile Name,Start Time,Duration,Attributes,Title,Supplemental Video Type,\
         Device Type,Bookmark,Latest Bookmark,Country\n",
    );
    for record in create_test_records(count) {
        let clock = record.duration.format_clock();
        text.push_str(&format!(
            "{},{},{clock},,{},,Netflix Windows App,{clock},{clock},GH (Ghana)\n",
            record.profile_name,
            record.start_time.format("%Y-%m-%d %H:%M:%S"),
            record.title,
        ));
    }
    text
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let filter = ViewingFilter::new(MatchField::Title, "The Office (U.S.)");

    for size in [1_000, 10_000] {
        let records = create_test_records(size);

        group.bench_function(format!("summarize_utc_{size}"), |b| {
            let aggregator = Aggregator::default();
            b.iter(|| aggregator.summarize("bench", black_box(&records)));
        });

        group.bench_function(format!("summarize_named_zone_{size}"), |b| {
            let aggregator = Aggregator::new(TimezoneConfig::parse("America/New_York").unwrap());
            b.iter(|| aggregator.summarize("bench", black_box(&records)));
        });

        group.bench_function(format!("filter_{size}"), |b| {
            b.iter(|| filter.apply(black_box(&records)));
        });
    }

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let text = create_export_text(10_000);

    c.bench_function("parse_and_clean_10000", |b| {
        b.iter(|| {
            let raw = parse_viewing_activity(black_box(&text)).unwrap();
            clean_records(raw).unwrap()
        });
    });
}

criterion_group!(benches, benchmark_aggregation, benchmark_parsing);
criterion_main!(benches);
