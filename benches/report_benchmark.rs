use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settlement_report::core::calendar;
use settlement_report::report::aggregate::Aggregator;
use settlement_report::report::daily::DailyReport;
use settlement_report::report::ranking::Ranker;
use settlement_report::simulation::sample_data::{build_sample_set, SampleConfig};

fn sample(rows: usize) -> settlement_report::core::instruction::InstructionSet {
    let config = SampleConfig {
        rows,
        seed: Some(2017),
        include_seed_rows: true,
    };
    let today = NaiveDate::from_ymd_opt(2017, 5, 5).unwrap();
    build_sample_set(&config, today).unwrap()
}

fn bench_calendar_adjust(c: &mut Criterion) {
    let saturday = NaiveDate::from_ymd_opt(2017, 5, 6).unwrap();
    c.bench_function("calendar_adjust", |b| {
        b.iter(|| {
            calendar::adjust(black_box("USD"), black_box(saturday));
            calendar::adjust(black_box("AED"), black_box(saturday))
        })
    });
}

fn bench_sum_by_date_10k(c: &mut Criterion) {
    let set = sample(10_000);
    c.bench_function("sum_by_date_10k", |b| {
        b.iter(|| Aggregator::sum_by_date(black_box(set.instructions())))
    });
}

fn bench_rank_10k(c: &mut Criterion) {
    let set = sample(10_000);
    c.bench_function("rank_10k", |b| {
        b.iter(|| Ranker::rank(&Aggregator::sum_by_counterparty(black_box(set.instructions())).unwrap()))
    });
}

fn bench_daily_report_100k(c: &mut Criterion) {
    let set = sample(100_000);
    c.bench_function("daily_report_100k", |b| {
        b.iter(|| DailyReport::build(black_box(&set)))
    });
}

criterion_group!(
    benches,
    bench_calendar_adjust,
    bench_sum_by_date_10k,
    bench_rank_10k,
    bench_daily_report_100k
);
criterion_main!(benches);
