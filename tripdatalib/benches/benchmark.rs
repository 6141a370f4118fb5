use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use tripdatalib::{TripDataset, hexbin};

/// Build a synthetic month of trips: 100k rows spread over all hours and a
/// few kilometers of Manhattan.
#[allow(clippy::expect_used)]
fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::from("Date/Time,Lat,Lon,Base\n");
    for i in 0..rows {
        let day = 1 + (i / 5000) % 28;
        let hour = i % 24;
        let minute = (i / 24) % 60;
        let lat = 40.70 + ((i % 997) as f64) * 0.0001;
        let lon = -74.00 + ((i % 751) as f64) * 0.0001;
        writeln!(csv, "9/{day}/2014 {hour}:{minute:02}:00,{lat:.4},{lon:.4},B02512")
            .expect("write to string");
    }
    csv
}

#[allow(clippy::expect_used)]
fn bench_dataset(c: &mut Criterion) {
    let csv = synthetic_csv(100_000);

    c.bench_function("dataset_parse_100k", |b| {
        b.iter(|| {
            let mut data = TripDataset::new();
            data.parse(std::hint::black_box(&csv)).expect("parse");
            std::hint::black_box(data);
        });
    });

    let mut data = TripDataset::new();
    data.parse(&csv).expect("parse");

    c.bench_function("dataset_filter_by_hour", |b| {
        b.iter(|| {
            let filtered = data.filter_by_hour(std::hint::black_box(8)).expect("filter");
            std::hint::black_box(filtered);
        });
    });

    c.bench_function("dataset_minute_histogram", |b| {
        b.iter(|| {
            let buckets = data.minute_histogram(std::hint::black_box(8)).expect("histogram");
            std::hint::black_box(buckets);
        });
    });

    let points: Vec<(f64, f64)> = data.iter().map(|r| (r.lat, r.lon)).collect();

    c.bench_function("hexbin_aggregate_100k", |b| {
        b.iter(|| {
            let layer = hexbin::aggregate(std::hint::black_box(&points), 100.0);
            std::hint::black_box(layer);
        });
    });
}

criterion_group!(
    name = tripdatalib_benches;
    config = Criterion::default().sample_size(20);
    targets = bench_dataset
);
criterion_main!(tripdatalib_benches);
