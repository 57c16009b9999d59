//! Performance benchmarks for the attendance pipeline.
//!
//! Covers CSV ingestion plus record preparation, the dashboard build over an
//! already prepared record set, and clustering on its own, at several upload
//! sizes.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::calculation::{
    DashboardQuery, build_dashboard, cluster_employees, employee_days, prepare_records,
};
use attendance_engine::config::DashboardConfig;
use attendance_engine::ingest::read_records;
use chrono::NaiveDate;

const HEADER: &str = "tanggal,employee_id,checkin_date_get,checkin_time_get,checkout_date_get,checkout_time_get,dir_title,type_work_name,pos_grade,komp_title,kategori_jabatan,generasi,jk_keterangan_name";

/// Builds a synthetic export with `rows` records spread over 60 days and
/// 200 employees. Every 17th record is a void punch.
fn synthetic_csv(rows: usize) -> String {
    let directorates = ["Operations", "Finance", "Human Capital"];
    let grades = ["G1", "G2", "G3", "G4"];
    let generations = ["Gen X", "Millennial", "Gen Z"];
    let mut csv = String::from(HEADER);

    for i in 0..rows {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days((i % 60) as i64);
        let checkin = format!("{:02}:{:02}:00", 7 + i % 3, (i * 7) % 60);
        let (checkout_date, checkout) = if i % 17 == 0 {
            ("2000-01-01".to_string(), "12:12:12".to_string())
        } else {
            (day.to_string(), format!("{:02}:{:02}:00", 15 + i % 5, (i * 11) % 60))
        };
        csv.push_str(&format!(
            "\n{day},E{:04},{day},{checkin},{checkout_date},{checkout},{},Office,{},K{},Staff,{},Regular",
            i % 200,
            directorates[i % directorates.len()],
            grades[i % grades.len()],
            i % 6,
            generations[i % generations.len()],
        ));
    }
    csv.push('\n');
    csv
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// Benchmark: CSV ingestion, normalization and working hours.
fn bench_prepare(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let mut group = c.benchmark_group("prepare_records");

    for rows in [1_000usize, 10_000] {
        let csv = synthetic_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| {
                let raw = read_records(black_box(csv.as_bytes())).unwrap();
                black_box(prepare_records(raw, &config))
            })
        });
    }

    group.finish();
}

/// Benchmark: every aggregation plus clustering over prepared records.
fn bench_dashboard(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let query = DashboardQuery::default();
    let mut group = c.benchmark_group("build_dashboard");

    for rows in [1_000usize, 10_000, 50_000] {
        let records =
            prepare_records(read_records(synthetic_csv(rows).as_bytes()).unwrap(), &config);
        group.throughput(Throughput::Elements(rows as u64));
        if rows >= 50_000 {
            group.sample_size(10);
        }
        group.bench_with_input(BenchmarkId::from_parameter(rows), &records, |b, records| {
            b.iter(|| black_box(build_dashboard(black_box(records), &query, &config, today())))
        });
    }

    group.finish();
}

/// Benchmark: k-means on employee totals alone.
fn bench_clustering(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let records = prepare_records(
        read_records(synthetic_csv(10_000).as_bytes()).unwrap(),
        &config,
    );
    let days = employee_days(&records);

    c.bench_function("cluster_200_employees", |b| {
        b.iter(|| black_box(cluster_employees(black_box(&days), &config.clustering)))
    });
}

criterion_group!(benches, bench_prepare, bench_dashboard, bench_clustering);
criterion_main!(benches);
