//! Benchmarks for the aggregation engine
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use statboard::aggregate::{aggregate, AggregateQuery, AggregationFunc, Filter};
use statboard::chart::ChartDescriptor;
use statboard::table::{parse_csv, LoadOptions, RowTable};

const AIRLINES: [&str; 6] = ["AA", "UA", "DL", "WN", "B6", "AS"];

fn create_test_table(rows: usize) -> RowTable {
    let mut csv = String::from("Year,Month,Reporting_Airline,CarrierDelay\n");
    for i in 0..rows {
        let year = 2005 + (i % 6);
        let month = 1 + (i % 12);
        let airline = AIRLINES[i % AIRLINES.len()];
        // Every seventh delay is missing
        if i % 7 == 0 {
            csv.push_str(&format!("{},{},{},\n", year, month, airline));
        } else {
            csv.push_str(&format!("{},{},{},{}\n", year, month, airline, i % 90));
        }
    }
    parse_csv(csv.as_bytes(), "bench", &LoadOptions::new()).unwrap()
}

fn delay_query(year: i64) -> AggregateQuery {
    AggregateQuery::measure("CarrierDelay", AggregationFunc::Mean)
        .filter(Filter::eq("Year", year))
        .group_by(&["Month", "Reporting_Airline"])
        .build()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [1_000, 10_000, 100_000] {
        let table = create_test_table(size);
        let query = delay_query(2010);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("mean_by_month_airline_{}", size), |b| {
            b.iter(|| aggregate(black_box(&table), black_box(&query)).unwrap())
        });

        let sum = AggregateQuery::measure("CarrierDelay", AggregationFunc::Sum)
            .group_by(&["Reporting_Airline"])
            .build();
        group.bench_function(format!("sum_by_airline_{}", size), |b| {
            b.iter(|| aggregate(black_box(&table), black_box(&sum)).unwrap())
        });
    }

    group.finish();
}

fn bench_chart(c: &mut Criterion) {
    let table = create_test_table(100_000);
    let result = aggregate(&table, &delay_query(2010)).unwrap();

    c.bench_function("line_chart_by_airline", |b| {
        b.iter(|| {
            ChartDescriptor::line(
                black_box(&result),
                "Month",
                "CarrierDelay",
                Some("Reporting_Airline"),
                "Average Carrier Delay Time (minutes) by Airline",
            )
            .unwrap()
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let rows = 10_000;
    let mut csv = String::from("Year,Month,Reporting_Airline,CarrierDelay\n");
    for i in 0..rows {
        csv.push_str(&format!("2010,{},{},{}\n", 1 + i % 12, AIRLINES[i % 6], i % 90));
    }

    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.bench_function("parse_csv_10000", |b| {
        b.iter(|| parse_csv(black_box(csv.as_bytes()), "bench", &LoadOptions::new()).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_chart, bench_parse);
criterion_main!(benches);
