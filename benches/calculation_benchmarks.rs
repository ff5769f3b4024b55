//! Performance benchmarks for the Payroll Engine.
//!
//! This benchmark suite measures:
//! - Single employee pay calculation
//! - Attendance aggregation over a month of records
//! - Period runs of 100 and 1000 employees through the in-memory store
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    AttendanceCredits, DeductionRule, NegativeNetPayPolicy, PayInputs, PayPolicies, TaxRule,
    aggregate_attendance, calculate_pay, is_weekday,
};
use payroll_engine::models::{AttendanceRecord, AttendanceStatus, Employee, PayrollPeriod};
use payroll_engine::processing::{InMemoryStore, PayrollProcessor};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_employee(id: String, base_salary: i64) -> Employee {
    Employee {
        id,
        company_id: "bench_co".to_string(),
        base_salary: Decimal::new(base_salary, 0),
        hire_date: date(2020, 1, 1),
        termination_date: None,
        is_active: true,
    }
}

/// One record per January 2026 weekday, every fifth day a half day.
fn create_month_of_attendance(employee_id: &str) -> Vec<AttendanceRecord> {
    date(2026, 1, 1)
        .iter_days()
        .take_while(|d| *d <= date(2026, 1, 31))
        .filter(|d| is_weekday(*d))
        .enumerate()
        .map(|(i, d)| AttendanceRecord {
            employee_id: employee_id.to_string(),
            date: d,
            check_in: chrono::NaiveTime::from_hms_opt(9, 0, 0),
            check_out: chrono::NaiveTime::from_hms_opt(17, 30, 0),
            status: if i % 5 == 4 {
                AttendanceStatus::HalfDay
            } else {
                AttendanceStatus::Present
            },
        })
        .collect()
}

/// Creates a store holding one January period and `count` employees.
fn create_store(count: usize) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    for i in 0..count {
        let id = format!("emp_{:04}", i);
        store
            .add_attendance(create_month_of_attendance(&id))
            .expect("Failed to seed attendance");
        store
            .add_employee(create_employee(id, 2500 + (i as i64 % 50) * 100))
            .expect("Failed to seed employee");
    }
    store
}

fn create_period() -> PayrollPeriod {
    PayrollPeriod::draft(
        "2026-01",
        "bench_co",
        "January 2026",
        date(2026, 1, 1),
        date(2026, 1, 31),
        date(2026, 2, 5),
    )
}

/// Benchmark: one employee's pay calculation.
fn bench_single_calculation(c: &mut Criterion) {
    let employee = create_employee("emp_bench_001".to_string(), 3000);
    let inputs = PayInputs::new(22, Decimal::new(205, 1));
    let tax = TaxRule::default();
    let deductions = DeductionRule::PercentOfBase {
        rate: Decimal::new(2, 2),
    };

    c.bench_function("single_calculation", |b| {
        b.iter(|| {
            calculate_pay(
                black_box(&employee),
                black_box(&inputs),
                &tax,
                &deductions,
                NegativeNetPayPolicy::Flag,
            )
        })
    });
}

/// Benchmark: aggregating a month of attendance records.
fn bench_attendance_aggregation(c: &mut Criterion) {
    let records = create_month_of_attendance("emp_bench_001");
    let credits = AttendanceCredits::default();

    c.bench_function("attendance_month", |b| {
        b.iter(|| {
            aggregate_attendance(
                "emp_bench_001",
                black_box(&records),
                date(2026, 1, 1),
                date(2026, 1, 31),
                &credits,
            )
        })
    });
}

/// Benchmark: full period runs.
///
/// Each iteration reseeds the period in `draft` so the run can be repeated.
fn bench_period_runs(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("period_processing");

    for count in [100usize, 1000] {
        let store = create_store(count);
        let processor = PayrollProcessor::new(Arc::clone(&store), PayPolicies::default());

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.to_async(&rt).iter(|| async {
                store.add_period(create_period()).unwrap();
                black_box(processor.process_period("2026-01").await.unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_attendance_aggregation,
    bench_period_runs
);
criterion_main!(benches);
