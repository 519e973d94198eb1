//! Performance benchmarks for the Coverage Engine.
//!
//! Covers the pure report computation at several roster sizes and the full
//! HTTP round trip for a report request.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use coverage_engine::api::{AppState, create_router};
use coverage_engine::calculation::{ContributionParams, build_report, compute_contribution};
use coverage_engine::config::ConfigLoader;
use coverage_engine::models::{ClinicianType, Roster};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

/// Builds a roster cycling through rotation, fellowship and APP entries.
fn create_roster(config: &ConfigLoader, size: usize) -> Roster {
    let inputs = [
        (
            ClinicianType::Madigan,
            ContributionParams {
                rotations: Some(2),
                ..Default::default()
            },
        ),
        (
            ClinicianType::Year1Fellow,
            ContributionParams {
                total_nights: Some(96),
                ..Default::default()
            },
        ),
        (
            ClinicianType::AppDayAndNight,
            ContributionParams {
                headcount: Some(3),
                days_per_month: Some(11),
                nights_per_month: Some(2),
                ..Default::default()
            },
        ),
    ];

    let mut roster = Roster::new();
    for (clinician_type, params) in inputs.iter().cycle().take(size) {
        let contribution = compute_contribution(*clinician_type, params, config.settings())
            .expect("valid benchmark input");
        roster.add(contribution.into_entry());
    }
    roster
}

/// Benchmark: report computation for growing rosters.
fn bench_report_by_roster_size(c: &mut Criterion) {
    let config = load_config();

    let mut group = c.benchmark_group("report");
    for size in [1usize, 10, 100, 1000] {
        let roster = create_roster(&config, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| black_box(build_report(black_box(roster), &config).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: a single contribution calculation.
fn bench_contribution(c: &mut Criterion) {
    let config = load_config();
    let params = ContributionParams {
        headcount: Some(2),
        nights_per_month: Some(12),
        ..Default::default()
    };

    c.bench_function("contribution_app_night_only", |b| {
        b.iter(|| {
            black_box(
                compute_contribution(
                    ClinicianType::AppNightOnly,
                    black_box(&params),
                    config.settings(),
                )
                .unwrap(),
            )
        })
    });
}

/// Benchmark: GET /sessions/:id/report over HTTP with a 20-entry roster.
fn bench_report_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = load_config();
    let roster = create_roster(&config, 20);

    let state = AppState::new(config);
    let session_id = state.sessions().create();
    state
        .sessions()
        .with_roster(session_id, |r| {
            *r = roster;
            Ok(())
        })
        .unwrap();
    let router = create_router(state);
    let uri = format!("/sessions/{}/report", session_id);

    c.bench_function("report_http_20_entries", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(uri.as_str())
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_report_by_roster_size,
    bench_contribution,
    bench_report_http
);
criterion_main!(benches);
