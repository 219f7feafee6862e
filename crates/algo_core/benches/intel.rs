//! Planning benchmarks for algo_core.
//!
//! Run with: `cargo bench -p algo_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use algo_core::catalog::UnitType;
use algo_core::grid::{Arena, Coord, Edge};
use algo_core::intel::EnemyInventory;
use algo_core::path_risk::PathRiskEstimator;
use algo_core::regions::{RegionLibrary, Side};
use algo_core::session::AlgoSession;
use algo_core::strategy::StrategyPolicy;
use algo_test_utils::fixtures::{enemy_board, standard_catalog, standard_config};
use algo_test_utils::MockEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Every other cell of the opponent half holds a turret.
fn crowded_cells() -> Vec<(i32, i32)> {
    Arena::default()
        .enemy_half()
        .into_iter()
        .filter(|c| (c.x + c.y) % 2 == 0)
        .map(|c| (c.x, c.y))
        .collect()
}

/// Scan, density and frontier queries on a crowded board.
pub fn intel_benchmark(c: &mut Criterion) {
    let catalog = standard_catalog();
    let lib = RegionLibrary::default();
    let board = enemy_board(&catalog, 10, UnitType::Turret, &crowded_cells());

    c.bench_function("scan_enemy_half", |b| {
        b.iter(|| EnemyInventory::scan(black_box(&board), lib.arena()));
    });

    let inventory = EnemyInventory::scan(&board, lib.arena());
    c.bench_function("lane_density", |b| {
        b.iter(|| {
            for side in Side::BOTH {
                for depth in 0..4 {
                    if let Some(lane) = lib.edge_lane(side, depth) {
                        black_box(inventory.density(lane, None));
                    }
                }
            }
        });
    });
    c.bench_function("frontier_dominant_row", |b| {
        b.iter(|| black_box(inventory.frontier_dominant_row(&lib, UnitType::Turret)));
    });
}

/// Risk scoring over every bottom edge cell.
pub fn risk_benchmark(c: &mut Criterion) {
    let catalog = standard_catalog();
    let arena = Arena::default();
    let engine = MockEngine::new(catalog.clone()).with_board(enemy_board(
        &catalog,
        10,
        UnitType::Turret,
        &crowded_cells(),
    ));
    let mut candidates: Vec<Coord> = arena.edge(Edge::BottomLeft);
    candidates.extend(arena.edge(Edge::BottomRight));
    let estimator = PathRiskEstimator::new(&catalog, arena);

    c.bench_function("safest_launch", |b| {
        b.iter(|| black_box(estimator.safest(&engine, black_box(&candidates))));
    });
}

/// A full planned turn on a crowded board.
pub fn turn_benchmark(c: &mut Criterion) {
    let catalog = standard_catalog();
    let board = enemy_board(&catalog, 10, UnitType::Turret, &crowded_cells());

    c.bench_function("plan_turn", |b| {
        b.iter(|| {
            let mut session =
                AlgoSession::on_game_start(&standard_config(), StrategyPolicy::balanced())
                    .unwrap();
            let mut engine = MockEngine::new(catalog.clone())
                .with_board(board.clone())
                .with_resources(40, 20);
            black_box(session.on_turn(&mut engine))
        });
    });
}

criterion_group!(benches, intel_benchmark, risk_benchmark, turn_benchmark);
criterion_main!(benches);
