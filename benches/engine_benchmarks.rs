//! Benchmarks for the search core: raw move-count throughput (perft),
//! move generation alone, and depth-limited search at a few depths on the
//! starting position and a dense middlegame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quartergame::egtb::NoTablebase;
use quartergame::eval::MaterialPst;
use quartergame::movegen::{self, GenMode};
use quartergame::position::Position;
use quartergame::search::{self, SearchContext};
use quartergame::sync::StopFlag;
use quartergame::tt::TranspositionTable;

fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let list = movegen::generate(pos, GenMode::All);
    let mut nodes = 0;
    for i in 0..list.len() {
        let mv = list.get(i);
        let Ok(undo) = pos.make_move(mv) else {
            continue;
        };
        nodes += perft(pos, depth - 1);
        pos.unmake_move(mv, &undo);
    }
    nodes
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut startpos = Position::startpos();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| perft(&mut startpos.clone(), black_box(depth)))
        });
    }

    let mut kiwipete =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| perft(&mut kiwipete.clone(), black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::startpos();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(movegen::generate(&startpos, GenMode::All)))
    });

    let middlegame =
        Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(movegen::generate(&middlegame, GenMode::All)))
    });

    let kiwipete =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(movegen::generate(&kiwipete, GenMode::All)))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let evaluator = MaterialPst;
    let egtb = NoTablebase;

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let tt = TranspositionTable::new(16);
                let mut ctx = SearchContext::new(Position::startpos(), &tt, &evaluator, &egtb, StopFlag::new());
                search::iterative_deepening(&mut ctx, depth)
            })
        });
    }

    let tactical = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| {
                let tt = TranspositionTable::new(16);
                let pos = Position::from_fen(tactical).unwrap();
                let mut ctx = SearchContext::new(pos, &tt, &evaluator, &egtb, StopFlag::new());
                search::iterative_deepening(&mut ctx, depth)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search);
criterion_main!(benches);
