use criterion::{Criterion, criterion_group, criterion_main};
use common::game::{Board, Mark, SessionRng, calculate_bot_move, check_win};

fn bench_random_tier() {
    let mut board = Board::new();
    board.set_cell(0, Mark::X);

    let mut rng = SessionRng::from_random();
    calculate_bot_move(&board, Mark::O, &mut rng);
}

fn bench_win_tier() {
    let mut board = Board::new();
    board.set_cell(0, Mark::X);
    board.set_cell(1, Mark::X);
    board.set_cell(3, Mark::O);
    board.set_cell(4, Mark::O);

    let mut rng = SessionRng::from_random();
    calculate_bot_move(&board, Mark::O, &mut rng);
}

fn bench_bot_vs_bot_round() {
    let mut board = Board::new();
    let mut current_mark = Mark::X;
    let mut rng = SessionRng::from_random();

    loop {
        let Some(index) = calculate_bot_move(&board, current_mark, &mut rng) else {
            break;
        };
        board.set_cell(index, current_mark);
        if check_win(&board).is_some() || board.is_full() {
            break;
        }
        current_mark = current_mark.opponent().unwrap();
    }
}

fn bot_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot");

    group.bench_function("random_tier", |b| b.iter(bench_random_tier));

    group.bench_function("win_tier", |b| b.iter(bench_win_tier));

    group.bench_function("bot_vs_bot_round", |b| b.iter(bench_bot_vs_bot_round));

    group.finish();
}

criterion_group!(benches, bot_bench);
criterion_main!(benches);
