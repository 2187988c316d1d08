use checkers_engine::{utils::count_paths, Board, Color, GameService};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

fn copy_board(board: &Board) -> Board {
    board.clone()
}

fn any_move_both_sides(board: &Board) -> bool {
    board.any_legal_move(Color::White, None) && board.any_legal_move(Color::Black, None)
}

fn stupid_game(mut game: GameService, max_steps: usize, rng: &mut StdRng) -> GameService {
    for _ in 0..max_steps {
        let Some((square, dir)) = game.legal_steps().into_iter().choose(rng) else {
            break;
        };
        if game.move_by_direction(square, dir).is_err() {
            break;
        }
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("board copy", |b| b.iter(|| copy_board(black_box(&Board::default()))));
    c.bench_function("any legal move", |b| {
        b.iter(|| any_move_both_sides(black_box(&Board::default())))
    });
    c.bench_function("legal steps", |b| {
        let game = GameService::new();
        b.iter(|| black_box(&game).legal_steps())
    });
    c.bench_function("path count 4", |b| {
        let game = GameService::new();
        b.iter(|| count_paths(black_box(&game), 4))
    });
    c.bench_function("stupid game 100", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| stupid_game(GameService::default(), 100, &mut rng))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
