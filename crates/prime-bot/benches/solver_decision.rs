use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prime_bot::{PenaltyParams, PrimePlayer, SearchLimits, TurnInput};

fn turn(hand: &[u8], numbers: &[&str]) -> TurnInput {
    TurnInput {
        name: "akemi".to_string(),
        hand: hand.to_vec(),
        numbers: numbers.iter().map(|raw| raw.parse().unwrap()).collect(),
        hands: vec![("akemi".to_string(), hand.len() as u32), ("rival".to_string(), 11)],
    }
}

fn bench_decide(seed: u64, input: &TurnInput) {
    let mut player =
        PrimePlayer::with_seed(PenaltyParams::default(), SearchLimits::default(), seed);
    let _ = black_box(player.decide(input));
}

fn solver_decision_bench(c: &mut Criterion) {
    let hand = [1, 1, 2, 3, 3, 4, 5, 6, 7, 7, 8, 9, 9, 0, 0];
    let cases = [
        ("opening", turn(&hand, &[])),
        ("follow_3", turn(&hand, &["409"])),
        ("general_8", turn(&hand, &["2357", "1013"])),
        ("massive_14", turn(&hand, &["1000003", "1000033"])),
    ];

    let mut group = c.benchmark_group("solver_decision");
    for (label, input) in &cases {
        group.bench_function(*label, |b| b.iter(|| bench_decide(42, input)));
    }
    group.finish();
}

criterion_group!(benches, solver_decision_bench);
criterion_main!(benches);
