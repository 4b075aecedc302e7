//! Watch the Kuhn equilibrium emerge during training.

use as_mccfr::games::kuhn::KuhnEngine;
use as_mccfr::mccfr::{average_strategy, Action, Card, InfoSet, TrainParams, Trainer};

fn opener(card: Card) -> InfoSet {
    InfoSet {
        hole_cards: vec![card],
        pot: 2,
        my_bet: 0,
        opponent_bet: 0,
        opening: true,
    }
}

fn facing_bet(card: Card) -> InfoSet {
    InfoSet {
        hole_cards: vec![card],
        pot: 2,
        my_bet: 0,
        opponent_bet: 1,
        opening: false,
    }
}

fn main() {
    let params = TrainParams::default().with_seed(42);
    let mut trainer = Trainer::new(KuhnEngine::new(), params);

    let open = [Action::CheckCall, Action::BetRaise];
    let respond = [Action::Fold, Action::CheckCall];

    for i in 1..=10 {
        trainer.train(50_000).unwrap();
        let avg = trainer.avg_strategy();

        println!("After {} epochs:", i * 50_000);
        for card in [Card::JACK, Card::QUEEN, Card::KING] {
            let s = average_strategy(avg, &opener(card), &open);
            println!("  opener {}: check={:.3} bet={:.3}", card, s[0], s[1]);
        }
        for card in [Card::JACK, Card::QUEEN, Card::KING] {
            let s = average_strategy(avg, &facing_bet(card), &respond);
            println!("  {} facing bet: fold={:.3} call={:.3}", card, s[0], s[1]);
        }
        println!();
    }

    println!("Expected Nash equilibrium:");
    println!("  opener J: bet with probability alpha <= 1/3");
    println!("  opener Q: always check");
    println!("  opener K: bet with probability 3*alpha");
    println!("  J facing bet: always fold");
    println!("  Q facing bet: call 1/3");
    println!("  K facing bet: always call");
    println!("Information sets: {}", trainer.num_info_sets());
}
