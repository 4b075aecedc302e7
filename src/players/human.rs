//! Interactive human seat reading actions from stdin.

use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;

use crate::mccfr::action::Action;
use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::players::Player;

/// A human player on the terminal.
///
/// Prints the private view of the hand, then prompts until a legal action
/// character arrives: `f` fold, `c` check/call, `r` bet/raise.
#[derive(Debug, Default)]
pub struct HumanPlayer {
    winnings: f64,
}

impl HumanPlayer {
    /// Create a human player with zeroed winnings.
    pub fn new() -> Self {
        Self { winnings: 0.0 }
    }

    fn parse(input: &str) -> Option<Action> {
        match input.trim() {
            "f" => Some(Action::Fold),
            "c" => Some(Action::CheckCall),
            "r" => Some(Action::BetRaise),
            _ => None,
        }
    }
}

impl<E: GameEngine> Player<E> for HumanPlayer {
    fn name(&self) -> &str {
        "human"
    }

    fn act(
        &mut self,
        engine: &E,
        state: &E::State,
        _rng: &mut StdRng,
    ) -> Result<Action, SolverError> {
        let actor = engine.current_actor(state).ok_or_else(|| {
            SolverError::InvalidState(format!("no actor at state {:?}", state))
        })?;
        let legal = engine.legal_actions(state);
        if legal.is_empty() {
            return Err(SolverError::NoLegalActions(format!("{:?}", state)));
        }

        println!("----------------------------------------");
        let cards: Vec<String> = engine
            .private_cards(state, actor)
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("Hole cards: {}", cards.join(" "));
        println!(
            "Pot: {}  your bet: {}  opponent bet: {}",
            engine.pot(state),
            engine.bet(state, actor),
            engine.bet(state, 1 - actor)
        );
        println!("----------------------------------------");

        let stdin = io::stdin();
        loop {
            print!("Choose an action ('f' - fold, 'c' - check/call, 'r' - bet/raise): ");
            io::stdout().flush()?;

            let mut line = String::new();
            let read = stdin.lock().read_line(&mut line)?;
            if read == 0 {
                return Err(SolverError::InvalidState(
                    "stdin closed while waiting for a human action".to_string(),
                ));
            }

            match Self::parse(&line) {
                Some(action) if legal.contains(&action) => return Ok(action),
                Some(action) => {
                    println!("Cannot {} now. Choose a different action.", action);
                }
                None => println!("Valid options are 'f', 'c', and 'r'."),
            }
        }
    }

    fn handle_round_over(&mut self, engine: &E, state: &E::State, my_seat: usize) {
        let result = engine.utility(state, my_seat);
        self.winnings += result;
        println!("Winnings this round: {:+}", result);
        println!("Winnings overall: {:+}", self.winnings);
    }
}
