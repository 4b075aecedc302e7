//! Hand-by-hand matches between two players.
//!
//! Seats alternate by round parity so neither player accumulates positional
//! bias over an even round count.

use log::debug;
use rand::rngs::StdRng;

use crate::mccfr::engine::GameEngine;
use crate::mccfr::error::SolverError;
use crate::players::Player;

/// Payoff bookkeeping across a match.
///
/// Payoffs are indexed by *player*, not seat; the seating of every round is
/// recorded so results can also be split by position.
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    payoffs: [Vec<f64>; 2],
    seatings: Vec<[usize; 2]>,
}

impl MatchStats {
    /// Empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished round: per-player payoffs and the seat each
    /// player occupied.
    pub fn record(&mut self, payoffs: [f64; 2], seat_of_player: [usize; 2]) {
        self.payoffs[0].push(payoffs[0]);
        self.payoffs[1].push(payoffs[1]);
        self.seatings.push(seat_of_player);
    }

    /// Fold another stats block into this one.
    pub fn merge(&mut self, other: &MatchStats) {
        self.payoffs[0].extend_from_slice(&other.payoffs[0]);
        self.payoffs[1].extend_from_slice(&other.payoffs[1]);
        self.seatings.extend_from_slice(&other.seatings);
    }

    /// Number of rounds recorded.
    pub fn rounds(&self) -> usize {
        self.seatings.len()
    }

    /// Mean payoff per round for `player`.
    pub fn mean(&self, player: usize) -> f64 {
        mean(&self.payoffs[player])
    }

    /// Payoff standard deviation for `player`.
    pub fn std_dev(&self, player: usize) -> f64 {
        std_dev(&self.payoffs[player])
    }

    /// Net winnings for `player`.
    pub fn net(&self, player: usize) -> f64 {
        self.payoffs[player].iter().sum()
    }

    /// Mean payoff for `player` over only the rounds it spent in `seat`.
    pub fn seat_mean(&self, player: usize, seat: usize) -> f64 {
        let in_seat: Vec<f64> = self.payoffs[player]
            .iter()
            .zip(self.seatings.iter())
            .filter(|(_, seating)| seating[player] == seat)
            .map(|(&p, _)| p)
            .collect();
        mean(&in_seat)
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Play one hand with an explicit seating.
///
/// `seat_of_player[i]` is the seat player `i` occupies. Returns per-player
/// payoffs. Engine rejections of a player's action propagate; the runner
/// never retries on the player's behalf.
pub fn play_round<E: GameEngine>(
    engine: &E,
    players: &mut [Box<dyn Player<E>>; 2],
    seat_of_player: [usize; 2],
    rng: &mut StdRng,
) -> Result<[f64; 2], SolverError> {
    let player_at_seat = invert(seat_of_player);

    let mut state = engine.new_state();
    engine.deal(&mut state, rng);

    while !engine.is_over(&state) {
        let seat = engine.current_actor(&state).ok_or_else(|| {
            SolverError::InvalidState(format!("no actor at live state {:?}", state))
        })?;
        let idx = player_at_seat[seat];
        let action = players[idx].act(engine, &state, rng)?;
        debug!("{} (seat {}) plays {}", players[idx].name(), seat, action);
        state = engine.apply_action(&state, action)?;
    }

    let payoffs = [
        engine.utility(&state, seat_of_player[0]),
        engine.utility(&state, seat_of_player[1]),
    ];
    for (idx, player) in players.iter_mut().enumerate() {
        player.handle_round_over(engine, &state, seat_of_player[idx]);
    }
    Ok(payoffs)
}

/// Play `rounds` hands, alternating seats by round parity.
pub fn play_match<E: GameEngine>(
    engine: &E,
    players: &mut [Box<dyn Player<E>>; 2],
    rounds: u64,
    rng: &mut StdRng,
) -> Result<MatchStats, SolverError> {
    let mut stats = MatchStats::new();

    for round in 0..rounds {
        let seat_of_player = if round % 2 == 0 { [0, 1] } else { [1, 0] };
        let payoffs = play_round(engine, players, seat_of_player, rng)?;
        debug!(
            "round {}: {} {:+}, {} {:+}",
            round,
            players[0].name(),
            payoffs[0],
            players[1].name(),
            payoffs[1]
        );
        stats.record(payoffs, seat_of_player);
    }

    Ok(stats)
}

fn invert(seat_of_player: [usize; 2]) -> [usize; 2] {
    let mut player_at_seat = [0; 2];
    player_at_seat[seat_of_player[0]] = 0;
    player_at_seat[seat_of_player[1]] = 1;
    player_at_seat
}
