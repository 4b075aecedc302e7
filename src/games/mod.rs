//! Game engine implementations.
//!
//! Engines implementing [`GameEngine`](crate::mccfr::GameEngine) plug into
//! the solver unchanged. The bundled Kuhn poker engine doubles as the
//! validation game: its Nash equilibrium is known in closed form, so the
//! convergence tests live next to it.

pub mod kuhn;
