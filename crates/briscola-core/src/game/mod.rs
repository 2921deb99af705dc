pub mod public_state;
pub mod snapshot;
pub mod state;
