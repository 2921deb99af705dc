pub mod env;
pub mod observation;

pub use env::{ACTION_SPACE, BriscolaEnv, EnvError, REWARD_RANGE, Step};
pub use observation::{OBS_LEN, encode};
