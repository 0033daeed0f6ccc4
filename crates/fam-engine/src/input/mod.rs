pub mod queue;
pub mod state;

pub use state::keys;
