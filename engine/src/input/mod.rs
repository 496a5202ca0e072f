//! Input state consumed by camera switching

mod state;

pub use state::InputState;
