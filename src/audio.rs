//! Audio output: a background thread that owns the rodio output stream and
//! behaves like a single media element.

mod clock;
mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
