mod game;

pub use game::{GameModel, MovePair};
