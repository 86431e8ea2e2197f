pub mod board;
pub mod location;
pub mod participants;
pub mod profile;
