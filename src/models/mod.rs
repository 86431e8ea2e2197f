pub mod participants;

pub use participants::ParticipantRow;
