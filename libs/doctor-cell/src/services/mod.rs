pub mod ranking;
pub mod matching;

pub use ranking::DoctorRankingIndex;
pub use matching::MatchScorer;
