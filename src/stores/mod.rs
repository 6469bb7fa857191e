pub mod last_result;
pub mod missed;

pub use last_result::LastResultStore;
pub use missed::MissedQuestionsStore;
