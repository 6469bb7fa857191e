pub mod question;
pub mod result;
pub mod theme;

pub use question::{Question, QuestionOption};
pub use result::QuizResult;
pub use theme::{Theme, ThemeData};
