use serde::{Deserialize, Serialize};

/// A single exam question. Serialized field names match the theme data
/// files and the persisted missed-questions records, which predate this
/// crate and are a compatibility surface.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Unique question identifier across the whole bank.
    #[serde(rename = "numero")]
    pub number: String,
    pub url: String,
    #[serde(rename = "pergunta")]
    pub prompt: String,
    #[serde(rename = "imagem")]
    pub image: String,
    #[serde(rename = "imagemUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "opcoes")]
    pub options: Vec<QuestionOption>,
    #[serde(rename = "letraCorreta")]
    pub correct_letter: String,
    /// Label of the originating theme; set when a question is drawn
    /// across themes so the review screen can show where it came from.
    #[serde(rename = "temaLabel", skip_serializing_if = "Option::is_none")]
    pub theme_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    #[serde(rename = "letra")]
    pub letter: String,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "correta")]
    pub correct: bool,
}

impl Question {
    pub fn is_correct_answer(&self, letter: &str) -> bool {
        self.correct_letter == letter
    }

    /// Exactly one option carries the correct letter; option letters are
    /// unique within a question.
    pub fn is_well_formed(&self) -> bool {
        let correct_matches = self
            .options
            .iter()
            .filter(|o| o.letter == self.correct_letter)
            .count();
        let mut letters: Vec<&str> = self.options.iter().map(|o| o.letter.as_str()).collect();
        letters.sort_unstable();
        letters.dedup();
        self.options.len() >= 2 && correct_matches == 1 && letters.len() == self.options.len()
    }
}
