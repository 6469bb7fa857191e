use crate::models::{Question, QuestionOption, QuizResult, ThemeData};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    /// A well-formed four-option question with the given number and
    /// correct letter.
    pub fn question(number: &str, correct_letter: &str) -> Question {
        let options = ["A", "B", "C", "D"]
            .iter()
            .map(|letter| QuestionOption {
                letter: letter.to_string(),
                text: format!("Opção {}", letter),
                correct: *letter == correct_letter,
            })
            .collect();

        Question {
            number: number.to_string(),
            url: format!("https://example.com/{}", number),
            prompt: format!("Pergunta {}", number),
            image: format!("{}.jpg", number),
            image_url: None,
            options,
            correct_letter: correct_letter.to_string(),
            theme_label: None,
        }
    }

    /// Questions q-1..q-n, each with "A" as the correct answer.
    pub fn questions(n: usize) -> Vec<Question> {
        (1..=n).map(|i| question(&format!("q-{}", i), "A")).collect()
    }

    /// A theme data file with `n` questions numbered `<slug>-1..n`.
    pub fn theme_data(slug: &str, n: usize) -> ThemeData {
        let questions: Vec<Question> = (1..=n)
            .map(|i| question(&format!("{}-{}", slug, i), "A"))
            .collect();

        ThemeData {
            theme: crate::models::Theme::from_slug(slug).label,
            slug: slug.to_string(),
            total: questions.len(),
            questions,
        }
    }

    pub fn result(score: u32, total: u32) -> QuizResult {
        QuizResult {
            questions: questions(total as usize),
            answers: HashMap::new(),
            score,
            total,
            time_spent_secs: 600,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_question_is_well_formed() {
        let q = question("q-1", "C");

        assert!(q.is_well_formed());
        assert_eq!(q.correct_letter, "C");
        assert!(q.options.iter().find(|o| o.letter == "C").unwrap().correct);
    }

    #[test]
    fn test_fixtures_questions_have_unique_numbers() {
        let qs = questions(5);
        assert_eq!(qs.len(), 5);
        assert_eq!(qs[0].number, "q-1");
        assert_eq!(qs[4].number, "q-5");
    }

    #[test]
    fn test_fixtures_theme_data_counts_its_questions() {
        let data = theme_data("velocidade", 4);
        assert_eq!(data.total, 4);
        assert_eq!(data.theme, "Velocidade");
        assert_eq!(data.questions[0].number, "velocidade-1");
    }
}
