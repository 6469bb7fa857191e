use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// One entry of the closed theme catalog, as exposed to callers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub slug: String,
    pub label: String,
}

/// The full contents of one theme data file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeData {
    #[serde(rename = "tema")]
    pub theme: String,
    pub slug: String,
    pub total: usize,
    #[serde(rename = "questoes")]
    pub questions: Vec<Question>,
}

impl Theme {
    /// Human-readable label derived from a slug: hyphens become spaces
    /// and each word is capitalized.
    pub fn from_slug(slug: &str) -> Self {
        let label = slug
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Theme {
            slug: slug.to_string(),
            label,
        }
    }
}
