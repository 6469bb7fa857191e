use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

use crate::errors::{AppError, AppResult};
use crate::models::{Question, Theme, ThemeData};

/// Closed catalog: slug → data file. The slug set is static and known in
/// advance; adding a theme means shipping a new data file and extending
/// this table.
pub const THEME_FILES: &[(&str, &str)] = &[
    ("cedencia-passagem", "tema_cedencia-passagem.json"),
    (
        "circulacao-seguranca",
        "tema_circulacao-seguranca-veiculos-missao-urgente-socorro.json",
    ),
    (
        "classificacao-veiculos",
        "tema_classificacao-constituintes-inspeccoes-pesos-dimensoes-proteccao-ambiente-equipamentos-seguranca-acidente.json",
    ),
    (
        "estado-fisico-condutor",
        "tema_estado-fisico-condutor-alcool-drogas-medicamentos-sinais-obrigacao.json",
    ),
    (
        "iluminacao-carga",
        "tema_iluminacao-passageiros-carga-conducao-defensiva-peoes.json",
    ),
    ("outras-manobras", "tema_outras-manobras.json"),
    (
        "paragem-estacionamento",
        "tema_paragem-estacionamento-cruzamento-veiculos.json",
    ),
    ("sinais-indicacao", "tema_sinais-indicacao.json"),
    ("sinais-perigo", "tema_sinais-perigo.json"),
    (
        "sinais-prescricao",
        "tema_sinais-prescricao-especifica-sinais-cedencia-passagem.json",
    ),
    ("sinais-proibicao", "tema_sinais-proibicao.json"),
    (
        "sinalizacao-luminosa",
        "tema_sinalizacao-luminosa-marcas-pavimento-outra-sinalizacao.json",
    ),
    (
        "titulos-conducao",
        "tema_titulos-conducao-obtencao-revalidacao-responsabilidade-civil-criminal-ordenacoes-cassacao.json",
    ),
    ("ultrapassagem", "tema_ultrapassagem.json"),
    ("velocidade", "tema_velocidade.json"),
    (
        "vias-transito",
        "tema_vias-transito-condicoes-ambientais-adversas.json",
    ),
];

static THEME_CATALOG: Lazy<Vec<Theme>> = Lazy::new(|| {
    THEME_FILES
        .iter()
        .map(|(slug, _)| Theme::from_slug(slug))
        .collect()
});

/// Resolves theme slugs to question sets from a directory of static
/// JSON data files.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    data_dir: PathBuf,
}

impl QuestionBank {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The full theme catalog, in catalog order. Always succeeds.
    pub fn list_themes(&self) -> &'static [Theme] {
        &THEME_CATALOG
    }

    pub fn load_theme(&self, slug: &str) -> AppResult<ThemeData> {
        let (_, filename) = THEME_FILES
            .iter()
            .find(|(s, _)| *s == slug)
            .ok_or_else(|| AppError::NotFound(format!("theme '{}'", slug)))?;

        let path = self.data_dir.join(filename);
        let raw = fs::read_to_string(&path)
            .map_err(|err| AppError::LoadError(format!("{}: {}", path.display(), err)))?;
        let data: ThemeData = serde_json::from_str(&raw)?;

        if let Some(bad) = data.questions.iter().find(|q| !q.is_well_formed()) {
            log::warn!(
                "question {} in theme '{}' is malformed (correct letter / option mismatch)",
                bad.number,
                slug
            );
        }

        Ok(data)
    }

    /// Draws `n` distinct questions across the whole bank via an
    /// unbiased in-place shuffle. Each drawn question is tagged with its
    /// theme's display label. Returns everything available when the pool
    /// holds fewer than `n` questions.
    pub fn sample_random(&self, n: usize) -> AppResult<Vec<Question>> {
        let mut pool = Vec::new();
        for (slug, _) in THEME_FILES {
            let data = self.load_theme(slug)?;
            let label = data.theme.clone();
            pool.extend(data.questions.into_iter().map(|mut q| {
                q.theme_label = Some(label.clone());
                q
            }));
        }

        pool.shuffle(&mut rand::thread_rng());
        pool.truncate(n);
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use std::fs;

    fn temp_data_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("simulado-bank-{}-{}", std::process::id(), tag));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_all_themes(dir: &PathBuf, questions_per_theme: usize) {
        for (slug, _) in THEME_FILES {
            write_theme(dir, slug, questions_per_theme);
        }
    }

    fn write_theme(dir: &PathBuf, slug: &str, question_count: usize) {
        let filename = THEME_FILES
            .iter()
            .find(|(s, _)| *s == slug)
            .map(|(_, f)| *f)
            .unwrap();
        let data = fixtures::theme_data(slug, question_count);
        fs::write(dir.join(filename), serde_json::to_string(&data).unwrap()).unwrap();
    }

    #[test]
    fn catalog_lists_all_sixteen_themes_in_order() {
        let bank = QuestionBank::new("unused");
        let themes = bank.list_themes();

        assert_eq!(themes.len(), 16);
        assert_eq!(themes[0].slug, "cedencia-passagem");
        assert_eq!(themes[0].label, "Cedencia Passagem");
        assert_eq!(themes[15].slug, "vias-transito");
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let bank = QuestionBank::new("unused");
        let err = bank.load_theme("not-a-real-slug").unwrap_err();

        assert_eq!(err, AppError::NotFound("theme 'not-a-real-slug'".into()));
    }

    #[test]
    fn missing_data_file_is_a_load_error() {
        let bank = QuestionBank::new("/nonexistent-data-dir");
        let err = bank.load_theme("velocidade").unwrap_err();

        assert!(matches!(err, AppError::LoadError(_)));
    }

    #[test]
    fn load_theme_parses_questions() {
        let dir = temp_data_dir("load");
        write_theme(&dir, "velocidade", 3);

        let bank = QuestionBank::new(&dir);
        let data = bank.load_theme("velocidade").unwrap();

        assert_eq!(data.slug, "velocidade");
        assert_eq!(data.questions.len(), 3);
        assert!(data.questions.iter().all(|q| q.is_well_formed()));
    }

    #[test]
    fn sample_random_draws_distinct_tagged_questions() {
        let dir = temp_data_dir("sample");
        write_all_themes(&dir, 3);

        let bank = QuestionBank::new(&dir);
        let drawn = bank.sample_random(30).unwrap();

        assert_eq!(drawn.len(), 30);
        assert!(drawn.iter().all(|q| q.theme_label.is_some()));

        let mut numbers: Vec<&str> = drawn.iter().map(|q| q.number.as_str()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), 30);
    }

    #[test]
    fn sample_larger_than_pool_returns_everything() {
        let dir = temp_data_dir("sample-small");
        write_all_themes(&dir, 1);

        let bank = QuestionBank::new(&dir);
        let drawn = bank.sample_random(30).unwrap();

        assert_eq!(drawn.len(), 16);
    }
}
