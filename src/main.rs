use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use simulado::bank::QuestionBank;
use simulado::config::Config;
use simulado::errors::AppError;
use simulado::models::{Question, QuizResult};
use simulado::session::{
    FeedbackPolicy, QuizEngine, QuizMode, SessionOptions, SubmitOutcome, TickOutcome,
};
use simulado::storage::{file::open_state_dir, KeyValueStorage, MemoryStorage};
use simulado::stores::{LastResultStore, MissedQuestionsStore};

#[derive(Parser, Debug)]
#[command(name = "simulado")]
#[command(about = "Driving-theory exam simulator")]
struct Args {
    /// Question source: random | favorites | theme:<slug>
    #[arg(short, long, default_value = "random")]
    mode: String,

    /// Shortcut for --mode theme:<slug>
    #[arg(short, long)]
    theme: Option<String>,

    /// Feedback policy: standard | immediate
    #[arg(short, long, default_value = "standard")]
    feedback: String,

    /// Disable the 30-minute countdown
    #[arg(long)]
    no_timer: bool,

    /// List the theme catalog and exit
    #[arg(long)]
    list_themes: bool,

    /// Show the last saved result and exit
    #[arg(long)]
    last_result: bool,

    /// Empty the missed-questions deck and exit
    #[arg(long)]
    clear_missed: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_env();
    let bank = QuestionBank::new(&config.data_dir);

    // A broken state directory degrades to a memoryless run, never a
    // hard failure.
    let storage: Arc<dyn KeyValueStorage> = match open_state_dir(&config.state_dir) {
        Some(files) => Arc::new(files),
        None => Arc::new(MemoryStorage::new()),
    };
    let missed = MissedQuestionsStore::new(storage.clone());
    let results = LastResultStore::new(storage);

    if args.list_themes {
        for theme in bank.list_themes() {
            println!("{:<24} {}", theme.slug, theme.label);
        }
        return Ok(());
    }

    if args.clear_missed {
        missed.clear()?;
        println!("Missed-questions deck cleared.");
        return Ok(());
    }

    if args.last_result {
        match results.load()? {
            Some(result) => print_report(&result),
            None => println!("No saved result yet."),
        }
        return Ok(());
    }

    let mode = match &args.theme {
        Some(slug) => QuizMode::Theme(slug.clone()),
        None => args.mode.parse()?,
    };
    let options = SessionOptions {
        feedback: args.feedback.parse()?,
        timer: !args.no_timer,
        session_size: config.session_size,
        time_limit_secs: config.time_limit_secs,
    };

    let engine = match QuizEngine::start(&bank, missed.clone(), mode.clone(), options) {
        Ok(engine) => engine,
        Err(err) => {
            // Unknown theme or empty source: fall back to a random exam.
            log::warn!("could not start '{}' session ({}); falling back to random", mode, err);
            println!("Could not load '{}' ({}); starting a random exam instead.", mode, err);
            QuizEngine::start(&bank, missed, QuizMode::Random, options)?
        }
    };

    let result = run_session(engine)?;
    if let Err(err) = results.save(&result) {
        log::warn!("could not persist result: {}", err);
    }
    print_report(&result);
    Ok(())
}

/// Interactive answer loop. Pacing, confirmation and timer delivery
/// live here; the engine only owns the state machine.
fn run_session(mut engine: QuizEngine) -> Result<QuizResult, Box<dyn Error>> {
    let started = Instant::now();
    let mut delivered_ticks = 0u64;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Exame iniciado: {} questões. Responda com a letra, ou:", engine.len());
    println!("  n = seguinte, p = anterior, g <n> = ir para, f = terminar, q = sair\n");

    loop {
        if let Some(result) = deliver_ticks(&mut engine, &started, &mut delivered_ticks) {
            println!("\nTempo esgotado!");
            return Ok(result);
        }

        print_question(&engine);
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                // EOF: finish with whatever was answered.
                return Ok(engine.finish());
            }
        };
        let input = line.trim().to_lowercase();

        match input.as_str() {
            "" => {}
            "q" => {
                // Abandoning discards progress; nothing is persisted.
                println!("Sessão abandonada.");
                std::process::exit(0);
            }
            "n" => {
                engine.advance();
            }
            "p" => {
                engine.previous();
            }
            "f" => {
                if engine.all_answered() || confirm_finish(&engine, &mut lines)? {
                    return Ok(engine.finish());
                }
            }
            other if other.starts_with("g ") => match parse_goto(other) {
                Some(index) => {
                    // Overshoot clamps to the last question.
                    if let Err(AppError::OutOfRange { len, .. }) = engine.go_to(index) {
                        let _ = engine.go_to(len - 1);
                    }
                }
                None => println!("Número inválido."),
            },
            letter => {
                let letter = letter.to_uppercase();
                let question = engine.current_question();
                if !question.options.iter().any(|o| o.letter == letter) {
                    println!("Opção inválida.");
                    continue;
                }
                let correct = question.is_correct_answer(&letter);
                match engine.submit_answer(&letter) {
                    SubmitOutcome::Locked => {
                        println!("Resposta já registada para esta questão.");
                    }
                    SubmitOutcome::Recorded { all_answered } => {
                        if engine.feedback() == FeedbackPolicy::Immediate {
                            if correct {
                                println!("✓ Correta!");
                            } else {
                                println!(
                                    "✗ Errada. Resposta certa: {}",
                                    engine.current_question().correct_letter
                                );
                            }
                        }
                        if all_answered {
                            println!("Todas as questões respondidas.");
                            if confirm_finish(&engine, &mut lines)? {
                                return Ok(engine.finish());
                            }
                        } else {
                            engine.advance();
                        }
                    }
                }
            }
        }
    }
}

/// Parses a "g <n>" command (1-based on screen) into a zero-based
/// index. `None` for anything that is not a number; the cursor stays put.
fn parse_goto(input: &str) -> Option<usize> {
    input
        .strip_prefix("g ")?
        .trim()
        .parse::<usize>()
        .ok()
        .map(|target| target.saturating_sub(1))
}

/// Converts wall-clock elapsed time into engine ticks, one per second.
/// Drift while blocked on input is fine; only the zero-crossing matters.
fn deliver_ticks(
    engine: &mut QuizEngine,
    started: &Instant,
    delivered: &mut u64,
) -> Option<QuizResult> {
    let elapsed = started.elapsed().as_secs();
    while *delivered < elapsed {
        *delivered += 1;
        match engine.tick() {
            TickOutcome::Expired(result) => return Some(result),
            TickOutcome::Idle => return None,
            TickOutcome::Running { .. } => {}
        }
    }
    None
}

fn confirm_finish(
    engine: &QuizEngine,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool, Box<dyn Error>> {
    let unanswered = engine.len() - engine.answered_count();
    if unanswered > 0 {
        println!("Ainda tem {} questões por responder.", unanswered);
    }
    print!("Terminar o exame? [s/N] ");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(line?.trim().eq_ignore_ascii_case("s")),
        None => Ok(true),
    }
}

fn print_question(engine: &QuizEngine) {
    let question = engine.current_question();

    if let Some(remaining) = engine.remaining_secs() {
        println!("⏱  {:02}:{:02}", remaining / 60, remaining % 60);
    }
    println!(
        "\nQuestão {}/{} [{}]{}",
        engine.position() + 1,
        engine.len(),
        question.number,
        question
            .theme_label
            .as_deref()
            .map(|label| format!(" — {}", label))
            .unwrap_or_default()
    );
    println!("{}", question.prompt);
    if let Some(url) = &question.image_url {
        println!("(imagem: {})", url);
    }
    for option in &question.options {
        let marker = match engine.answer_for(&question.number) {
            Some(answer) if answer == option.letter => "●",
            _ => "○",
        };
        println!("  {} {}) {}", marker, option.letter, option.text);
    }
}

fn print_report(result: &QuizResult) {
    println!("\n──────── Resultado ────────");
    println!(
        "{}",
        if result.is_passed() {
            "APROVADO"
        } else {
            "REPROVADO"
        }
    );
    println!(
        "Certas: {}/{} ({}%)  Erradas: {}",
        result.score,
        result.total,
        result.percentage(),
        result.incorrect_count()
    );
    println!(
        "Tempo gasto: {}m{}s  ({})",
        result.time_spent_secs / 60,
        result.time_spent_secs % 60,
        result.date.format("%Y-%m-%d %H:%M")
    );

    let wrong: Vec<&Question> = result
        .questions
        .iter()
        .filter(|q| {
            result
                .answers
                .get(&q.number)
                .map(|a| !q.is_correct_answer(a))
                .unwrap_or(true)
        })
        .collect();

    if !wrong.is_empty() {
        println!("\nA rever:");
        for question in wrong {
            let given = result
                .answers
                .get(&question.number)
                .map(String::as_str)
                .unwrap_or("—");
            println!(
                "  [{}] {} (sua: {}, certa: {})",
                question.number, question.prompt, given, question.correct_letter
            );
        }
    }
}
