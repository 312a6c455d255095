use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use bank::JsonFileSource;
use quiz_core::Clock;
use quiz_core::model::{FundId, QuizSettings};
use quiz_core::time::format_duration;
use services::{Advance, QuizLoopService, QuizRunner, SessionSnapshot};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    bank_path: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <questions.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank questions.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path = std::env::var("QUIZ_BANK")
            .ok()
            .unwrap_or_else(|| "questions.json".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    bank_path = args
                        .next()
                        .ok_or(ArgsError::MissingValue { flag: "--bank" })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank_path })
    }
}

/// One selectable entry on the batch selection screen.
struct BatchChoice {
    fund: FundId,
    batch_index: usize,
    label: String,
}

fn batch_choices(service: &QuizLoopService) -> Vec<BatchChoice> {
    let mut choices = Vec::new();
    for plan in service.fund_plans() {
        for batch in &plan.batches {
            choices.push(BatchChoice {
                fund: plan.fund.clone(),
                batch_index: batch.index(),
                label: format!("Fund {}, questions {}", plan.fund, batch.label()),
            });
        }
    }
    choices
}

fn render_selection(choices: &[BatchChoice]) {
    println!();
    println!("Pick a question batch:");
    for (i, choice) in choices.iter().enumerate() {
        println!("  [{}] {}", i + 1, choice.label);
    }
    println!("  (q) quit");
}

fn render_question(snapshot: &SessionSnapshot) {
    println!();
    let warning = if snapshot.time_warning { "  !! over time" } else { "" };
    println!(
        "Fund {} | No {} | {} points | time: {}{}",
        snapshot.fund,
        snapshot.number,
        snapshot.question_points,
        format_duration(snapshot.elapsed_secs),
        warning
    );
    println!("{}. {}", snapshot.position, snapshot.prompt);
    for (i, option) in snapshot.options.iter().enumerate() {
        let index = u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1);
        let marker = snapshot.answer.map_or("", |answer| {
            if index == answer.correct {
                "  <- correct"
            } else if index == answer.chosen {
                "  <- your pick"
            } else {
                ""
            }
        });
        println!("  {index}) {option}{marker}");
    }
    println!("{}/{} questions", snapshot.position, snapshot.total);
}

fn render_results(quiz: &QuizRunner) -> Result<(), Box<dyn std::error::Error>> {
    let summary = quiz.summary()?;
    println!();
    println!("Results");
    println!(
        "  Answered correctly: {}/{} questions",
        summary.correct(),
        summary.total_questions()
    );
    println!(
        "  Accumulated points: {} / {}",
        summary.points(),
        summary.max_points()
    );
    println!("  Time: {}", summary.formatted_duration());
    Ok(())
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Drive one quiz to its end. Returns false when the user wants to quit.
fn run_quiz(mut quiz: QuizRunner) -> Result<bool, Box<dyn std::error::Error>> {
    loop {
        if quiz.is_complete()? {
            render_results(&quiz)?;
            let Some(input) = prompt("(r)eset, (b)ack to selection, (q)uit: ")? else {
                return Ok(false);
            };
            match input.as_str() {
                "r" => quiz.reset()?,
                "b" => return Ok(true),
                "q" => return Ok(false),
                _ => {}
            }
            continue;
        }

        let snapshot = quiz.snapshot()?;
        render_question(&snapshot);
        let Some(input) = prompt("answer number, (n)ext, (r)eset, (b)ack, (q)uit: ")? else {
            return Ok(false);
        };
        match input.as_str() {
            "n" => {
                if quiz.advance()? == Advance::NotAnswered {
                    println!("Answer the question first.");
                }
            }
            "r" => quiz.reset()?,
            "b" => return Ok(true),
            "q" => return Ok(false),
            other => match other.parse::<u32>() {
                Ok(choice) => {
                    if let Err(err) = quiz.submit_answer(choice) {
                        println!("{err}");
                    }
                }
                Err(_) => println!("Unrecognized input: {other}"),
            },
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source = JsonFileSource::new(&args.bank_path);
    let service = QuizLoopService::new(&source, Clock::default_clock(), QuizSettings::default())?;
    let choices = batch_choices(&service);
    if choices.is_empty() {
        eprintln!("The question bank at {} is empty.", args.bank_path);
        return Ok(());
    }

    loop {
        render_selection(&choices);
        let Some(input) = prompt("> ")? else {
            return Ok(());
        };
        if input == "q" {
            return Ok(());
        }
        let Ok(number) = input.parse::<usize>() else {
            continue;
        };
        let Some(choice) = number.checked_sub(1).and_then(|i| choices.get(i)) else {
            continue;
        };

        // The previous runner (and its ticker) is gone by the time a new
        // batch starts; a stale ticker would double-count seconds.
        let quiz = service.select_batch(&choice.fund, choice.batch_index)?;
        if !run_quiz(quiz)? {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to set global tracing subscriber");
    }

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
