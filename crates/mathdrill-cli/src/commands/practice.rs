//! The `mathdrill practice` command.
//!
//! Reads one answer per line from stdin. The tally lives only as long as
//! the session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use mathdrill_core::config::load_config_from;
use mathdrill_core::grader;
use mathdrill_core::model::{Answer, GradeRequest};
use mathdrill_core::{Engine, SkillTemplate, Tier};

pub fn execute(
    unit: Option<String>,
    difficulty: Option<String>,
    count: usize,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let engine = Engine::from_config(&config)?;

    let template = match unit {
        Some(unit) => SkillTemplate::from_unit(&unit)
            .with_context(|| format!("unknown unit: {unit}"))?,
        None => config.default_template()?,
    };
    let tier = difficulty
        .as_deref()
        .map(Tier::from_param)
        .unwrap_or(config.default_difficulty);

    let mut rng = super::make_rng(seed);
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    let started = Utc::now();
    let mut attempted = 0usize;
    let mut correct = 0usize;

    println!("Practice: {} ({tier}), {count} problem(s)\n", template.unit());

    for n in 1..=count {
        let instance = engine.next_problem(template, tier, &mut rng)?;
        print!("[{n}/{count}] {}\n> ", instance.render.stem);
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read answer")?;

        let result = grader::grade(&GradeRequest {
            template_id: instance.template_id,
            answer: Answer::Text(line),
            payload: instance.payload,
        })?;
        attempted += 1;
        if result.correct {
            correct += 1;
        }
        println!("{}\n", result.feedback);
    }

    let elapsed = Utc::now() - started;
    println!(
        "Score: {correct}/{attempted} correct in {:.1}s",
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    tracing::debug!(attempted, correct, "practice session finished");
    Ok(())
}
