use std::io::{self, BufRead, Write};

use verbo_drill::{DrillSession, DrillSummary};

/// Terminal drill loop. Answers are an option number or the form itself;
/// end of input stops early and still prints the summary.
pub fn run_interactive(mut session: DrillSession) -> anyhow::Result<DrillSummary> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = session.questions().len();

    while let Some(question) = session.current().cloned() {
        let number = session.answers().len() + 1;
        println!("\n[{number}/{total}] {}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        let answer = match input.parse::<usize>() {
            Ok(choice) if choice >= 1 => session.submit_choice(choice - 1),
            _ => session.submit(input),
        };

        match answer {
            Ok(answer) if answer.correct => println!("Correct!"),
            Ok(_) => println!("Incorrect. The answer is '{}'", question.correct_form),
            Err(e) => println!("{e}"),
        }
    }

    let summary = session.summary();
    println!(
        "\n{} drill score: {}/{} ({}%)",
        session.mode(),
        summary.correct,
        summary.total,
        summary.percentage
    );
    if !summary.weak_verbs.is_empty() {
        println!("Review: {}", summary.weak_verbs.join(", "));
    }
    Ok(summary)
}
