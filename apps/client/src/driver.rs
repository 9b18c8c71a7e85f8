//! Line-oriented terminal driver for the quiz.
//!
//! Commands: an option number answers, `n` moves on, `r` starts a new test,
//! `l` reloads the question source, `q` quits.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::{QuizController, QuizStatus, QuizView};
use crate::results::ResultsClient;
use crate::source::QuestionSource;

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Answer(usize),
    Next,
    Reset,
    Reload,
    Quit,
}

impl Command {
    /// Parse user input; option numbers are one-based.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "n" => Some(Self::Next),
            "r" => Some(Self::Reset),
            "l" => Some(Self::Reload),
            "q" => Some(Self::Quit),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(|n| Self::Answer(n - 1)),
        }
    }
}

pub async fn run_session(
    controller: &QuizController,
    source: &QuestionSource,
    results: Option<(ResultsClient, String)>,
) -> anyhow::Result<()> {
    let view = controller.load(source).await;
    render(&view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut submitted = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    println!("? option number, n, r, l or q");
                    continue;
                };

                match command {
                    Command::Answer(index) => {
                        controller.on_answer(index).await;
                    }
                    Command::Next => {
                        controller.on_next().await;
                    }
                    Command::Reset => {
                        controller.on_reset().await;
                        submitted = false;
                    }
                    Command::Reload => {
                        controller.load(source).await;
                        submitted = false;
                    }
                    Command::Quit => break,
                }
            }
            _ = controller.timer_advanced() => {}
        }

        let view = controller.view().await;
        render(&view);

        if view.is_finished && !submitted {
            submitted = true;
            submit(controller, results.as_ref()).await;
        }
    }

    controller.shutdown().await;
    Ok(())
}

async fn submit(controller: &QuizController, results: Option<&(ResultsClient, String)>) {
    let (Some((client, user_id)), Some(snapshot)) = (results, controller.snapshot().await) else {
        return;
    };
    match client.submit(user_id, &snapshot).await {
        Ok(stored) => tracing::info!("Stored test result {}", stored.id),
        Err(e) => tracing::warn!("Could not store test result: {}", e),
    }
}

fn render(view: &QuizView) {
    match &view.status {
        QuizStatus::Loading => println!("Loading..."),
        QuizStatus::Invalid { message } => println!("Invalid test configuration: {}", message),
        QuizStatus::Failed { message } => println!("Could not load questions: {} (l to retry)", message),
        QuizStatus::Finished => {
            if let Some(c) = &view.classification {
                println!(
                    "Done: {}/{} points, level {} (easy {:.0}%, medium {:.0}%, hard {:.0}%)",
                    c.points,
                    c.max_points,
                    c.level.as_str(),
                    c.accuracy.easy * 100.0,
                    c.accuracy.medium * 100.0,
                    c.accuracy.hard * 100.0
                );
            }
        }
        QuizStatus::Ready => {
            if let (Some(q), Some(p)) = (&view.current_question, &view.progress) {
                println!("[{}/{}] {}", p.position + 1, p.total, q.question);
                for (i, option) in q.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option);
                }
                if let Some(secs) = view.remaining_reveal_seconds {
                    println!("  (next question in {}s)", secs);
                }
            }
        }
    }
}
