use std::io::{self, Write};

use crate::app::{AcquireOutcome, ProgressEvent, ProgressSink, RunResult};

/// Prints progress lines to stdout as they happen.
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn print_summary(result: &RunResult) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        for item in &result.items {
            let action = match item.outcome {
                AcquireOutcome::Skipped { .. } => "already present",
                AcquireOutcome::Acquired { .. } => "acquired",
            };
            writeln!(
                stdout,
                "{}: {action} ({})",
                item.dataset,
                item.outcome.path()
            )?;
        }
        Ok(())
    }
}

impl ProgressSink for ConsoleOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => println!("{} in {:.1}s", event.message, elapsed.as_secs_f64()),
            None => println!("{}", event.message),
        }
    }
}
