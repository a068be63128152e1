//! Terminal rendering of sync progress.

use colored::Colorize;
use luver_core::{ProgressEvent, ProgressSink};

/// Prints progress lines to stdout, coloured by kind.
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { message } => println!("{}", message.green()),
            ProgressEvent::Finished { message } => println!("{}", message.bright_green()),
            ProgressEvent::Notice { message } => println!("{}", message.yellow()),
            ProgressEvent::Warning { message } => println!("{}", message.bright_yellow()),
        }
    }
}
