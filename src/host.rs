//! Headless host application.
//!
//! Stands in for a windowed host when liftoff runs as a standalone process:
//! there are no windows, and activation/control signals arrive as lines on
//! stdin (`check`, `activate`, `enable`, `disable`, `simulate`, `status`, `quit`).

use liftoff_update::HostApp;
use std::io::BufRead;
use std::sync::mpsc::Sender;

/// Control signal read from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Request a check right now
    Check,
    /// Application-activation signal
    Activate,
    Enable,
    Disable,
    Simulate,
    Status,
    Quit,
}

impl HostCommand {
    /// Parse one stdin line; unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "check" => Some(HostCommand::Check),
            "activate" => Some(HostCommand::Activate),
            "enable" => Some(HostCommand::Enable),
            "disable" => Some(HostCommand::Disable),
            "simulate" => Some(HostCommand::Simulate),
            "status" => Some(HostCommand::Status),
            "quit" | "exit" => Some(HostCommand::Quit),
            _ => None,
        }
    }
}

/// Forward stdin lines as host commands until stdin closes or the receiver goes away.
pub fn spawn_stdin_reader(tx: Sender<HostCommand>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("liftoff-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match HostCommand::parse(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => log::warn!("Unknown host command: {:?}", line.trim()),
                }
            }
        })
        .map(|_| ())
}

/// Host with no windows; every operation is logged
#[derive(Debug, Default)]
pub struct HeadlessHost;

impl HostApp for HeadlessHost {
    fn window_count(&self) -> usize {
        0
    }

    fn set_progress(&self, fraction: Option<f64>) {
        log::debug!("Progress indicator: {:?}", fraction);
    }

    fn focus(&self) {
        log::debug!("Focus requested (headless host)");
    }

    fn remove_shutdown_blockers(&self) {
        log::info!("No shutdown blockers to remove (headless host)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_commands() {
        assert_eq!(HostCommand::parse("check"), Some(HostCommand::Check));
        assert_eq!(HostCommand::parse("  Activate \n"), Some(HostCommand::Activate));
        assert_eq!(HostCommand::parse("exit"), Some(HostCommand::Quit));
        assert_eq!(HostCommand::parse("reboot"), None);
    }
}
