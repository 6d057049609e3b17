//! Begrenztes Command-Log mit Ergebnis je Command.
//!
//! Der Host liest hier nach, welche Aktion zuletzt abgelehnt wurde
//! (z.B. Self-Port-Verbindung oder Mutation im View-Modus), ohne den
//! Fehler selbst durch alle Schichten reichen zu müssen.

use super::AppCommand;

/// Ergebnis eines ausgeführten Commands.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Command wurde angewendet
    Applied,
    /// Command wurde vor jeder Mutation abgelehnt
    Rejected {
        /// Fehlermeldung inkl. Ursachenkette
        message: String,
    },
}

/// Ein Eintrag im Command-Log.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    /// Ausgeführter Command
    pub command: AppCommand,
    /// Ergebnis
    pub outcome: CommandOutcome,
}

impl CommandRecord {
    /// Wurde der Command abgelehnt?
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, CommandOutcome::Rejected { .. })
    }
}

/// Speichert ausgeführte Commands samt Ergebnis in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<CommandRecord>,
    rejected_total: usize,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protokolliert einen angewendeten Command.
    pub fn record_applied(&mut self, command: AppCommand) {
        self.push(CommandRecord {
            command,
            outcome: CommandOutcome::Applied,
        });
    }

    /// Protokolliert einen abgelehnten Command.
    pub fn record_rejected(&mut self, command: AppCommand, message: String) {
        self.rejected_total += 1;
        self.push(CommandRecord {
            command,
            outcome: CommandOutcome::Rejected { message },
        });
    }

    /// Begrenzt auf MAX_ENTRIES, die ältere Hälfte wird verworfen.
    fn push(&mut self, record: CommandRecord) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(record);
    }

    /// Anzahl der gehaltenen Einträge
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keine Einträge?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle gehaltenen Einträge, älteste zuerst
    pub fn entries(&self) -> &[CommandRecord] {
        &self.entries
    }

    /// Zuletzt ausgeführter Command
    pub fn last(&self) -> Option<&CommandRecord> {
        self.entries.last()
    }

    /// Zuletzt abgelehnter Command, sofern noch im Log.
    pub fn last_rejected(&self) -> Option<&CommandRecord> {
        self.entries.iter().rev().find(|r| r.is_rejected())
    }

    /// Anzahl aller abgelehnten Commands seit Start (auch bereits verworfene).
    pub fn rejected_total(&self) -> usize {
        self.rejected_total
    }
}
