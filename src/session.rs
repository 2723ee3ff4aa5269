//! Per-conversation session state
//!
//! The language phase of each conversation lives in an injected store rather
//! than process-wide globals, so callers that need it (the drafter, a chat
//! dispatcher) stay testable in isolation.

use std::fmt;
use std::str::FromStr;

use dashmap::DashMap;

/// Language phase of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    It,
    En,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::En => "EN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IT" => Ok(Self::It),
            "EN" => Ok(Self::En),
            other => Err(format!("Unknown phase: {other} (use IT or EN)")),
        }
    }
}

/// Session store keyed by conversation id
pub struct SessionStore {
    phases: DashMap<String, Phase>,
    default_phase: Phase,
}

impl SessionStore {
    pub fn new(default_phase: Phase) -> Self {
        Self {
            phases: DashMap::new(),
            default_phase,
        }
    }

    /// Create from configuration; an unparseable default falls back to IT
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        let default_phase = config.default_phase().parse().unwrap_or_default();
        Self::new(default_phase)
    }

    /// The phase of a conversation, or the configured default
    pub fn phase_of(&self, namespace: &str) -> Phase {
        self.phases
            .get(namespace)
            .map_or(self.default_phase, |p| *p)
    }

    pub fn set_phase(&self, namespace: &str, phase: Phase) {
        self.phases.insert(namespace.to_string(), phase);
    }

    pub fn clear(&self, namespace: &str) {
        self.phases.remove(namespace);
    }

    pub fn session_count(&self) -> usize {
        self.phases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parsing() {
        assert_eq!("it".parse::<Phase>().unwrap(), Phase::It);
        assert_eq!(" EN ".parse::<Phase>().unwrap(), Phase::En);
        assert!("fr".parse::<Phase>().is_err());
    }

    #[test]
    fn test_default_phase_until_set() {
        let store = SessionStore::new(Phase::En);
        assert_eq!(store.phase_of("chat-1"), Phase::En);

        store.set_phase("chat-1", Phase::It);
        assert_eq!(store.phase_of("chat-1"), Phase::It);
        // Other conversations keep the default
        assert_eq!(store.phase_of("chat-2"), Phase::En);
    }

    #[test]
    fn test_clear_restores_default() {
        let store = SessionStore::new(Phase::It);
        store.set_phase("chat-1", Phase::En);
        store.clear("chat-1");

        assert_eq!(store.phase_of("chat-1"), Phase::It);
        assert_eq!(store.session_count(), 0);
    }
}
