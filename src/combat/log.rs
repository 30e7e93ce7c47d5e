//! Duel logging
//!
//! Records every skill, cast and health event of a duel for display and
//! post-match analysis.

use serde::Serialize;

/// A single entry in the duel log
#[derive(Debug, Clone, Serialize)]
pub struct DuelLogEntry {
    /// Timestamp in match time (seconds since the duel started)
    pub timestamp: f32,
    /// The type of event
    pub event_type: DuelEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of duel log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuelEventType {
    /// Skill resolved (instant use or completed cast)
    SkillUsed,
    /// Cast began
    CastStarted,
    /// Cast ran its full duration and resolved
    CastCompleted,
    /// Cast aborted before resolving
    CastCanceled,
    /// Damage dealt
    Damage,
    /// Healing done
    Healing,
    /// Cooldown finished
    SkillReady,
    /// A fighter was defeated
    Defeat,
    /// Duel event (start, reset, etc.)
    MatchEvent,
}

/// Summary of one fighter written alongside an exported log.
#[derive(Debug, Clone, Serialize)]
pub struct FighterMetadata {
    pub name: String,
    pub max_health: u32,
    pub final_health: u32,
}

/// Everything written next to the log entries on export.
#[derive(Debug, Clone, Serialize)]
pub struct DuelMetadata {
    pub player: FighterMetadata,
    pub opponent: FighterMetadata,
    pub opponent_defeated: bool,
    pub random_seed: Option<u64>,
}

#[derive(Serialize)]
struct DuelLogExport<'a> {
    metadata: &'a DuelMetadata,
    match_time: f32,
    entries: &'a [DuelLogEntry],
}

/// The duel log storing all events
#[derive(Debug, Clone, Default)]
pub struct DuelLog {
    /// All log entries in chronological order
    pub entries: Vec<DuelLogEntry>,
    /// Current match time in seconds
    pub match_time: f32,
}

impl DuelLog {
    /// Clear the log for a new duel
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Advance match time by `delta_ms` milliseconds
    pub fn advance(&mut self, delta_ms: f32) {
        self.match_time += delta_ms.max(0.0) / 1000.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: DuelEventType, message: String) {
        self.entries.push(DuelLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: DuelEventType) -> Vec<&DuelLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Number of entries of the given type
    pub fn count(&self, event_type: DuelEventType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&DuelLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Write the log as pretty JSON. Without an explicit path a timestamped
    /// file is created under `duel_logs/`. Returns the path written.
    pub fn save_to_file(
        &self,
        metadata: &DuelMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let path = match output_path {
            Some(path) => path.to_string(),
            None => {
                std::fs::create_dir_all("duel_logs")
                    .map_err(|e| format!("Failed to create duel_logs directory: {}", e))?;
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                format!("duel_logs/duel_{}.json", stamp)
            }
        };

        let export = DuelLogExport {
            metadata,
            match_time: self.match_time,
            entries: &self.entries,
        };
        let contents = serde_json::to_string_pretty(&export)
            .map_err(|e| format!("Failed to serialize duel log: {}", e))?;
        std::fs::write(&path, contents)
            .map_err(|e| format!("Failed to write {}: {}", path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_take_current_match_time() {
        let mut log = DuelLog::default();
        log.log(DuelEventType::MatchEvent, "start".to_string());
        log.advance(1500.0);
        log.log(DuelEventType::SkillUsed, "Fireball".to_string());
        assert_eq!(log.entries[0].timestamp, 0.0);
        assert_eq!(log.entries[1].timestamp, 1.5);
    }

    #[test]
    fn test_filter_and_count() {
        let mut log = DuelLog::default();
        log.log(DuelEventType::Damage, "15".to_string());
        log.log(DuelEventType::Healing, "25".to_string());
        log.log(DuelEventType::Damage, "20".to_string());
        assert_eq!(log.count(DuelEventType::Damage), 2);
        assert_eq!(log.filter_by_type(DuelEventType::Healing).len(), 1);
        assert_eq!(log.count(DuelEventType::Defeat), 0);
    }

    #[test]
    fn test_recent_keeps_chronological_order() {
        let mut log = DuelLog::default();
        for i in 0..5 {
            log.log(DuelEventType::MatchEvent, i.to_string());
        }
        let recent: Vec<&str> = log.recent(2).iter().map(|e| e.message.as_str()).collect();
        assert_eq!(recent, vec!["3", "4"]);
    }

    #[test]
    fn test_clear_resets_time() {
        let mut log = DuelLog::default();
        log.advance(1000.0);
        log.log(DuelEventType::MatchEvent, "x".to_string());
        log.clear();
        assert!(log.entries.is_empty());
        assert_eq!(log.match_time, 0.0);
    }
}
