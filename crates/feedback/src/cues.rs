//! Cue asset lookup.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::types::FeedbackEvent;

/// Extension used by the bundled cue files.
pub const CUE_EXTENSION: &str = "mp3";

/// Directory of cue assets (`press2.mp3`, `wrong.mp3`, `victory.mp3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSet {
    dir: PathBuf,
}

impl CueSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cue for `event`. `None` for events without a sound.
    pub fn path_for(&self, event: FeedbackEvent) -> Option<PathBuf> {
        event
            .cue()
            .map(|name| self.dir.join(format!("{name}.{CUE_EXTENSION}")))
    }

    /// Resolve the cue for `event`, failing when the asset is missing.
    pub fn resolve(&self, event: FeedbackEvent) -> Result<Option<PathBuf>> {
        let Some(path) = self.path_for(event) else {
            return Ok(None);
        };
        if !path.is_file() {
            bail!("missing cue asset for {}: {}", event.as_str(), path.display());
        }
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_paths_follow_asset_names() {
        let cues = CueSet::new("/assets");
        assert_eq!(
            cues.path_for(FeedbackEvent::CorrectTap),
            Some(PathBuf::from("/assets/press2.mp3"))
        );
        assert_eq!(
            cues.path_for(FeedbackEvent::WrongTap),
            Some(PathBuf::from("/assets/wrong.mp3"))
        );
        assert_eq!(
            cues.path_for(FeedbackEvent::Victory),
            Some(PathBuf::from("/assets/victory.mp3"))
        );
        assert_eq!(cues.path_for(FeedbackEvent::Haptic), None);
    }

    #[test]
    fn resolve_reports_missing_asset() {
        let dir = std::env::temp_dir().join("tui-recall-cues-missing");
        let cues = CueSet::new(&dir);
        let err = cues.resolve(FeedbackEvent::Victory).unwrap_err();
        assert!(err.to_string().contains("victory"));
        assert!(cues.resolve(FeedbackEvent::Haptic).unwrap().is_none());
    }

    #[test]
    fn resolve_finds_present_asset() {
        let dir = std::env::temp_dir().join(format!("tui-recall-cues-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("wrong.mp3"), b"").unwrap();

        let cues = CueSet::new(&dir);
        let path = cues.resolve(FeedbackEvent::WrongTap).unwrap();
        assert_eq!(path, Some(dir.join("wrong.mp3")));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
