use crate::config::write_json_atomic;
use crate::model::SAVE_VERSION;
use crate::session::Session;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SaveFile {
    pub version: u32,
    pub session: Session,
}

/// Loads the saved session, or an empty one when no save exists yet.
pub fn load_or_init_session(path: &Path) -> Result<Session> {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::new()),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let save: SaveFile =
        serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    if save.version > SAVE_VERSION {
        bail!(
            "{} was written by a newer version (save format {}, expected {})",
            path.display(),
            save.version,
            SAVE_VERSION
        );
    }
    Ok(save.session)
}

pub fn save_atomic(path: &Path, session: &Session) -> Result<()> {
    let save = SaveFile {
        version: SAVE_VERSION,
        session: session.clone(),
    };
    write_json_atomic(path, &save)?;
    tracing::debug!(path = %path.display(), pets = session.pets.len(), "session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;
    use chrono::Utc;

    #[test]
    fn save_then_load_restores_session() {
        let dir = std::env::temp_dir().join(format!("digipet-save-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("save.json");

        assert_eq!(load_or_init_session(&path).unwrap(), Session::new());

        let mut session = Session::new();
        session.create_pet("Ash", Species::Axolotl, Utc::now());
        save_atomic(&path, &session).unwrap();
        assert_eq!(load_or_init_session(&path).unwrap(), session);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn newer_save_format_is_rejected() {
        let dir = std::env::temp_dir().join(format!("digipet-future-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("save.json");
        let json = format!(
            r#"{{"version":{},"session":{{"pets":{{}},"active":null}}}}"#,
            SAVE_VERSION + 1
        );
        fs::write(&path, json).unwrap();
        assert!(load_or_init_session(&path).is_err());
    }
}
