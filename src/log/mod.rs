use std::path::{Path, PathBuf};

use fs_err as fs;
use serde_json::to_string_pretty;
use uuid::Uuid;

use crate::config::Config;
use crate::wire::{GenerationRequest, GenerationResponse};

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

fn session_dir(root: &Path, session: Uuid) -> PathBuf {
    root.join(".memo").join("sessions").join(session.to_string())
}

/// Persists one exchange under the session's transcript directory, one pair
/// of files per step key. Regenerations overwrite the earlier pair.
pub fn save_call(
    req: &GenerationRequest,
    resp: &GenerationResponse,
    cfg: &Config,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = session_dir(Path::new(&cfg.transcript_root), req.session);
    fs::create_dir_all(&dir)?;

    let mut request_path = None;
    let mut response_path = None;

    if save_request {
        let p = dir.join(format!("{}.request.json", req.step));
        fs::write(&p, to_string_pretty(req)?)?;
        request_path = Some(p);
    }

    if save_response {
        let p = dir.join(format!("{}.response.json", req.step));
        fs::write(&p, to_string_pretty(resp)?)?;
        response_path = Some(p);
    }

    Ok(SavedPaths { dir, request: request_path, response: response_path })
}

pub fn print_saved_paths(step: &str, saved: &SavedPaths) {
    println!("debug[{step}]: transcript directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        println!("debug[{step}]: request saved at: {}", p.display());
    } else {
        println!("debug[{step}]: request not saved (flag off)");
    }
    if let Some(p) = &saved.response {
        println!("debug[{step}]: response saved at: {}", p.display());
    } else {
        println!("debug[{step}]: response not saved (flag off)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StepKey;
    use chrono::Utc;

    fn exchange() -> (GenerationRequest, GenerationResponse) {
        (
            GenerationRequest {
                session: Uuid::new_v4(),
                timestamp: Utc::now(),
                step: StepKey::CoreIssue,
                model: "gemini-1.5-pro".into(),
                system: "sys".into(),
                prompt: "prompt".into(),
                grounded: true,
                temperature: 0.3,
            },
            GenerationResponse { text: "body".into(), disclaimer_appended: true },
        )
    }

    #[test]
    fn saves_request_and_response_pairs_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            transcript_root: dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        let (req, resp) = exchange();

        let saved = save_call(&req, &resp, &cfg, true, true).unwrap();
        assert!(saved.request.as_ref().unwrap().ends_with("core_issue.request.json"));
        assert!(saved.response.as_ref().unwrap().ends_with("core_issue.response.json"));

        let raw = fs::read_to_string(saved.response.unwrap()).unwrap();
        let round: GenerationResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(round.text, "body");
        assert!(round.disclaimer_appended);
    }

    #[test]
    fn flags_suppress_individual_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            transcript_root: dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        let (req, resp) = exchange();

        let saved = save_call(&req, &resp, &cfg, false, true).unwrap();
        assert!(saved.request.is_none());
        assert!(saved.response.is_some());
    }
}
