//! Lifecycle of a language runtime process.
//!
//! A [`Session`] wraps the spawned runtime together with a snapshot of the
//! environment it was launched with. The snapshot is taken at spawn time and
//! never refreshed: diagnostics want to know what the process actually saw,
//! not what the variables happen to be now.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Failed to stop session: {0}")]
    Stop(#[from] std::io::Error),
}

/// A running language runtime plus its launch-time environment snapshot.
#[derive(Debug)]
pub struct Session {
    program: String,
    child: Child,
    env: Vec<(String, String)>,
    working_dir: Option<PathBuf>,
}

impl Session {
    /// Spawns `program` with `args`, inheriting the current environment and
    /// recording it.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, SessionError> {
        Self::spawn_in(program, args, None)
    }

    /// As [`Session::spawn`], with an explicit working directory.
    pub fn spawn_in(
        program: &str,
        args: &[String],
        working_dir: Option<PathBuf>,
    ) -> Result<Self, SessionError> {
        let mut env: Vec<(String, String)> = std::env::vars().collect();
        env.sort();

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|source| SessionError::Spawn {
            program: program.to_string(),
            source,
        })?;

        Ok(Self {
            program: program.to_string(),
            child,
            env,
            working_dir,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> Option<&PathBuf> {
        self.working_dir.as_ref()
    }

    /// OS process id of the runtime.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// The environment as captured at spawn time, sorted by key.
    pub fn environment(&self) -> &[(String, String)] {
        &self.env
    }

    /// Looks up one variable in the launch-time snapshot.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the process is still running (non-blocking).
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kills the process and reaps it.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.child.kill()?;
        self.child.wait()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Reap if the process already exited; never block on a live one.
        let _ = self.child.try_wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_stop() {
        let mut session = Session::spawn("sleep", &["30".to_string()]).unwrap();
        assert!(session.is_running());
        assert!(session.id() > 0);
        session.stop().unwrap();
        assert!(!session.is_running());
    }

    #[test]
    fn environment_snapshot_is_captured_at_spawn() {
        let mut session = Session::spawn("sleep", &["0".to_string()]).unwrap();
        assert!(!session.environment().is_empty());
        // PATH exists in any environment this test runs under.
        assert!(session.env_var("PATH").is_some());
        assert_eq!(session.env_var("BLOCKWISE_SURELY_UNSET_VAR"), None);
        let _ = session.stop();
    }

    #[test]
    fn missing_program_reports_spawn_error() {
        let err = Session::spawn("blockwise-no-such-binary", &[]).unwrap_err();
        assert!(matches!(err, SessionError::Spawn { .. }));
        assert!(err.to_string().contains("blockwise-no-such-binary"));
    }
}
