use std::process::Stdio;

use services::{AnnounceError, Announcer};
use tokio::process::Command;

/// Speaks through the platform's command-line speech tool.
///
/// The process is spawned and left to finish on its own; a slow or missing
/// speech engine never holds up the player clock. Finished processes are
/// reaped by the tokio runtime, so announcing must happen inside one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeechAnnouncer;

impl Announcer for SpeechAnnouncer {
    fn announce(&self, text: &str) -> Result<(), AnnounceError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        spawn_detached(speech_command(text)?)
    }
}

fn spawn_detached(mut cmd: Command) -> Result<(), AnnounceError> {
    if tokio::runtime::Handle::try_current().is_err() {
        return Err(AnnounceError::Unavailable(
            "speech needs a running tokio runtime".to_string(),
        ));
    }
    cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn speech_command(text: &str) -> Result<Command, AnnounceError> {
    let mut cmd = Command::new("say");
    cmd.arg(text);
    Ok(cmd)
}

#[cfg(target_os = "windows")]
fn speech_command(text: &str) -> Result<Command, AnnounceError> {
    let quoted = text.replace('\'', "''");
    let script = format!(
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{quoted}')"
    );
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-Command", &script]);
    Ok(cmd)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn speech_command(text: &str) -> Result<Command, AnnounceError> {
    let mut cmd = Command::new("espeak");
    cmd.arg(text);
    Ok(cmd)
}

#[cfg(not(any(unix, target_os = "windows")))]
fn speech_command(_text: &str) -> Result<Command, AnnounceError> {
    Err(AnnounceError::Unavailable(
        "no speech command for this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_not_spoken() {
        assert!(SpeechAnnouncer.announce("   ").is_ok());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn uses_espeak_on_unix() {
        let cmd = speech_command("Sprints").unwrap();
        assert_eq!(cmd.as_std().get_program(), "espeak");
        assert_eq!(cmd.as_std().get_args().collect::<Vec<_>>(), ["Sprints"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn spawns_inside_a_runtime() {
        spawn_detached(Command::new("true")).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[test]
    fn spawning_outside_a_runtime_is_reported() {
        let err = spawn_detached(Command::new("true")).unwrap_err();
        assert!(matches!(err, AnnounceError::Unavailable(_)));
    }
}
