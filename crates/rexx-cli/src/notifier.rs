//! Terminal rendition of sound cues and completion banners.

use std::io::Write;

use rexx_core::storage::NotificationsConfig;
use rexx_core::{Notifier, SoundCue};

/// Bell and banner output on stderr, so `--json` stdout stays parseable.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    bell: bool,
    banner: bool,
}

impl TerminalNotifier {
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self {
            bell: config.bell,
            banner: config.desktop_banner,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn play(&self, cue: SoundCue) {
        tracing::debug!(?cue, "sound cue");
        // Start and stop cues are log-only.
        if self.bell && cue == SoundCue::Finish {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\x07");
            let _ = stderr.flush();
        }
    }

    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
        if self.banner {
            eprintln!("\n[{title}] {body}");
        }
    }
}
