/// Session-complete notifications
/// Rings the terminal bell everywhere and adds a desktop notification on macOS

use crate::pomodoro::{SessionCompleted, SessionKind};
use std::io::Write;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Message shown when an interval ends
pub fn completion_message(event: &SessionCompleted) -> String {
    match event.next {
        SessionKind::Work => "Break is over. Time to focus.".to_string(),
        SessionKind::ShortBreak => format!(
            "Pomodoro #{} done. Take a short break.",
            event.completed_work_count
        ),
        SessionKind::LongBreak => format!(
            "Pomodoro #{} done. Enjoy a long break.",
            event.completed_work_count
        ),
    }
}

/// Signal that a Pomodoro interval finished
pub fn notify_session_complete(event: &SessionCompleted) {
    let message = completion_message(event);

    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "ProjectPro - {}" sound name "Glass""#,
            message.replace('"', "\\\""),
            event.finished.label()
        );

        let _ = Command::new("osascript").arg("-e").arg(&script).output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = message;
    }
}
