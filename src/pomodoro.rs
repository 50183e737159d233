use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Which interval the timer is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work Session",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    pub fn all() -> &'static [SessionKind] {
        &[Self::Work, Self::ShortBreak, Self::LongBreak]
    }
}

/// Interval lengths. Values below 1 are raised to 1 when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Every n-th completed work session is followed by a long break
    pub long_break_interval: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_interval: 4,
        }
    }
}

impl PomodoroSettings {
    pub fn clamped(self) -> Self {
        Self {
            work_minutes: self.work_minutes.max(1),
            short_break_minutes: self.short_break_minutes.max(1),
            long_break_minutes: self.long_break_minutes.max(1),
            long_break_interval: self.long_break_interval.max(1),
        }
    }

    pub fn minutes_for(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_minutes,
            SessionKind::ShortBreak => self.short_break_minutes,
            SessionKind::LongBreak => self.long_break_minutes,
        }
    }

    pub fn seconds_for(&self, kind: SessionKind) -> u64 {
        u64::from(self.minutes_for(kind)) * 60
    }
}

/// Emitted once per finished interval, natural or skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompleted {
    pub finished: SessionKind,
    pub next: SessionKind,
    pub completed_work_count: u32,
}

/// A single countdown. While running it is a monotonic deadline and the
/// remaining time is derived from it, so tick cadence cannot cause drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Pomodoro {
    settings: PomodoroSettings,
    kind: SessionKind,
    remaining_secs: u64,
    completed_work_count: u32,
    /// Set only while running
    deadline: Option<Instant>,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(PomodoroSettings::default())
    }
}

impl Pomodoro {
    pub fn new(settings: PomodoroSettings) -> Self {
        let settings = settings.clamped();
        Self {
            settings,
            kind: SessionKind::Work,
            remaining_secs: settings.seconds_for(SessionKind::Work),
            completed_work_count: 0,
            deadline: None,
        }
    }

    pub fn settings(&self) -> PomodoroSettings {
        self.settings
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_work_count(&self) -> u32 {
        self.completed_work_count
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// "Session #n" shown above the clock
    pub fn session_number(&self) -> u32 {
        self.completed_work_count + 1
    }

    /// Fraction of the current interval still left (1.0 = untouched)
    pub fn progress_ratio(&self) -> f64 {
        let total = self.settings.seconds_for(self.kind);
        if total == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / total as f64
    }

    /// Start counting down. Does nothing if already running.
    pub fn start_at(&mut self, now: Instant) {
        if self.deadline.is_some() {
            return;
        }
        self.deadline = Some(now + Duration::from_secs(self.remaining_secs));
        debug!(kind = ?self.kind, remaining = self.remaining_secs, "pomodoro started");
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Freeze the countdown at its current value
    pub fn pause_at(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline.take() {
            self.remaining_secs = secs_until(deadline, now);
            debug!(kind = ?self.kind, remaining = self.remaining_secs, "pomodoro paused");
        }
    }

    pub fn toggle(&mut self) {
        let now = Instant::now();
        if self.is_running() {
            self.pause_at(now);
        } else {
            self.start_at(now);
        }
    }

    pub fn tick(&mut self) -> Option<SessionCompleted> {
        self.tick_at(Instant::now())
    }

    /// Refresh the remaining time from the deadline. Fires the completion
    /// transition when the deadline has been reached.
    pub fn tick_at(&mut self, now: Instant) -> Option<SessionCompleted> {
        let deadline = self.deadline?;
        self.remaining_secs = secs_until(deadline, now);
        if self.remaining_secs == 0 {
            Some(self.complete())
        } else {
            None
        }
    }

    /// Finish the current interval right away, exactly as if it had run out
    pub fn skip(&mut self) -> SessionCompleted {
        self.complete()
    }

    /// Re-arm the current interval and stop
    pub fn reset(&mut self) {
        self.deadline = None;
        self.remaining_secs = self.settings.seconds_for(self.kind);
    }

    pub fn select_session(&mut self, kind: SessionKind) {
        self.select_session_at(kind, Instant::now());
    }

    /// Jump to `kind` with a full interval. Keeps running if it was running.
    pub fn select_session_at(&mut self, kind: SessionKind, now: Instant) {
        self.kind = kind;
        self.remaining_secs = self.settings.seconds_for(kind);
        if self.deadline.is_some() {
            self.deadline = Some(now + Duration::from_secs(self.remaining_secs));
        }
    }

    /// Replace the settings (on explicit save). Re-arms the current interval
    /// with the new length and stops the timer.
    pub fn apply_settings(&mut self, settings: PomodoroSettings) {
        self.settings = settings.clamped();
        self.reset();
        info!(settings = ?self.settings, "pomodoro settings applied");
    }

    fn complete(&mut self) -> SessionCompleted {
        self.deadline = None;
        let finished = self.kind;
        let next = match finished {
            SessionKind::Work => {
                self.completed_work_count += 1;
                if self.completed_work_count % self.settings.long_break_interval == 0 {
                    SessionKind::LongBreak
                } else {
                    SessionKind::ShortBreak
                }
            }
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Work,
        };
        self.kind = next;
        self.remaining_secs = self.settings.seconds_for(next);
        info!(
            finished = ?finished,
            next = ?next,
            completed = self.completed_work_count,
            "pomodoro session completed"
        );
        SessionCompleted {
            finished,
            next,
            completed_work_count: self.completed_work_count,
        }
    }
}

/// Whole seconds left before `deadline`, rounded up
fn secs_until(deadline: Instant, now: Instant) -> u64 {
    let left = deadline.saturating_duration_since(now);
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

/// Format seconds as MM:SS
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Run the current interval to its natural end
    fn run_out(pomodoro: &mut Pomodoro, now: &mut Instant) -> SessionCompleted {
        pomodoro.start_at(*now);
        *now += Duration::from_secs(pomodoro.remaining_secs());
        pomodoro.tick_at(*now).expect("interval should complete")
    }

    #[test]
    fn test_defaults() {
        let pomodoro = Pomodoro::default();
        assert_eq!(pomodoro.kind(), SessionKind::Work);
        assert_eq!(pomodoro.remaining_secs(), 25 * 60);
        assert_eq!(pomodoro.completed_work_count(), 0);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.session_number(), 1);
    }

    #[test]
    fn test_four_work_sessions_lead_to_long_break() {
        let mut pomodoro = Pomodoro::default();
        let mut now = Instant::now();
        let mut states = vec![pomodoro.kind()];

        while pomodoro.kind() != SessionKind::LongBreak {
            run_out(&mut pomodoro, &mut now);
            states.push(pomodoro.kind());
        }

        assert_eq!(
            states,
            vec![
                SessionKind::Work,
                SessionKind::ShortBreak,
                SessionKind::Work,
                SessionKind::ShortBreak,
                SessionKind::Work,
                SessionKind::ShortBreak,
                SessionKind::Work,
                SessionKind::LongBreak,
            ]
        );
        assert_eq!(pomodoro.completed_work_count(), 4);
        assert_eq!(pomodoro.remaining_secs(), 15 * 60);
    }

    #[test]
    fn test_completion_stops_running() {
        let mut pomodoro = Pomodoro::default();
        let mut now = Instant::now();
        let event = run_out(&mut pomodoro, &mut now);

        assert_eq!(
            event,
            SessionCompleted {
                finished: SessionKind::Work,
                next: SessionKind::ShortBreak,
                completed_work_count: 1,
            }
        );
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.remaining_secs(), 5 * 60);
    }

    #[test]
    fn test_break_returns_to_work_without_counting() {
        let mut pomodoro = Pomodoro::default();
        pomodoro.select_session(SessionKind::ShortBreak);
        let event = pomodoro.skip();
        assert_eq!(event.next, SessionKind::Work);
        assert_eq!(pomodoro.completed_work_count(), 0);
    }

    #[test]
    fn test_skip_matches_natural_completion() {
        let start = Instant::now();
        let mut skipped = Pomodoro::default();
        skipped.start_at(start);
        let at_120_left = start + Duration::from_secs(25 * 60 - 120);
        assert_eq!(skipped.tick_at(at_120_left), None);
        assert_eq!(skipped.remaining_secs(), 120);

        let mut natural = skipped.clone();

        let skip_event = skipped.skip();
        let natural_event = natural
            .tick_at(at_120_left + Duration::from_secs(120))
            .unwrap();

        assert_eq!(skip_event, natural_event);
        assert_eq!(skipped, natural);
    }

    #[test]
    fn test_reset_during_short_break() {
        let mut pomodoro = Pomodoro::default();
        let mut now = Instant::now();
        run_out(&mut pomodoro, &mut now);
        assert_eq!(pomodoro.kind(), SessionKind::ShortBreak);

        pomodoro.start_at(now);
        pomodoro.tick_at(now + Duration::from_secs(100));
        assert_eq!(pomodoro.remaining_secs(), 200);

        pomodoro.reset();
        assert_eq!(pomodoro.remaining_secs(), 5 * 60);
        assert_eq!(pomodoro.kind(), SessionKind::ShortBreak);
        assert_eq!(pomodoro.completed_work_count(), 1);
        assert!(!pomodoro.is_running());
    }

    #[test]
    fn test_paused_countdown_does_not_advance() {
        let mut pomodoro = Pomodoro::default();
        let now = Instant::now();
        pomodoro.start_at(now);
        pomodoro.pause_at(now + Duration::from_secs(10));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 10);

        assert_eq!(pomodoro.tick_at(now + Duration::from_secs(600)), None);
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 10);

        // Resuming continues from the frozen value
        let resume = now + Duration::from_secs(600);
        pomodoro.start_at(resume);
        pomodoro.tick_at(resume + Duration::from_secs(5));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 15);
    }

    #[test]
    fn test_start_twice_keeps_single_deadline() {
        let mut pomodoro = Pomodoro::default();
        let now = Instant::now();
        pomodoro.start_at(now);
        pomodoro.start_at(now + Duration::from_secs(30));

        pomodoro.tick_at(now + Duration::from_secs(60));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 60);
    }

    #[test]
    fn test_irregular_ticks_do_not_drift_and_fire_once() {
        let mut pomodoro = Pomodoro::new(PomodoroSettings {
            work_minutes: 1,
            ..PomodoroSettings::default()
        });
        let start = Instant::now();
        pomodoro.start_at(start);

        let mut completions = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed < Duration::from_secs(90) {
            elapsed += Duration::from_millis(1_300);
            if pomodoro.tick_at(start + elapsed).is_some() {
                completions += 1;
                assert!(elapsed >= Duration::from_secs(60));
                assert!(elapsed < Duration::from_millis(61_300));
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(pomodoro.kind(), SessionKind::ShortBreak);
    }

    #[test]
    fn test_remaining_rounds_up_partial_seconds() {
        let mut pomodoro = Pomodoro::default();
        let now = Instant::now();
        pomodoro.start_at(now);
        pomodoro.tick_at(now + Duration::from_millis(400));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60);
        pomodoro.tick_at(now + Duration::from_millis(1_000));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn test_select_session_keeps_counter_and_running_flag() {
        let mut pomodoro = Pomodoro::default();
        let now = Instant::now();
        pomodoro.select_session_at(SessionKind::LongBreak, now);
        assert_eq!(pomodoro.kind(), SessionKind::LongBreak);
        assert_eq!(pomodoro.remaining_secs(), 15 * 60);
        assert!(!pomodoro.is_running());

        pomodoro.start_at(now);
        let later = now + Duration::from_secs(100);
        pomodoro.select_session_at(SessionKind::Work, later);
        assert!(pomodoro.is_running());
        assert_eq!(pomodoro.completed_work_count(), 0);

        pomodoro.tick_at(later + Duration::from_secs(1));
        assert_eq!(pomodoro.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn test_apply_settings_rearms_and_stops() {
        let mut pomodoro = Pomodoro::default();
        let now = Instant::now();
        pomodoro.start_at(now);
        pomodoro.tick_at(now + Duration::from_secs(30));

        pomodoro.apply_settings(PomodoroSettings {
            work_minutes: 50,
            ..PomodoroSettings::default()
        });

        assert_eq!(pomodoro.remaining_secs(), 50 * 60);
        assert!(!pomodoro.is_running());
    }

    #[test]
    fn test_zero_settings_are_clamped() {
        let mut pomodoro = Pomodoro::default();
        pomodoro.apply_settings(PomodoroSettings {
            work_minutes: 0,
            short_break_minutes: 0,
            long_break_minutes: 0,
            long_break_interval: 0,
        });
        assert_eq!(pomodoro.remaining_secs(), 60);

        // Interval of 1 means every work session earns a long break
        assert_eq!(pomodoro.skip().next, SessionKind::LongBreak);
    }

    #[test]
    fn test_progress_ratio() {
        let mut pomodoro = Pomodoro::default();
        assert_eq!(pomodoro.progress_ratio(), 1.0);
        let now = Instant::now();
        pomodoro.start_at(now);
        pomodoro.tick_at(now + Duration::from_secs(25 * 30));
        assert_eq!(pomodoro.progress_ratio(), 0.5);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }
}
