//! Candidate-integrity monitoring: focus-loss detection, debounced
//! keystroke reporting, and the interviewer-facing alert log.
//!
//! Both detectors are only wired up when the local participant is the
//! candidate; the interviewer side only consumes alerts.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Keystroke classification
// ---------------------------------------------------------------------------

/// Modifier keys held during a keydown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Combinations that suggest the candidate is copying, searching, or
/// leaving the interview surface.
const SUSPICIOUS_COMBINATIONS: &[&str] = &[
    "Ctrl+C", "Cmd+C", // copy
    "Ctrl+V", "Cmd+V", // paste
    "Ctrl+A", "Cmd+A", // select all
    "Ctrl+X", "Cmd+X", // cut
    "Ctrl+Z", "Cmd+Z", // undo
    "Ctrl+Y", "Cmd+Y", // redo
    "Ctrl+F", "Cmd+F", // find
    "Ctrl+H", "Cmd+H", // replace
    "Ctrl+Tab", "Cmd+Tab", // switch tabs
    "Alt+Tab", // switch applications
    "Ctrl+Shift+I", "Cmd+Shift+I", // developer tools
    "F12", // developer tools
    "Ctrl+Shift+J", "Cmd+Shift+J", // console
    "Ctrl+U", "Cmd+U", // view source
];

/// Build the canonical `Ctrl+`/`Cmd+`/`Alt+`/`Shift+` composite for a key.
/// Single letters are uppercased so `Ctrl+c` and `Ctrl+C` classify alike.
pub fn key_combination(key: &str, mods: KeyModifiers) -> String {
    let mut combo = String::new();
    if mods.ctrl {
        combo.push_str("Ctrl+");
    }
    if mods.meta {
        combo.push_str("Cmd+");
    }
    if mods.alt {
        combo.push_str("Alt+");
    }
    if mods.shift && (mods.ctrl || mods.meta || mods.alt || key.len() > 1) {
        // Shift is only spelled out in chords and on named keys; for plain
        // typed characters the shifted symbol is already the key itself.
        combo.push_str("Shift+");
    }
    if key.len() == 1 {
        combo.push_str(&key.to_ascii_uppercase());
    } else {
        combo.push_str(key);
    }
    combo
}

pub fn is_suspicious_combination(combo: &str) -> bool {
    SUSPICIOUS_COMBINATIONS.contains(&combo)
}

/// One debounced, classified keystroke ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokeReport {
    pub key: String,
    pub key_combination: String,
    pub is_suspicious: bool,
}

impl KeystrokeReport {
    fn classify(key: String, mods: KeyModifiers) -> Self {
        let combo = key_combination(&key, mods);
        let is_suspicious = is_suspicious_combination(&combo);
        Self {
            key,
            key_combination: combo,
            is_suspicious,
        }
    }
}

// ---------------------------------------------------------------------------
// Keystroke debouncing
// ---------------------------------------------------------------------------

/// Collapses keydown bursts to the last key of the burst.
///
/// Each press restarts the quiet window; a key is only reported once no
/// further key arrives within it. This is a throughput-reduction measure,
/// not a correctness requirement.
#[derive(Debug)]
pub struct KeystrokeDebouncer {
    quiet: Duration,
    pending: Option<(String, KeyModifiers, Instant)>,
}

impl KeystrokeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a keydown, replacing any pending key and restarting the
    /// quiet window.
    pub fn press(&mut self, key: &str, mods: KeyModifiers, now: Instant) {
        self.pending = Some((key.to_string(), mods, now + self.quiet));
    }

    /// When the pending key's quiet window has elapsed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, _, deadline)| *deadline)
    }

    /// Take and classify the pending key if its quiet window has elapsed.
    pub fn flush_due(&mut self, now: Instant) -> Option<KeystrokeReport> {
        match &self.pending {
            Some((_, _, deadline)) if *deadline <= now => {
                let (key, mods, _) = self.pending.take()?;
                Some(KeystrokeReport::classify(key, mods))
            }
            _ => None,
        }
    }

    /// Drop any pending key. Called on teardown.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Background task driving a [`KeystrokeDebouncer`] with the tokio timer.
/// Exits when the keydown channel closes or the report receiver is gone.
pub(crate) async fn keystroke_pump(
    mut keys_rx: mpsc::Receiver<(String, KeyModifiers)>,
    reports_tx: mpsc::Sender<KeystrokeReport>,
    quiet: Duration,
) {
    let mut debouncer = KeystrokeDebouncer::new(quiet);
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            pressed = keys_rx.recv() => match pressed {
                Some((key, mods)) => debouncer.press(&key, mods, Instant::now()),
                None => return,
            },
            _ = tokio::time::sleep_until(
                tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now))
            ), if deadline.is_some() => {
                if let Some(report) = debouncer.flush_due(Instant::now()) {
                    if reports_tx.send(report).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Focus tracking
// ---------------------------------------------------------------------------

/// Detects window-focus loss worth reporting.
///
/// Blur records an instant; focus measures the elapsed time and reports it
/// in whole rounded seconds when it exceeds the threshold. Short flickers
/// (alt-tab glances under the threshold) are suppressed as noise. The
/// pending instant is cleared on focus regardless of whether a report was
/// produced.
#[derive(Debug)]
pub struct FocusTracker {
    threshold: Duration,
    lost_at: Option<Instant>,
}

impl FocusTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            lost_at: None,
        }
    }

    pub fn blur(&mut self, now: Instant) {
        self.lost_at = Some(now);
    }

    /// Returns the away-duration in whole seconds when it exceeded the
    /// threshold, `None` otherwise.
    pub fn focus(&mut self, now: Instant) -> Option<u64> {
        let lost_at = self.lost_at.take()?;
        let elapsed = now.saturating_duration_since(lost_at);
        if elapsed > self.threshold {
            Some((elapsed.as_millis() as f64 / 1000.0).round() as u64)
        } else {
            None
        }
    }

    pub fn is_blurred(&self) -> bool {
        self.lost_at.is_some()
    }
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

// ---------------------------------------------------------------------------
// Alert log
// ---------------------------------------------------------------------------

/// A candidate-integrity signal relayed to the interviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringAlert {
    pub alert_type: String,
    pub message: String,
    pub timestamp: String,
}

/// Bounded rolling log of alerts for display. Oldest entries are dropped
/// from display only; the authoritative log lives in the backend.
#[derive(Debug, Clone)]
pub struct AlertLog {
    capacity: usize,
    entries: VecDeque<MonitoringAlert>,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, alert: MonitoringAlert) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(alert);
    }

    /// The most recent `limit` alerts, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<&MonitoringAlert> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).collect()
    }

    pub fn all(&self) -> Vec<MonitoringAlert> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(ctrl: bool, meta: bool, alt: bool, shift: bool) -> KeyModifiers {
        KeyModifiers {
            ctrl,
            meta,
            alt,
            shift,
        }
    }

    #[test]
    fn combination_formats_composites() {
        assert_eq!(key_combination("c", mods(true, false, false, false)), "Ctrl+C");
        assert_eq!(key_combination("v", mods(false, true, false, false)), "Cmd+V");
        assert_eq!(key_combination("Tab", mods(false, false, true, false)), "Alt+Tab");
        assert_eq!(
            key_combination("I", mods(true, false, false, true)),
            "Ctrl+Shift+I"
        );
        // Plain shifted typing carries no Shift prefix.
        assert_eq!(key_combination("A", mods(false, false, false, true)), "A");
        assert_eq!(
            key_combination("F12", mods(false, false, false, false)),
            "F12"
        );
    }

    #[test]
    fn devtools_chords_are_suspicious() {
        let report = KeystrokeReport::classify("I".into(), mods(true, false, false, true));
        assert_eq!(report.key_combination, "Ctrl+Shift+I");
        assert!(report.is_suspicious);

        let report = KeystrokeReport::classify("J".into(), mods(false, true, false, true));
        assert_eq!(report.key_combination, "Cmd+Shift+J");
        assert!(report.is_suspicious);
    }

    #[test]
    fn classification_flags_denylisted_combos() {
        let report = KeystrokeReport::classify("c".into(), mods(true, false, false, false));
        assert!(report.is_suspicious);
        assert_eq!(report.key_combination, "Ctrl+C");

        let report = KeystrokeReport::classify("a".into(), KeyModifiers::default());
        assert!(!report.is_suspicious);
        assert_eq!(report.key_combination, "A");

        let report = KeystrokeReport::classify("F12".into(), KeyModifiers::default());
        assert!(report.is_suspicious);
    }

    #[test]
    fn debouncer_collapses_burst_to_last_key() {
        let t0 = Instant::now();
        let mut debouncer = KeystrokeDebouncer::new(Duration::from_millis(100));

        debouncer.press("a", KeyModifiers::default(), t0);
        debouncer.press("b", KeyModifiers::default(), t0 + Duration::from_millis(25));
        debouncer.press("c", KeyModifiers::default(), t0 + Duration::from_millis(50));

        // Quiet window restarts on every press: nothing due at +100ms.
        assert!(debouncer.flush_due(t0 + Duration::from_millis(100)).is_none());

        let report = debouncer
            .flush_due(t0 + Duration::from_millis(150))
            .expect("burst should flush after the quiet window");
        assert_eq!(report.key, "c");

        // Only one report per burst.
        assert!(debouncer.flush_due(t0 + Duration::from_millis(300)).is_none());
    }

    #[test]
    fn debouncer_clear_drops_pending() {
        let t0 = Instant::now();
        let mut debouncer = KeystrokeDebouncer::new(Duration::from_millis(100));
        debouncer.press("a", KeyModifiers::default(), t0);
        debouncer.clear();
        assert!(debouncer.flush_due(t0 + Duration::from_secs(1)).is_none());
    }

    #[tokio::test]
    async fn pump_reports_last_key_of_burst() {
        let (keys_tx, keys_rx) = mpsc::channel(16);
        let (reports_tx, mut reports_rx) = mpsc::channel(16);
        tokio::spawn(keystroke_pump(keys_rx, reports_tx, Duration::from_millis(50)));

        for key in ["a", "b", "c"] {
            keys_tx
                .send((key.to_string(), KeyModifiers::default()))
                .await
                .unwrap();
        }

        let report = tokio::time::timeout(Duration::from_secs(2), reports_rx.recv())
            .await
            .expect("pump should flush within the timeout")
            .expect("pump should still be running");
        assert_eq!(report.key, "c");

        // The burst produced exactly one report.
        let extra = tokio::time::timeout(Duration::from_millis(200), reports_rx.recv()).await;
        assert!(extra.is_err());
    }

    #[test]
    fn focus_suppresses_short_flicker() {
        let t0 = Instant::now();
        let mut tracker = FocusTracker::default();
        tracker.blur(t0);
        assert!(tracker.is_blurred());
        assert_eq!(tracker.focus(t0 + Duration::from_millis(800)), None);
        assert!(!tracker.is_blurred());
    }

    #[test]
    fn focus_reports_rounded_seconds() {
        let t0 = Instant::now();
        let mut tracker = FocusTracker::default();
        tracker.blur(t0);
        assert_eq!(tracker.focus(t0 + Duration::from_millis(1500)), Some(2));

        tracker.blur(t0);
        assert_eq!(tracker.focus(t0 + Duration::from_millis(1200)), Some(1));

        tracker.blur(t0);
        assert_eq!(tracker.focus(t0 + Duration::from_millis(3499)), Some(3));
    }

    #[test]
    fn focus_clears_pending_even_without_report() {
        let t0 = Instant::now();
        let mut tracker = FocusTracker::default();
        tracker.blur(t0);
        tracker.focus(t0 + Duration::from_millis(500));
        // No stale blur left behind: a later focus reports nothing.
        assert_eq!(tracker.focus(t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn alert_log_evicts_oldest() {
        let mut log = AlertLog::new(3);
        for i in 0..5 {
            log.push(MonitoringAlert {
                alert_type: "keystroke".into(),
                message: format!("alert {i}"),
                timestamp: String::new(),
            });
        }
        assert_eq!(log.len(), 3);
        let recent = log.recent(2);
        assert_eq!(recent[0].message, "alert 3");
        assert_eq!(recent[1].message, "alert 4");
        assert_eq!(log.all()[0].message, "alert 2");
    }
}
