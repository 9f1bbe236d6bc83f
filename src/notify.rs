//! Transient messages, notifications, the confirmation dialog and the
//! loading bar.
//!
//! [`Notifier`] only holds state; the UI renders whatever it currently
//! contains and feeds user actions back through [`Notifier::resolve_dialog`],
//! [`Notifier::dismiss`] and [`Notifier::set_hovered`].

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tracing::debug;

pub const MESSAGE_DURATION: Duration = Duration::from_millis(3000);
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(4500);
pub const LOADING_SETTLE: Duration = Duration::from_millis(400);

pub const DEFAULT_POSITIVE_TEXT: &str = "Confirm";
pub const DEFAULT_NEGATIVE_TEXT: &str = "Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: MessageKind,
    pub content: String,
    /// `Duration::ZERO` keeps the entry until dismissed.
    pub duration: Duration,
    created_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: MessageKind,
    pub title: String,
    pub content: String,
    pub duration: Duration,
    pub hovered: bool,
    created_at: Instant,
}

fn expired(created_at: Instant, duration: Duration, now: Instant) -> bool {
    !duration.is_zero() && now.saturating_duration_since(created_at) >= duration
}

/// How the user left the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Positive,
    Negative,
    /// Close icon in the dialog header.
    Closed,
    /// Click on the overlay behind the dialog.
    MaskDismissed,
}

impl DialogOutcome {
    pub fn confirmed(self) -> bool {
        matches!(self, DialogOutcome::Positive)
    }
}

#[derive(Debug)]
pub struct Dialog {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub positive_text: String,
    pub negative_text: String,
    responder: oneshot::Sender<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingBar {
    #[default]
    Idle,
    Loading {
        started_at: Instant,
    },
    Finished {
        at: Instant,
    },
    Failed {
        at: Instant,
    },
}

#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    toasts: Vec<Toast>,
    notifications: Vec<Notification>,
    dialog: Option<Dialog>,
    loading: LoadingBar,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn show_message(
        &mut self,
        content: impl Into<String>,
        kind: MessageKind,
        duration: Duration,
    ) -> u64 {
        let id = self.allocate_id();
        self.toasts.push(Toast {
            id,
            kind,
            content: content.into(),
            duration,
            created_at: Instant::now(),
        });
        id
    }

    /// [`show_message`](Self::show_message) with the default duration.
    pub fn message(&mut self, content: impl Into<String>, kind: MessageKind) -> u64 {
        self.show_message(content, kind, MESSAGE_DURATION)
    }

    pub fn show_notification(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
        duration: Duration,
    ) -> u64 {
        let id = self.allocate_id();
        self.notifications.push(Notification {
            id,
            kind,
            title: title.into(),
            content: content.into(),
            duration,
            hovered: false,
            created_at: Instant::now(),
        });
        id
    }

    pub fn notify(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> u64 {
        self.show_notification(title, content, kind, NOTIFICATION_DURATION)
    }

    /// Hovered notifications never expire; leaving restarts their timer.
    pub fn set_hovered(&mut self, id: u64, hovered: bool) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            if n.hovered && !hovered {
                n.created_at = Instant::now();
            }
            n.hovered = hovered;
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
        self.notifications.retain(|n| n.id != id);
    }

    pub fn confirm(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.confirm_with(title, content, DEFAULT_POSITIVE_TEXT, DEFAULT_NEGATIVE_TEXT)
    }

    /// Opens the confirmation dialog. The returned future yields `true` only
    /// for the positive button; every other way out, including the dialog
    /// being replaced or the notifier dropped, yields `false`.
    pub fn confirm_with(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        positive_text: impl Into<String>,
        negative_text: impl Into<String>,
    ) -> impl Future<Output = bool> + Send + 'static {
        if let Some(previous) = self.dialog.take() {
            debug!("Dialog {} replaced before it was answered", previous.id);
            let _ = previous.responder.send(false);
        }

        let (responder, answer) = oneshot::channel();
        let id = self.allocate_id();
        self.dialog = Some(Dialog {
            id,
            title: title.into(),
            content: content.into(),
            positive_text: positive_text.into(),
            negative_text: negative_text.into(),
            responder,
        });

        async move { answer.await.unwrap_or(false) }
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Answers the open dialog. Returns the value delivered, or `None` when
    /// there was no dialog left to answer.
    pub fn resolve_dialog(&mut self, outcome: DialogOutcome) -> Option<bool> {
        let dialog = self.dialog.take()?;
        let confirmed = outcome.confirmed();
        debug!("Dialog {} resolved with {:?}", dialog.id, outcome);
        let _ = dialog.responder.send(confirmed);
        Some(confirmed)
    }

    pub fn start_loading(&mut self) {
        self.loading = LoadingBar::Loading {
            started_at: Instant::now(),
        };
    }

    pub fn finish_loading(&mut self) {
        self.loading = LoadingBar::Finished { at: Instant::now() };
    }

    pub fn error_loading(&mut self) {
        self.loading = LoadingBar::Failed { at: Instant::now() };
    }

    pub fn loading(&self) -> LoadingBar {
        self.loading
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Whether anything is on screen that needs periodic [`tick`](Self::tick)s.
    pub fn is_active(&self) -> bool {
        !self.toasts.is_empty()
            || !self.notifications.is_empty()
            || !matches!(self.loading, LoadingBar::Idle)
    }

    pub fn tick(&mut self, now: Instant) {
        self.toasts
            .retain(|t| !expired(t.created_at, t.duration, now));
        self.notifications
            .retain(|n| n.hovered || !expired(n.created_at, n.duration, now));

        if let LoadingBar::Finished { at } | LoadingBar::Failed { at } = self.loading {
            if now.saturating_duration_since(at) >= LOADING_SETTLE {
                self.loading = LoadingBar::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn positive_button_confirms() {
        let mut notifier = Notifier::new();
        let answer = notifier.confirm("Delete import?", "This cannot be undone.");
        assert_eq!(notifier.dialog().unwrap().positive_text, "Confirm");
        assert_eq!(notifier.resolve_dialog(DialogOutcome::Positive), Some(true));
        assert!(block_on(answer));
    }

    #[test]
    fn dismissal_resolves_false_exactly_once() {
        let mut notifier = Notifier::new();
        let answer = notifier.confirm_with("Leave page?", "Upload in progress.", "Leave", "Stay");
        assert_eq!(notifier.resolve_dialog(DialogOutcome::MaskDismissed), Some(false));
        assert_eq!(notifier.resolve_dialog(DialogOutcome::Closed), None);
        assert_eq!(notifier.resolve_dialog(DialogOutcome::Positive), None);
        assert!(!block_on(answer));
        assert!(notifier.dialog().is_none());
    }

    #[test]
    fn negative_and_close_resolve_false() {
        for outcome in [DialogOutcome::Negative, DialogOutcome::Closed] {
            let mut notifier = Notifier::new();
            let answer = notifier.confirm("t", "c");
            notifier.resolve_dialog(outcome);
            assert!(!block_on(answer));
        }
    }

    #[test]
    fn replaced_or_dropped_dialogs_resolve_false() {
        let mut notifier = Notifier::new();
        let first = notifier.confirm("first", "c");
        let second = notifier.confirm("second", "c");
        assert!(!block_on(first));
        assert_eq!(notifier.dialog().unwrap().title, "second");

        drop(notifier);
        assert!(!block_on(second));
    }

    #[test]
    fn messages_expire_after_their_duration() {
        let mut notifier = Notifier::new();
        notifier.message("Saved", MessageKind::Success);
        notifier.show_message("Sticky", MessageKind::Warning, Duration::ZERO);
        assert_eq!(notifier.toasts().len(), 2);

        notifier.tick(Instant::now() + MESSAGE_DURATION + Duration::from_millis(1));
        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(notifier.toasts()[0].content, "Sticky");
        assert_eq!(notifier.toasts()[0].kind, MessageKind::Warning);
    }

    #[test]
    fn hovered_notifications_stay() {
        let mut notifier = Notifier::new();
        let kept = notifier.notify("Import finished", "4803 movies", MessageKind::Success);
        notifier.notify("Heads up", "Slow backend", MessageKind::Warning);
        notifier.set_hovered(kept, true);

        notifier.tick(Instant::now() + NOTIFICATION_DURATION * 2);
        assert_eq!(notifier.notifications().len(), 1);
        assert_eq!(notifier.notifications()[0].id, kept);

        notifier.set_hovered(kept, false);
        notifier.tick(Instant::now() + NOTIFICATION_DURATION + Duration::from_millis(1));
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn dismiss_removes_entries() {
        let mut notifier = Notifier::new();
        let id = notifier.message("x", MessageKind::Info);
        notifier.dismiss(id);
        assert!(notifier.toasts().is_empty());
        assert!(!notifier.is_active());
    }

    #[test]
    fn loading_bar_settles_to_idle() {
        let mut notifier = Notifier::new();
        notifier.start_loading();
        assert!(matches!(notifier.loading(), LoadingBar::Loading { .. }));
        assert!(notifier.is_active());

        notifier.error_loading();
        assert!(matches!(notifier.loading(), LoadingBar::Failed { .. }));
        notifier.tick(Instant::now());
        assert!(matches!(notifier.loading(), LoadingBar::Failed { .. }));
        notifier.tick(Instant::now() + LOADING_SETTLE);
        assert_eq!(notifier.loading(), LoadingBar::Idle);

        notifier.start_loading();
        notifier.finish_loading();
        notifier.tick(Instant::now() + LOADING_SETTLE);
        assert_eq!(notifier.loading(), LoadingBar::Idle);
    }
}
