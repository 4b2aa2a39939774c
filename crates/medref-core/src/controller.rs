//! Reactive guard shell.
//!
//! [`GuardController`] watches the session and the current path, re-runs the
//! guard on every change and publishes the latest [`GuardDecision`]. Redirects
//! go through a [`Navigator`]. A redirect that is still settling when the next
//! change arrives is simply superseded by the newer evaluation.
//!
//! The login page is public: it always renders and never navigates, so a
//! navigator that feeds its target back into the path channel settles there.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::guard::{GuardDecision, Session};
use crate::policy::AccessPolicy;
use crate::routes::normalize_path;

/// Performs client-side navigation for the guard.
pub trait Navigator: Send + Sync + 'static {
    /// Navigate to `target`. Must not block; fire and forget.
    fn navigate(&self, target: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, target: &str) {
        (**self).navigate(target)
    }
}

pub struct GuardController<N> {
    policy: Arc<AccessPolicy>,
    navigator: N,
    decisions: watch::Sender<GuardDecision>,
}

impl<N: Navigator> GuardController<N> {
    /// Creates the controller and a receiver for its decisions. The receiver
    /// starts at [`GuardDecision::ShowLoading`] until the first evaluation.
    pub fn new(policy: Arc<AccessPolicy>, navigator: N) -> (Self, watch::Receiver<GuardDecision>) {
        let (decisions, rx) = watch::channel(GuardDecision::ShowLoading);
        (
            Self {
                policy,
                navigator,
                decisions,
            },
            rx,
        )
    }

    /// Evaluates once and performs the resulting side effects.
    pub fn apply(&self, session: &Session, path: &str) -> GuardDecision {
        let decision = if normalize_path(path) == self.policy.login_path() {
            GuardDecision::Render
        } else {
            self.policy.evaluate(session, path)
        };
        debug!(
            path = %path,
            role = ?session.role,
            state = %decision.state(),
            "Guard evaluated"
        );

        if let Some(target) = decision.redirect_target() {
            self.navigator.navigate(target);
        }
        self.decisions.send_replace(decision.clone());
        decision
    }

    /// Runs until either input channel closes, re-evaluating on every change.
    #[instrument(skip_all)]
    pub async fn run(
        self,
        mut session: watch::Receiver<Session>,
        mut path: watch::Receiver<String>,
    ) {
        loop {
            let current_session = *session.borrow_and_update();
            let current_path = path.borrow_and_update().clone();
            self.apply(&current_session, &current_path);

            tokio::select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = path.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Guard inputs closed, controller stopped");
    }
}
