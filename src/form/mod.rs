//! Client side of the contact flow: draft state, validation, submission and
//! auto-dismissing notices.
//!
//! All state lives in a [`FormState`] value that only changes through
//! [`FormState::reduce`]. [`ContactForm`] owns that value and drives the
//! transport.

mod response;
mod state;
mod transport;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tracing::{error, info, warn};

pub use response::{error_message, transport_failure_message};
pub use state::{
    Action, Draft, DraftError, Field, FormState, Notice, NoticeKind, SEND_FAILED_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use transport::{ContactPayload, HttpTransport, RawResponse, Transport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Rejected(DraftError),
    Failed(String),
    /// A previous submission is still in flight.
    Busy,
}

/// Owns the form state and sends submissions through `T`.
///
/// Notices are dismissed by timers spawned on the current tokio runtime. Outside
/// a runtime they stay until the next submission.
#[derive(Debug)]
pub struct ContactForm<T> {
    transport: T,
    state: Arc<Mutex<FormState>>,
}

impl<T: Clone> Clone for ContactForm<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply(state: &mut FormState, action: Action) {
    *state = std::mem::take(state).reduce(action);
}

/// Clears `sending` if the submission future is dropped before the transport answers.
struct InFlight {
    state: Arc<Mutex<FormState>>,
    armed: bool,
}

impl InFlight {
    fn new(state: Arc<Mutex<FormState>>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            warn!("contact form submission dropped while sending");
            apply(&mut lock(&self.state), Action::SendAbandoned);
        }
    }
}

/// Returns `false` when there is no runtime to run the timer on.
fn arm_dismiss(state: &Arc<Mutex<FormState>>, notice: &Notice) -> bool {
    let Ok(handle) = Handle::try_current() else {
        warn!(notice = notice.id, "no tokio runtime, notice will not be dismissed");
        return false;
    };
    let state = Arc::clone(state);
    let (id, lifetime) = (notice.id, notice.kind.lifetime());
    handle.spawn(async move {
        tokio::time::sleep(lifetime).await;
        apply(&mut lock(&state), Action::DismissNotice(id));
    });
    true
}

impl<T: Transport> ContactForm<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    pub fn snapshot(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::UpdateField(field, value.into()));
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let payload = match self.begin() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };

        let in_flight = InFlight::new(Arc::clone(&self.state));
        let sent = self.transport.send(payload).await;
        in_flight.disarm();

        match sent {
            Ok(response) if response.is_success() => {
                info!(status = response.status, "contact form sent");
                self.dispatch(Action::Sent);
                SubmitOutcome::Sent
            }
            Ok(response) => {
                let message = error_message(&response);
                error!(status = response.status, error = %message, "contact form submit error");
                self.fail(message)
            }
            Err(e) => {
                let message = transport_failure_message(&e);
                error!(error = %message, "contact form submit error");
                self.fail(message)
            }
        }
    }

    /// Clears the notice and validates the draft, then marks the form as sending.
    fn begin(&self) -> Result<ContactPayload, SubmitOutcome> {
        let mut state = lock(&self.state);
        if state.sending {
            return Err(SubmitOutcome::Busy);
        }
        apply(&mut state, Action::SubmitRequested);
        let checked = state.draft.check();
        match checked {
            Ok(payload) => {
                apply(&mut state, Action::SendStarted);
                Ok(payload)
            }
            Err(e) => {
                apply(&mut state, Action::Rejected(e));
                let notice = state.notice.clone();
                drop(state);
                if let Some(notice) = notice {
                    arm_dismiss(&self.state, &notice);
                }
                Err(SubmitOutcome::Rejected(e))
            }
        }
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        self.dispatch(Action::Failed(message.clone()));
        SubmitOutcome::Failed(message)
    }

    fn dispatch(&self, action: Action) {
        let raised = {
            let mut state = lock(&self.state);
            let previous = state.notice.as_ref().map(|notice| notice.id);
            apply(&mut state, action);
            state
                .notice
                .clone()
                .filter(|notice| Some(notice.id) != previous)
        };
        if let Some(notice) = raised {
            arm_dismiss(&self.state, &notice);
        }
    }
}
