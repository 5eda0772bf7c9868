use crate::form::transport::ContactPayload;
use regex::Regex;
use serde::Serialize;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Mensaje enviado. ¡Gracias!";
pub const SEND_FAILED_MESSAGE: &str = "Error al enviar. Intenta más tarde.";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email shape pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "message" => Ok(Field::Message),
            other => Err(format!("{other} is not a contact form field")),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("Todos los campos son obligatorios.")]
    MissingFields,
    #[error("Por favor, ingresa un email válido.")]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Draft {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    /// Blank fields are reported before a malformed email.
    pub fn check(&self) -> Result<ContactPayload, DraftError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(DraftError::MissingFields);
        }
        if !EMAIL_SHAPE.is_match(&self.email) {
            return Err(DraftError::InvalidEmail);
        }
        Ok(ContactPayload {
            name: self.name.to_owned(),
            email: self.email.to_owned(),
            message: self.message.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn lifetime(&self) -> Duration {
        match self {
            NoticeKind::Success => Duration::from_millis(4200),
            NoticeKind::Error => Duration::from_secs(6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateField(Field, String),
    SubmitRequested,
    Rejected(DraftError),
    SendStarted,
    /// The send was cancelled before an answer arrived. Clears `sending` only.
    SendAbandoned,
    Sent,
    Failed(String),
    DismissNotice(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub draft: Draft,
    pub sending: bool,
    pub notice: Option<Notice>,
    #[serde(skip)]
    next_notice_id: u64,
}

impl FormState {
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::UpdateField(field, value) => {
                self.draft.set(field, value);
                self
            }
            Action::SubmitRequested => {
                self.notice = None;
                self
            }
            Action::Rejected(error) => self.raise(NoticeKind::Error, error.to_string()),
            Action::SendStarted => {
                self.sending = true;
                self
            }
            Action::SendAbandoned => {
                self.sending = false;
                self
            }
            Action::Sent => {
                self.sending = false;
                self.draft = Draft::default();
                self.raise(NoticeKind::Success, SUCCESS_MESSAGE.to_string())
            }
            Action::Failed(text) => {
                self.sending = false;
                let text = if text.trim().is_empty() {
                    SEND_FAILED_MESSAGE.to_string()
                } else {
                    text
                };
                self.raise(NoticeKind::Error, text)
            }
            Action::DismissNotice(id) => {
                if self.notice.as_ref().is_some_and(|notice| notice.id == id) {
                    self.notice = None;
                }
                self
            }
        }
    }

    fn raise(mut self, kind: NoticeKind, text: String) -> Self {
        self.next_notice_id += 1;
        self.notice = Some(Notice {
            id: self.next_notice_id,
            kind,
            text,
        });
        self
    }
}
