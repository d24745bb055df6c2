use crate::action::{ActionDescriptor, Effect};
use crate::client::{ApiClient, ApiResponse, ResponseBody};
use crate::confirm::{AssumeYes, Confirm};
use crate::error::ActionError;
use crate::form::FormValues;
use crate::notification::Severity;
use crate::ui_state::UiState;
use serde::Serialize;
use serde_json::Value;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Rendering target for action side effects.
pub trait FormSurface {
    fn apply(&mut self, effect: Effect, payload: &Value);
}

/// For callers that only care about the notification.
impl FormSurface for () {
    fn apply(&mut self, _effect: Effect, _payload: &Value) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessPayload {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed(SuccessPayload),
    /// The confirmation prompt was declined. Nothing was sent or shown.
    Cancelled,
    /// Another action held the busy indicator. Nothing was sent or shown.
    Busy,
}

/// Runs one [`ActionDescriptor`] against the backend and turns the result
/// into exactly one notification.
pub struct FormActionController<'a> {
    client: &'a ApiClient,
    ui: &'a UiState,
}

impl<'a> FormActionController<'a> {
    pub fn new(client: &'a ApiClient, ui: &'a UiState) -> Self {
        Self { client, ui }
    }

    /// Validate, confirm, send, interpret, notify.
    ///
    /// Every `Err` has already been shown as a notification. `Cancelled` and
    /// `Busy` emit nothing. On success `descriptor.on_success` is applied
    /// once; `Effect::ResetForm` clears `form` before the surface sees it.
    pub async fn execute<C, S>(
        &self,
        descriptor: &ActionDescriptor,
        form: &mut FormValues,
        confirm: &C,
        surface: &mut S,
    ) -> Result<Outcome, ActionError>
    where
        C: Confirm,
        S: FormSurface,
    {
        self.run(descriptor, form, confirm, surface, true).await
    }

    /// Re-run a field-less listing action after another action succeeded.
    /// Failures notify as usual; success only updates the surface, so the
    /// triggering action's message stays visible.
    pub async fn refresh<S: FormSurface>(
        &self,
        descriptor: &ActionDescriptor,
        surface: &mut S,
    ) -> Result<Outcome, ActionError> {
        let mut form = FormValues::new();
        self.run(descriptor, &mut form, &AssumeYes, surface, false)
            .await
    }

    async fn run<C, S>(
        &self,
        descriptor: &ActionDescriptor,
        form: &mut FormValues,
        confirm: &C,
        surface: &mut S,
        announce_success: bool,
    ) -> Result<Outcome, ActionError>
    where
        C: Confirm,
        S: FormSurface,
    {
        let action = descriptor.kind.as_str();
        if self.ui.busy.is_busy() {
            tracing::debug!(action, "ignored: another action is in flight");
            return Ok(Outcome::Busy);
        }

        if let Err(rejection) = descriptor.check(form) {
            let message = rejection.message();
            self.ui.notifications.notify(rejection.severity(), &message);
            return Err(ActionError::Validation(message));
        }

        if let Some(prompt) = descriptor.confirmation_prompt {
            if !confirm.confirm(prompt).await {
                tracing::debug!(action, "cancelled at confirmation");
                return Ok(Outcome::Cancelled);
            }
        }

        let Some(_busy) = self.ui.busy.try_acquire() else {
            return Ok(Outcome::Busy);
        };

        let payload = descriptor.payload(form);
        let sent = self
            .client
            .send(descriptor.method, descriptor.endpoint, &payload)
            .await;

        match interpret(descriptor, sent) {
            Ok(success) => {
                if let Some(effect) = descriptor.on_success {
                    if effect == Effect::ResetForm {
                        form.reset();
                    }
                    surface.apply(effect, &success.body);
                }
                if announce_success {
                    self.ui
                        .notifications
                        .notify(Severity::Success, descriptor.success_message);
                }
                Ok(Outcome::Completed(success))
            }
            Err(err) => {
                if let Some(effect) = descriptor.on_failure {
                    surface.apply(effect, &Value::Null);
                }
                let message = match &err {
                    ActionError::Server { status, message } => {
                        tracing::warn!(action, status, %message, "action failed");
                        message.clone()
                    }
                    other => {
                        tracing::error!(action, error = %other, "action failed");
                        NETWORK_ERROR_MESSAGE.to_string()
                    }
                };
                self.ui.notifications.notify(Severity::Error, message);
                Err(err)
            }
        }
    }
}

fn interpret(
    descriptor: &ActionDescriptor,
    sent: Result<ApiResponse, ActionError>,
) -> Result<SuccessPayload, ActionError> {
    let response = sent?;
    let status = response.status;

    if !response.is_success() {
        let message = response
            .error_message()
            .unwrap_or(descriptor.failure_message)
            .to_string();
        return Err(ActionError::Server { status, message });
    }

    let body = match response.body {
        ResponseBody::Empty => Value::Object(serde_json::Map::new()),
        ResponseBody::Json(v) => v,
        ResponseBody::Malformed(e) => {
            return Err(ActionError::Network(format!("malformed response body: {e}")))
        }
    };

    if let Some(key) = descriptor.required_key {
        if body.get(key).map_or(true, Value::is_null) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(descriptor.failure_message)
                .to_string();
            return Err(ActionError::Server { status, message });
        }
    }

    Ok(SuccessPayload { status, body })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
