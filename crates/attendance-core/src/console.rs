use crate::action::{ActionKind, Effect};
use crate::client::ApiClient;
use crate::config::ConsoleConfig;
use crate::confirm::Confirm;
use crate::controller::{FormActionController, Outcome};
use crate::error::{ActionError, Result};
use crate::form::FormValues;
use crate::ui_state::UiState;
use crate::view::ConsoleView;

/// One admin session: backend client, shared UI state and the rendered view.
#[derive(Debug)]
pub struct AdminConsole {
    client: ApiClient,
    ui: UiState,
    view: ConsoleView,
}

impl AdminConsole {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let ui = UiState::from_config(&config);
        let client = ApiClient::new(config)?;
        Ok(Self::with_parts(client, ui))
    }

    pub fn with_parts(client: ApiClient, ui: UiState) -> Self {
        Self {
            client,
            ui,
            view: ConsoleView::new(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    pub fn config(&self) -> &ConsoleConfig {
        self.client.config()
    }

    /// Run `kind` with `form`, then any follow-up refresh its success asks for.
    ///
    /// A failed follow-up has already notified; it does not change the
    /// outcome of the action that triggered it.
    pub async fn run<C: Confirm>(
        &mut self,
        kind: ActionKind,
        form: &mut FormValues,
        confirm: &C,
    ) -> std::result::Result<Outcome, ActionError> {
        let descriptor = kind.descriptor();
        let ctl = FormActionController::new(&self.client, &self.ui);
        let outcome = ctl
            .execute(descriptor, form, confirm, &mut self.view)
            .await?;

        if let (Outcome::Completed(_), Some(Effect::Refresh(next))) =
            (&outcome, descriptor.on_success)
        {
            tracing::debug!(action = kind.as_str(), follow_up = next.as_str(), "refreshing");
            if let Err(e) = ctl.refresh(next.descriptor(), &mut self.view).await {
                tracing::warn!(follow_up = next.as_str(), error = %e, "refresh failed");
            }
        }

        Ok(outcome)
    }
}
