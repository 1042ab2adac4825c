//! Conversation Engine
//!
//! Per-user state machine for the Price / Calculator menu. Sessions live in
//! a map keyed by user id. A transition is a pure function of the current
//! state and the incoming message; the resulting action is executed after
//! the session lock is released, so a slow price computation for one user
//! never blocks another user's messages.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{parse_amount, InputError};
use crate::ports::{ReplySink, TransportError, UserId};

use super::aggregator::PriceAggregator;
use super::messages::MessageLabels;

pub const START_COMMAND: &str = "/start";
pub const PRICE_TRIGGER: &str = "Price";
pub const CALCULATOR_TRIGGER: &str = "Calculator";

/// Where a user is in the calculator flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingAmount,
}

/// Classified incoming message
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    Start,
    PriceQuery,
    CalculatorEntry,
    Text(&'a str),
}

impl<'a> Input<'a> {
    pub fn classify(text: &'a str) -> Self {
        let trimmed = text.trim();
        // Telegram appends the bot name in groups: /start@my_bot
        if trimmed == START_COMMAND || trimmed.starts_with("/start@") {
            Input::Start
        } else if trimmed == PRICE_TRIGGER {
            Input::PriceQuery
        } else if trimmed == CALCULATOR_TRIGGER {
            Input::CalculatorEntry
        } else {
            Input::Text(text)
        }
    }
}

/// What to do after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowMenu,
    ReportPrice,
    PromptAmount,
    ReportValuation(f64),
    RejectAmount(InputError),
    Ignore,
}

/// Pure state transition
pub fn transition(state: SessionState, input: &Input<'_>) -> (SessionState, Action) {
    match (state, input) {
        (_, Input::Start) => (SessionState::Idle, Action::ShowMenu),
        (state, Input::PriceQuery) => (state, Action::ReportPrice),
        (_, Input::CalculatorEntry) => (SessionState::AwaitingAmount, Action::PromptAmount),
        (SessionState::AwaitingAmount, Input::Text(text)) => match parse_amount(text) {
            Ok(amount) => (SessionState::Idle, Action::ReportValuation(amount)),
            Err(e) => (SessionState::AwaitingAmount, Action::RejectAmount(e)),
        },
        (SessionState::Idle, Input::Text(_)) => (SessionState::Idle, Action::Ignore),
    }
}

/// Session states keyed by user
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<UserId, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, `Idle` for users never seen
    pub async fn state(&self, user: UserId) -> SessionState {
        self.sessions.lock().await.get(&user).copied().unwrap_or_default()
    }

    /// Apply one input to a user's session and return the action to run
    pub async fn apply(&self, user: UserId, input: &Input<'_>) -> Action {
        let mut sessions = self.sessions.lock().await;
        let state = sessions.entry(user).or_default();
        let (next, action) = transition(*state, input);
        if *state != next {
            tracing::debug!("User {} session {:?} -> {:?}", user, *state, next);
        }
        *state = next;
        action
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

/// Drives the menu and calculator for every user
#[derive(Clone)]
pub struct ConversationEngine {
    aggregator: PriceAggregator,
    labels: MessageLabels,
    sessions: SessionStore,
}

impl ConversationEngine {
    pub fn new(aggregator: PriceAggregator, labels: MessageLabels) -> Self {
        Self {
            aggregator,
            labels,
            sessions: SessionStore::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one incoming text message from `user`, replying through `sink`
    pub async fn handle(
        &self,
        user: UserId,
        text: &str,
        sink: &dyn ReplySink,
    ) -> Result<(), TransportError> {
        let input = Input::classify(text);
        let action = self.sessions.apply(user, &input).await;

        match action {
            Action::ShowMenu => {
                tracing::info!("User {} pressed /start", user);
                sink.send(self.labels.greeting()).await
            }
            Action::ReportPrice => {
                tracing::info!("User {} requested the price", user);
                sink.send(self.labels.computing_notice()).await?;
                let reply = match self.aggregator.compute_price().await {
                    Ok(snapshot) => self.labels.snapshot(&snapshot, self.aggregator.wallets()),
                    Err(e) => {
                        tracing::error!("Price calculation for user {} failed: {}", user, e);
                        self.labels.failure(&e)
                    }
                };
                sink.send(reply).await
            }
            Action::PromptAmount => {
                tracing::info!("User {} opened the calculator", user);
                sink.send(self.labels.amount_prompt()).await
            }
            Action::ReportValuation(amount) => {
                tracing::info!("User {} entered amount {}", user, amount);
                sink.send(self.labels.computing_notice()).await?;
                let reply = match self.aggregator.compute_price().await {
                    Ok(snapshot) => self.labels.valuation(&snapshot.value_of(amount)),
                    Err(e) => {
                        tracing::error!("Valuation for user {} failed: {}", user, e);
                        self.labels.failure(&e)
                    }
                };
                sink.send(reply).await
            }
            Action::RejectAmount(e) => {
                tracing::debug!("User {} sent invalid amount: {}", user, e);
                sink.send(self.labels.invalid_amount()).await
            }
            Action::Ignore => Ok(()),
        }
    }
}
