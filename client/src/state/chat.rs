//! Chat message store and per-submission exchange records.
//!
//! DESIGN
//! ======
//! The message sequence is append-only: fields are private and `append` is
//! the only mutation. Exchange records track each submission from `Pending`
//! to a terminal status so the UI can render a pending indicator and tests
//! can observe outcomes without a network.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update};

/// Who authored a message. Discriminants are part of the display contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sender {
    Bot = 0,
    User = 1,
}

impl Sender {
    /// Name shown above the message bubble.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bot => "Bot",
            Self::User => "User",
        }
    }
}

/// Store-assigned identifier of one submission.
pub type ExchangeId = u64;

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Position in the sequence at append time.
    pub seq: usize,
    pub sender: Sender,
    pub text: String,
    /// Submission this message belongs to, if appended by the exchange client.
    pub exchange_id: Option<ExchangeId>,
}

impl ChatMessage {
    pub fn display_name(&self) -> &'static str {
        self.sender.display_name()
    }
}

/// Lifecycle of one submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExchangeStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl ExchangeStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Record of one request/response cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub id: ExchangeId,
    /// Correlation identifier sent in the envelope.
    pub correlation_id: String,
    pub status: ExchangeStatus,
    /// Short failure description, set only when `status` is `Failed`.
    pub error: Option<String>,
}

/// Message store for the chat widget, provided via context as
/// `RwSignal<ChatState>`.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    exchanges: Vec<Exchange>,
    next_exchange_id: ExchangeId,
    last_resolved: Option<ExchangeId>,
}

impl ChatState {
    /// Current full message sequence, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message to the end of the sequence and return its position.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> usize {
        self.push(sender, text.into(), None)
    }

    pub(crate) fn append_for(&mut self, exchange_id: ExchangeId, sender: Sender, text: impl Into<String>) -> usize {
        self.push(sender, text.into(), Some(exchange_id))
    }

    fn push(&mut self, sender: Sender, text: String, exchange_id: Option<ExchangeId>) -> usize {
        let seq = self.messages.len();
        self.messages.push(ChatMessage { seq, sender, text, exchange_id });
        seq
    }

    /// Open a new `Pending` exchange record.
    pub fn open_exchange(&mut self, correlation_id: impl Into<String>) -> ExchangeId {
        let id = self.next_exchange_id;
        self.next_exchange_id += 1;
        self.exchanges.push(Exchange {
            id,
            correlation_id: correlation_id.into(),
            status: ExchangeStatus::Pending,
            error: None,
        });
        id
    }

    /// Move a pending exchange to its terminal status.
    ///
    /// Returns `false` if the exchange is unknown or already resolved.
    pub fn resolve_exchange(&mut self, id: ExchangeId, outcome: Result<(), String>) -> bool {
        let Some(exchange) = self.exchanges.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if exchange.status != ExchangeStatus::Pending {
            return false;
        }
        match outcome {
            Ok(()) => exchange.status = ExchangeStatus::Succeeded,
            Err(error) => {
                exchange.status = ExchangeStatus::Failed;
                exchange.error = Some(error);
            }
        }
        self.last_resolved = Some(id);
        true
    }

    pub fn exchange(&self, id: ExchangeId) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.id == id)
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn pending_count(&self) -> usize {
        self.exchanges
            .iter()
            .filter(|e| e.status == ExchangeStatus::Pending)
            .count()
    }

    /// Aggregate widget status: `Idle` before the first submission, `Pending`
    /// while anything is in flight, else the outcome of the exchange that
    /// resolved last (replies can arrive out of submission order).
    pub fn status(&self) -> ExchangeStatus {
        if self.pending_count() > 0 {
            return ExchangeStatus::Pending;
        }
        self.last_resolved
            .and_then(|id| self.exchange(id))
            .map_or(ExchangeStatus::Idle, |e| e.status)
    }
}

/// Mutable access to a [`ChatState`] regardless of where it lives.
///
/// The UI holds the store in a reactive signal; tests hold it in a plain
/// `Rc<RefCell<_>>`. Returns `None` when the store is gone (disposed signal).
pub trait StoreHandle {
    fn update_store<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R>;
}

impl StoreHandle for RwSignal<ChatState> {
    fn update_store<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl StoreHandle for Rc<RefCell<ChatState>> {
    fn update_store<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
