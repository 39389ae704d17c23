//! Session controller for the document Q&A client.
//!
//! Elm-style: [`update::update`] is a pure reducer over [`SessionState`] and
//! [`SessionEvent`]s, returning [`SessionEffect`]s. The [`SessionRuntime`]
//! executes those effects against a [`docqa_core::transport::Transport`] and
//! feeds each settlement back through the reducer.

pub mod common;
pub mod confirm;
pub mod conversation;
pub mod effects;
pub mod events;
pub mod files;
pub mod runtime;
pub mod state;
pub mod update;

pub use confirm::ConfirmationGate;
pub use conversation::{Conversation, ConversationEntry, Sender};
pub use effects::SessionEffect;
pub use events::{SessionEvent, TaskOutcome};
pub use files::{SelectedFile, Selection, select_pdfs};
pub use runtime::SessionRuntime;
pub use state::{Controls, Notice, OperationFlags, SessionState, Tone};
pub use update::ValidationError;
