//! Session state.
//!
//! ```text
//! SessionState
//! ├── session: Session              (server-issued id, if any)
//! ├── selected_files                (next upload's documents)
//! ├── conversation: Conversation    (entries + replacement generation)
//! ├── confirmation: ConfirmationGate
//! ├── query                         (draft for the next ask)
//! ├── upload_message / answer       (feedback notices)
//! ├── tasks: Tasks                  (in-flight requests per kind)
//! ├── task_seq: TaskSeq
//! ├── epoch                         (bumped when a session starts or ends)
//! └── upload_watermark              (uploads issued before it are superseded)
//! ```
//!
//! Only the reducer in [`crate::update`] mutates this.

use docqa_core::config::SessionConfig;
use docqa_core::transport::SessionId;

use crate::common::{TaskId, TaskSeq, Tasks};
use crate::confirm::ConfirmationGate;
use crate::conversation::Conversation;
use crate::files::SelectedFile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub id: Option<SessionId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// A feedback message.
///
/// `seq` increases with every notice so two identical messages in a row are
/// still distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }
}

/// Busy indicators derived from the in-flight task sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationFlags {
    pub uploading: bool,
    pub asking: bool,
    pub resetting: bool,
}

/// Which intents are currently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub can_select: bool,
    pub can_upload: bool,
    pub can_ask: bool,
    pub can_request_reset: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub session: Session,
    pub selected_files: Vec<SelectedFile>,
    pub conversation: Conversation,
    pub confirmation: ConfirmationGate,
    pub query: String,
    pub upload_message: Option<Notice>,
    pub answer: Option<Notice>,
    pub tasks: Tasks,
    pub task_seq: TaskSeq,
    pub epoch: u64,
    /// Upload settlements with a lower task id lost to a newer upload or a
    /// reset.
    pub upload_watermark: TaskId,
    pub settings: SessionConfig,
    notice_seq: u64,
}

impl SessionState {
    pub fn new(settings: SessionConfig) -> Self {
        Self {
            session: Session::default(),
            selected_files: Vec::new(),
            conversation: Conversation::default(),
            confirmation: ConfirmationGate::default(),
            query: String::new(),
            upload_message: None,
            answer: None,
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            epoch: 0,
            upload_watermark: TaskId::default(),
            settings,
            notice_seq: 0,
        }
    }

    /// Starts from an existing server session (used by one-shot commands).
    pub fn with_session(settings: SessionConfig, id: SessionId) -> Self {
        let mut state = Self::new(settings);
        state.session.id = Some(id);
        state
    }

    pub fn flags(&self) -> OperationFlags {
        OperationFlags {
            uploading: self.tasks.upload.is_running(),
            asking: self.tasks.ask.is_running(),
            resetting: self.tasks.reset.is_running(),
        }
    }

    /// True while any request is waiting to settle.
    pub fn is_busy(&self) -> bool {
        self.tasks.is_any_running()
    }

    /// Intents accepted right now. Everything is open unless
    /// `guard_controls` is set.
    pub fn controls(&self) -> Controls {
        if !self.settings.guard_controls {
            return Controls {
                can_select: true,
                can_upload: true,
                can_ask: true,
                can_request_reset: true,
            };
        }

        let flags = self.flags();
        let pending = self.confirmation.is_pending();
        Controls {
            can_select: !flags.uploading,
            can_upload: !flags.uploading && !pending,
            can_ask: !flags.uploading && !flags.asking && !pending,
            can_request_reset: !flags.uploading,
        }
    }

    pub(crate) fn notice(&mut self, tone: Tone, text: impl Into<String>) -> Notice {
        self.notice_seq += 1;
        Notice {
            seq: self.notice_seq,
            tone,
            text: text.into(),
        }
    }
}
