//! Incremental rendering of session state.
//!
//! The view remembers what it has already shown (entry count, conversation
//! generation, notice stamps, busy flags) and only prints the difference on
//! each `render`.

use std::io::{self, Write};

use docqa_session::{ConversationEntry, Notice, OperationFlags, Sender, SessionState, Tone};

pub const CONFIRM_PROMPT: &str = "Reset the session? All uploaded documents and history will be \
                                  cleared. Type /yes to confirm or /no to cancel.";

pub struct ChatView<W: Write> {
    out: W,
    generation: u64,
    printed: usize,
    upload_seq: u64,
    answer_seq: u64,
    flags: OperationFlags,
    confirming: bool,
}

impl<W: Write> ChatView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            generation: 0,
            printed: 0,
            upload_seq: 0,
            answer_seq: 0,
            flags: OperationFlags::default(),
            confirming: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints whatever changed since the last call.
    pub fn render(&mut self, state: &SessionState) -> io::Result<()> {
        self.render_flags(state.flags())?;

        let conversation = &state.conversation;
        if conversation.generation() != self.generation {
            self.generation = conversation.generation();
            self.printed = 0;
            writeln!(self.out)?;
        }
        for entry in conversation.entries().iter().skip(self.printed) {
            self.write_entry(entry)?;
        }
        self.printed = conversation.len();

        if let Some(notice) = fresh(state.upload_message.as_ref(), &mut self.upload_seq) {
            self.write_notice(notice)?;
        }
        // A successful answer is already visible as a conversation entry.
        if let Some(notice) = fresh(state.answer.as_ref(), &mut self.answer_seq)
            && notice.is_error()
        {
            self.write_notice(notice)?;
        }

        let confirming = state.confirmation.is_pending();
        if confirming && !self.confirming {
            writeln!(self.out, "{CONFIRM_PROMPT}")?;
        }
        self.confirming = confirming;

        self.out.flush()
    }

    /// Writes a line outside the state diff (command output, hints).
    pub fn line(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn render_flags(&mut self, flags: OperationFlags) -> io::Result<()> {
        if flags.uploading && !self.flags.uploading {
            writeln!(self.out, "Uploading...")?;
        }
        if flags.asking && !self.flags.asking {
            writeln!(self.out, "Thinking...")?;
        }
        if flags.resetting && !self.flags.resetting {
            writeln!(self.out, "Resetting...")?;
        }
        self.flags = flags;
        Ok(())
    }

    fn write_entry(&mut self, entry: &ConversationEntry) -> io::Result<()> {
        let who = match entry.sender {
            Sender::User => "You",
            Sender::Bot => "Bot",
        };
        writeln!(self.out, "{who}: {}", entry.text)?;
        if let Some(sources) = &entry.sources {
            writeln!(self.out, "     Sources: {sources}")?;
        }
        Ok(())
    }

    fn write_notice(&mut self, notice: &Notice) -> io::Result<()> {
        match notice.tone {
            Tone::Success => writeln!(self.out, "{}", notice.text),
            Tone::Error => writeln!(self.out, "Error: {}", notice.text),
        }
    }
}

/// Returns the notice if its stamp is newer than `seen`, advancing `seen`.
fn fresh<'a>(notice: Option<&'a Notice>, seen: &mut u64) -> Option<&'a Notice> {
    let notice = notice?;
    if notice.seq <= *seen {
        return None;
    }
    *seen = notice.seq;
    Some(notice)
}

#[cfg(test)]
mod tests {
    use docqa_core::config::SessionConfig;
    use docqa_session::update::update;
    use docqa_session::{SessionEffect, SessionEvent, select_pdfs};

    use super::*;

    fn output(view: ChatView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_render_prints_each_change_once() {
        let mut state = SessionState::new(SessionConfig::default());
        let mut view = ChatView::new(Vec::new());

        update(&mut state, SessionEvent::UploadRequested);
        view.render(&state).unwrap();
        view.render(&state).unwrap();

        let out = output(view);
        assert_eq!(out.matches("Error: Please select at least one PDF file").count(), 1);
    }

    #[test]
    fn test_render_shows_flags_and_confirm_prompt() {
        let mut state = SessionState::new(SessionConfig::default());
        let mut view = ChatView::new(Vec::new());

        let selection = select_pdfs(["a.pdf"]);
        update(&mut state, SessionEvent::FilesSelected(selection.accepted));
        let effects = update(&mut state, SessionEvent::UploadRequested);
        assert!(matches!(effects.as_slice(), [SessionEffect::Upload { .. }]));
        update(&mut state, SessionEvent::ResetRequested);
        view.render(&state).unwrap();

        let out = output(view);
        assert!(out.contains("Uploading..."));
        assert!(out.contains(CONFIRM_PROMPT));
    }

    #[test]
    fn test_replacement_reprints_from_start() {
        let mut state = SessionState::new(SessionConfig::default());
        let mut view = ChatView::new(Vec::new());

        update(&mut state, SessionEvent::ResetRequested);
        update(&mut state, SessionEvent::ResetConfirmed);
        view.render(&state).unwrap();
        update(&mut state, SessionEvent::ResetRequested);
        update(&mut state, SessionEvent::ResetConfirmed);
        view.render(&state).unwrap();

        let out = output(view);
        assert_eq!(out.matches("Bot: Session reset.").count(), 2);
    }

    #[test]
    fn test_fresh_advances_stamp() {
        let notice = Notice {
            seq: 3,
            tone: Tone::Success,
            text: "ok".to_string(),
        };
        let mut seen = 0;
        assert!(fresh(Some(&notice), &mut seen).is_some());
        assert_eq!(seen, 3);
        assert!(fresh(Some(&notice), &mut seen).is_none());
        assert!(fresh(None, &mut seen).is_none());
    }
}
