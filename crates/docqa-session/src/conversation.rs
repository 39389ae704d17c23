//! Conversation history.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub text: String,
    pub sender: Sender,
    /// Source citations shown alongside bot entries.
    pub sources: Option<String>,
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            sources: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            sources: None,
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Option<String>) -> Self {
        self.sources = sources.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Append-only entry sequence.
///
/// The only other mutation is a wholesale replacement, which bumps
/// `generation` so observers can tell it apart from an append.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
    generation: u64,
}

impl Conversation {
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn replace(&mut self, entries: Vec<ConversationEntry>) {
        self.entries = entries;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_bumps_generation_push_does_not() {
        let mut conversation = Conversation::default();
        conversation.push(ConversationEntry::user("q"));
        assert_eq!(conversation.generation(), 0);

        conversation.replace(vec![ConversationEntry::bot("fresh")]);
        assert_eq!(conversation.generation(), 1);
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.last().map(|e| e.sender), Some(Sender::Bot));
    }

    #[test]
    fn test_blank_sources_are_dropped() {
        let entry = ConversationEntry::bot("a").with_sources(Some("  ".to_string()));
        assert_eq!(entry.sources, None);
        let entry = ConversationEntry::bot("a").with_sources(Some("a.pdf".to_string()));
        assert_eq!(entry.sources.as_deref(), Some("a.pdf"));
    }
}
