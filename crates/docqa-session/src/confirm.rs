//! Two-phase confirmation for the destructive reset action.
//!
//! ```text
//! Idle --request--> Pending --confirm--> Idle (reset runs)
//!                   Pending --cancel---> Idle
//! ```
//!
//! Confirm and cancel are ignored while idle, so a late confirmation can
//! never trigger a second reset.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationGate {
    #[default]
    Idle,
    Pending,
}

impl ConfirmationGate {
    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmationGate::Pending)
    }

    /// Opens the gate. Returns false if it was already pending.
    pub(crate) fn request(&mut self) -> bool {
        let opened = !self.is_pending();
        *self = ConfirmationGate::Pending;
        opened
    }

    /// Closes a pending gate. Returns true when the reset should run.
    pub(crate) fn confirm(&mut self) -> bool {
        self.close()
    }

    /// Closes a pending gate without side effects.
    pub(crate) fn cancel(&mut self) -> bool {
        self.close()
    }

    fn close(&mut self) -> bool {
        let was_pending = self.is_pending();
        *self = ConfirmationGate::Idle;
        was_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_confirm() {
        let mut gate = ConfirmationGate::default();
        assert!(!gate.is_pending());

        assert!(gate.request());
        assert!(gate.is_pending());

        assert!(gate.confirm());
        assert_eq!(gate, ConfirmationGate::Idle);
    }

    #[test]
    fn test_request_then_cancel() {
        let mut gate = ConfirmationGate::default();
        gate.request();
        assert!(gate.cancel());
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_idle_ignores_confirm_and_cancel() {
        let mut gate = ConfirmationGate::default();
        assert!(!gate.confirm());
        assert!(!gate.cancel());
        assert_eq!(gate, ConfirmationGate::Idle);
    }

    #[test]
    fn test_repeated_request_stays_pending() {
        let mut gate = ConfirmationGate::default();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(gate.is_pending());

        assert!(gate.confirm());
        assert!(!gate.confirm());
    }
}
