use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default, Clone)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id the next task will get. Every task issued so far is below it.
    pub fn peek(&self) -> TaskId {
        TaskId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Upload,
    Ask,
    Reset,
}

/// Settlement of a spawned request.
///
/// `epoch` is the session epoch current when the request was issued.
#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub epoch: u64,
    pub result: E,
}

/// In-flight requests of one kind (stored in `SessionState`, mutated only by
/// the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    in_flight: BTreeSet<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn on_started(&mut self, id: TaskId) {
        self.in_flight.insert(id);
    }

    /// Removes `id`; returns false if it was not in flight.
    pub fn finish(&mut self, id: TaskId) -> bool {
        self.in_flight.remove(&id)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub upload: TaskState,
    pub ask: TaskState,
    pub reset: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Upload => &mut self.upload,
            TaskKind::Ask => &mut self.ask,
            TaskKind::Reset => &mut self.reset,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.upload.is_running() || self.ask.is_running() || self.reset.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_state_tracks_overlapping_requests() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();
        let first = seq.next_id();
        let second = seq.next_id();
        assert_ne!(first, second);

        state.on_started(first);
        state.on_started(second);
        assert_eq!(state.in_flight(), 2);

        assert!(state.finish(second));
        assert!(state.is_running());
        assert!(state.finish(first));
        assert!(!state.is_running());
        assert!(!state.finish(first));
    }
}
