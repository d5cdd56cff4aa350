//! Task ID generation

use crate::domain::TaskId;

/// Source of fresh task IDs
pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

/// Time-ordered UUIDv7 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> TaskId {
        TaskId::generate()
    }
}

/// Deterministic `{prefix}-{n}` identifiers, for tests and scripted sessions
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    prefix: String,
    next: u64,
}

impl SequenceGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequenceGenerator {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::from(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> TaskId,
{
    fn next_id(&mut self) -> TaskId {
        self()
    }
}
