/// Generation gate for debounced candidates.
///
/// Every `arm` supersedes the previous candidate. The timer that fires for an
/// older generation finds nothing to settle, so only the last candidate
/// before a pause is ever released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceGate<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for DebounceGate<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> DebounceGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `candidate` and returns the generation its timer must report.
    pub fn arm(&mut self, candidate: T) -> u64 {
        self.generation += 1;
        self.pending = Some(candidate);
        self.generation
    }

    /// Releases the pending candidate if `generation` is the newest one.
    pub fn elapsed(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drops the pending candidate. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
