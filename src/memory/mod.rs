/// Recycles the per-step scratch buffers of the solver.
///
/// `allocate` hands out a cleared buffer with at least the requested capacity
/// and `release` returns it to the pool, so steady-state stepping performs no
/// heap allocation. Buffers live for exactly one physics step.
pub struct FramePool<T> {
    free: Vec<Vec<T>>,
}

impl<T> FramePool<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { free: Vec::new() }
    }

    #[must_use]
    pub fn allocate(&mut self, capacity: usize) -> Vec<T> {
        match self.free.pop() {
            Some(mut buf) => {
                buf.clear();
                buf.reserve(capacity);
                buf
            }
            None => Vec::with_capacity(capacity),
        }
    }

    pub fn release(&mut self, buf: Vec<T>) {
        self.free.push(buf);
    }
}

impl<T> Default for FramePool<T> {
    fn default() -> Self {
        Self::new()
    }
}
