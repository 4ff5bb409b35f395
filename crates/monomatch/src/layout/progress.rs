//! Progress reporting for card renders and deck batches.
//!
//! A [`ProgressSink`] receives cumulative completion fractions in `[0, 1]`, never
//! decreasing, ending with `1.0` on success. Sinks must not block.

/// Receives progress updates.
pub trait ProgressSink {
    fn advance(&mut self, fraction: f32);
}

/// A no-op progress sink.
impl ProgressSink for () {
    #[inline]
    fn advance(&mut self, _fraction: f32) {}
}

/// A progress sink that forwards to a user-provided closure.
pub struct FnProgress<F>
where
    F: FnMut(f32),
{
    f: F,
}

impl<F> FnProgress<F>
where
    F: FnMut(f32),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ProgressSink for FnProgress<F>
where
    F: FnMut(f32),
{
    #[inline]
    fn advance(&mut self, fraction: f32) {
        (self.f)(fraction);
    }
}

/// A progress sink that records every reported fraction.
#[derive(Debug, Default, Clone)]
pub struct VecProgress {
    fractions: Vec<f32>,
}

impl VecProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.fractions
    }

    pub fn last(&self) -> Option<f32> {
        self.fractions.last().copied()
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }
}

impl ProgressSink for VecProgress {
    #[inline]
    fn advance(&mut self, fraction: f32) {
        self.fractions.push(fraction);
    }
}

/// Accumulates step sizes into clamped cumulative fractions.
pub(crate) struct ProgressTracker<'a> {
    sink: &'a mut dyn ProgressSink,
    done: f32,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self { sink, done: 0.0 }
    }

    pub(crate) fn step(&mut self, delta: f32) {
        self.done = (self.done + delta.max(0.0)).min(1.0);
        self.sink.advance(self.done);
    }

    pub(crate) fn finish(&mut self) {
        self.done = 1.0;
        self.sink.advance(1.0);
    }
}
