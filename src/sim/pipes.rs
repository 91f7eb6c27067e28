//! Pipe obstacles
//!
//! Pipes live in a fixed-capacity slot arena. The active pipes are always
//! `slots[..len]`, ordered front (leftmost) to back. Removing the front pipe
//! shifts the rest down, appending writes into the next free slot, so the
//! collection never reallocates during a run.

use super::state::Layout;
use crate::consts::{PIPE_GAP, PIPE_WIDTH};

/// Maximum pipes alive at once
pub const MAX_PIPES: usize = 4;

/// A pipe pair, positioned by the top-left corner of its upper sprite
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pipe {
    /// Left edge (px)
    pub x: f32,
    /// Top of the upper pipe; always <= 0 for spawned pipes
    pub y: f32,
}

impl Pipe {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Right edge of the pipe
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// True once the whole pipe has scrolled past the left boundary
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() <= 0.0
    }

    /// Lower edge of the upper pipe (top of the gap)
    #[inline]
    pub fn gap_top(&self, layout: &Layout) -> f32 {
        self.y + layout.pipe_height
    }

    /// Upper edge of the lower pipe (bottom of the gap)
    #[inline]
    pub fn gap_bottom(&self, layout: &Layout) -> f32 {
        self.gap_top(layout) + PIPE_GAP
    }
}

/// Ordered pipe collection backed by fixed slots
#[derive(Debug, Clone)]
pub struct PipeField {
    slots: [Pipe; MAX_PIPES],
    len: usize,
}

// Slots past `len` are stale
impl PartialEq for PipeField {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Default for PipeField {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeField {
    /// Empty field
    pub const fn new() -> Self {
        Self {
            slots: [Pipe::new(0.0, 0.0); MAX_PIPES],
            len: 0,
        }
    }

    /// Field holding a single pipe
    pub fn with_pipe(pipe: Pipe) -> Self {
        let mut field = Self::new();
        field.push(pipe);
        field
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active pipes, front to back
    pub fn as_slice(&self) -> &[Pipe] {
        &self.slots[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pipe> {
        self.as_slice().iter()
    }

    /// Leftmost pipe
    pub fn front(&self) -> Option<&Pipe> {
        self.as_slice().first()
    }

    /// Append a pipe at the back. Returns false if every slot is taken.
    pub fn push(&mut self, pipe: Pipe) -> bool {
        if self.len == MAX_PIPES {
            log::warn!("Pipe field full ({} slots), dropping pipe at x={}", MAX_PIPES, pipe.x);
            return false;
        }
        self.slots[self.len] = pipe;
        self.len += 1;
        true
    }

    /// Remove the leftmost pipe, keeping the remaining order
    pub fn pop_front(&mut self) -> Option<Pipe> {
        if self.len == 0 {
            return None;
        }
        let front = self.slots[0];
        self.slots.copy_within(1..self.len, 0);
        self.len -= 1;
        Some(front)
    }

    /// Move every active pipe left by `dx`
    pub fn scroll(&mut self, dx: f32) {
        for pipe in &mut self.slots[..self.len] {
            pipe.x -= dx;
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<'a> IntoIterator for &'a PipeField {
    type Item = &'a Pipe;
    type IntoIter = std::slice::Iter<'a, Pipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_front_keeps_order() {
        let mut field = PipeField::new();
        field.push(Pipe::new(10.0, -5.0));
        field.push(Pipe::new(150.0, -20.0));
        field.push(Pipe::new(290.0, -40.0));

        let front = field.pop_front().unwrap();
        assert_eq!(front, Pipe::new(10.0, -5.0));
        assert_eq!(field.as_slice(), &[Pipe::new(150.0, -20.0), Pipe::new(290.0, -40.0)]);
    }

    #[test]
    fn test_push_full_field_is_rejected() {
        let mut field = PipeField::new();
        for i in 0..MAX_PIPES {
            assert!(field.push(Pipe::new(i as f32 * 100.0, 0.0)));
        }
        assert!(!field.push(Pipe::new(999.0, 0.0)));
        assert_eq!(field.len(), MAX_PIPES);
    }

    #[test]
    fn test_slots_reused_after_pop() {
        let mut field = PipeField::with_pipe(Pipe::new(0.0, 0.0));
        for i in 0..20 {
            field.pop_front();
            assert!(field.push(Pipe::new(i as f32, 0.0)));
            assert_eq!(field.len(), 1);
        }
        assert_eq!(field.front(), Some(&Pipe::new(19.0, 0.0)));
    }

    #[test]
    fn test_offscreen_boundary() {
        // Trailing edge exactly on x=0 counts as gone
        assert!(Pipe::new(-PIPE_WIDTH, 0.0).is_offscreen());
        assert!(!Pipe::new(-PIPE_WIDTH + 1.0, 0.0).is_offscreen());
    }

    #[test]
    fn test_gap_edges() {
        let layout = Layout::default();
        let pipe = Pipe::new(100.0, -50.0);
        assert_eq!(pipe.gap_top(&layout), -50.0 + layout.pipe_height);
        assert_eq!(pipe.gap_bottom(&layout), -50.0 + layout.pipe_height + PIPE_GAP);
    }
}
