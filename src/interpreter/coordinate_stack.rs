use crate::{
    error::{EngineError, EngineResult},
    matrix::{self, Matrix},
};

/// Nested coordinate systems of one frame.
///
/// The active transform lives outside the saved entries, so the stack can
/// never be empty. Entries are plain arrays; `push` stores a copy, never a
/// reference to the active transform.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateStack {
    current: Matrix,
    saved: Vec<Matrix>,
}

impl CoordinateStack {
    pub fn new() -> Self {
        Self { current: matrix::identity(), saved: Vec::new() }
    }

    pub fn peek(&self) -> &Matrix {
        &self.current
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    pub fn pop(&mut self) -> EngineResult<()> {
        self.current = self.saved.pop().ok_or(EngineError::StackUnderflow)?;
        Ok(())
    }

    /// Replaces the top with `top * transformation`.
    pub fn apply_transformation(&mut self, transformation: Matrix) {
        self.current = matrix::compose(&self.current, &transformation);
    }

    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Rotation, rotation, translation};

    #[test]
    fn starts_as_a_single_identity() {
        let stack = CoordinateStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.peek(), matrix::identity());
    }

    #[test]
    fn push_then_pop_restores_the_previous_top() {
        let mut stack = CoordinateStack::new();
        stack.apply_transformation(translation(1.0, 2.0, 3.0));
        let before = stack.clone();

        stack.push();
        stack.apply_transformation(rotation(Rotation::Y, 45.0));
        stack.pop().unwrap();

        assert_eq!(stack, before);
    }

    #[test]
    fn transformations_replace_the_top() {
        let mut stack = CoordinateStack::new();
        stack.apply_transformation(translation(5.0, 0.0, 0.0));
        assert_eq!(stack.depth(), 1);

        stack.push();
        assert_eq!(*stack.peek(), translation(5.0, 0.0, 0.0));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn transformations_accumulate() {
        let mut stack = CoordinateStack::new();
        stack.apply_transformation(translation(5.0, 0.0, 0.0));
        stack.apply_transformation(translation(0.0, 2.0, 0.0));
        assert_eq!(*stack.peek(), translation(5.0, 2.0, 0.0));
    }

    #[test]
    fn popping_the_last_entry_underflows() {
        let mut stack = CoordinateStack::new();
        assert!(matches!(stack.pop(), Err(EngineError::StackUnderflow)));

        stack.push();
        stack.pop().unwrap();
        assert!(matches!(stack.pop(), Err(EngineError::StackUnderflow)));
        assert_eq!(*stack.peek(), matrix::identity());
    }
}
