//! Undo/redo functionality

use super::SceneState;

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(std::mem::replace(&mut self.scene, prev));
        self.version += 1;
        true
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(std::mem::replace(&mut self.scene, next));
        self.version += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_undo_redo_drag() {
        let mut s = SceneState::default();
        s.begin_drag();
        s.apply_translate_delta("sphere", Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(s.get_node("sphere").unwrap().transform.position[0], 1.0);

        assert!(s.undo());
        assert_eq!(s.get_node("sphere").unwrap().transform.position[0], 0.0);
        assert!(s.can_redo());

        assert!(s.redo());
        assert_eq!(s.get_node("sphere").unwrap().transform.position[0], 1.0);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut s = SceneState::default();
        let v = s.version();
        assert!(!s.undo());
        assert_eq!(s.version(), v);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut s = SceneState::default();
        s.begin_drag();
        s.apply_translate_delta("sphere", Vec3::X);
        s.undo();
        s.begin_drag();
        assert!(!s.can_redo());
    }

    #[test]
    fn test_undo_stack_capped() {
        let mut s = SceneState::default();
        for _ in 0..150 {
            s.begin_drag();
        }
        assert_eq!(s.undo_stack.len(), 100);
    }
}
