use super::types::{TaskId, UploadTask};

/// The observable set of in-flight uploads, in the order they started.
#[derive(Debug, Clone, Default)]
pub struct UploadBoard {
    tasks: Vec<UploadTask>,
}

impl UploadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: TaskId, file_name: impl Into<String>) {
        if self.get(id).is_some() {
            return;
        }
        self.tasks.push(UploadTask {
            id,
            file_name: file_name.into(),
            progress: 0,
        });
    }

    /// Records a new sample. Lower values than the current one are ignored
    /// and unknown ids are not re-added.
    pub fn update(&mut self, id: TaskId, progress: u8) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.progress = task.progress.max(progress.min(100));
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<UploadTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&UploadTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mean progress across every in-flight upload, as a fraction.
    pub fn overall_fraction(&self) -> f32 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.tasks.iter().map(|t| t.progress as u32).sum();
        sum as f32 / (self.tasks.len() as f32 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_never_moves_backwards() {
        let mut board = UploadBoard::new();
        let id = TaskId(1);
        board.register(id, "a.txt");

        assert!(board.update(id, 30));
        assert!(board.update(id, 20));
        assert_eq!(board.get(id).unwrap().progress, 30);
        board.update(id, 250);
        assert_eq!(board.get(id).unwrap().progress, 100);
    }

    #[test]
    fn unknown_ids_are_not_resurrected() {
        let mut board = UploadBoard::new();
        board.register(TaskId(1), "a.txt");
        assert!(board.remove(TaskId(1)).is_some());

        assert!(!board.update(TaskId(1), 100));
        assert!(board.is_empty());
        assert!(board.remove(TaskId(1)).is_none());
    }

    #[test]
    fn same_name_different_ids() {
        let mut board = UploadBoard::new();
        board.register(TaskId(1), "dup.txt");
        board.register(TaskId(2), "dup.txt");
        board.update(TaskId(2), 50);

        assert_eq!(board.len(), 2);
        assert_eq!(board.get(TaskId(1)).unwrap().progress, 0);
        assert_eq!(board.get(TaskId(2)).unwrap().progress, 50);
        assert!((board.overall_fraction() - 0.25).abs() < f32::EPSILON);
    }
}
