#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use uuid::Uuid;

/// A dashboard task. Kept in memory only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
}

/// Ordered placeholder task list shown on the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    pub items: Vec<Task>,
}

impl TaskList {
    /// Append a task; blank titles are ignored.
    pub fn add(&mut self, title: &str) -> Option<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.items.push(Task { id, title: title.to_owned(), done: false });
        Some(id)
    }

    pub fn toggle(&mut self, id: Uuid) {
        if let Some(task) = self.items.iter_mut().find(|t| t.id == id) {
            task.done = !task.done;
        }
    }

    pub fn remove(&mut self, id: Uuid) {
        self.items.retain(|t| t.id != id);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }
}
