//! Local task-list state. Every operation talks to the server first and
//! mutates local state only after a successful response; failures are
//! logged and leave the list untouched.

use crate::api::{ApiError, Task, TaskPatch, TodoApi};

#[derive(Debug, Clone)]
pub struct EditState {
    pub id: i32,
    pub draft: String,
}

pub struct TaskList<A> {
    api: A,
    tasks: Vec<Task>,
    draft: String,
    editing: Option<EditState>,
    busy: bool,
}

impl<A: TodoApi> TaskList<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            draft: String::new(),
            editing: None,
            busy: false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    /// Replace the whole list from the server.
    pub async fn refresh(&mut self) {
        match self.api.fetch_all().await {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => log_error("Error fetching todos", &e),
        }
    }

    /// Create a task from the current draft. A blank draft is a no-op and
    /// sends nothing.
    pub async fn submit(&mut self) {
        if self.draft.trim().is_empty() {
            return;
        }

        self.busy = true;
        match self.api.create(&self.draft).await {
            Ok(task) => {
                self.tasks.insert(0, task);
                self.draft.clear();
            }
            Err(e) => log_error("Error adding todo", &e),
        }
        self.busy = false;
    }

    /// Flip a task's completed flag, replacing it in place on success.
    pub async fn toggle(&mut self, id: i32) {
        let Some(current) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };

        let patch = TaskPatch {
            completed: Some(!current.completed),
            ..Default::default()
        };

        match self.api.update(id, patch).await {
            Ok(updated) => self.replace(updated),
            Err(e) => log_error("Error updating todo", &e),
        }
    }

    /// Enter edit mode for a task, seeding the edit draft with its text.
    pub fn start_edit(&mut self, id: i32) -> bool {
        match self.tasks.iter().find(|t| t.id == id) {
            Some(task) => {
                self.editing = Some(EditState {
                    id,
                    draft: task.text.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn set_edit_draft(&mut self, text: &str) {
        if let Some(edit) = &mut self.editing {
            edit.draft = text.to_string();
        }
    }

    /// Save the edit draft. Blank text is rejected without a request and
    /// edit mode stays active.
    pub async fn save_edit(&mut self) {
        let Some(edit) = self.editing.clone() else {
            return;
        };
        if edit.draft.trim().is_empty() {
            return;
        }

        let patch = TaskPatch {
            text: Some(edit.draft),
            ..Default::default()
        };

        match self.api.update(edit.id, patch).await {
            Ok(updated) => {
                self.replace(updated);
                self.editing = None;
            }
            Err(e) => log_error("Error updating todo", &e),
        }
    }

    /// Leave edit mode without touching the server.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Delete a task, removing it locally on success.
    pub async fn remove(&mut self, id: i32) {
        match self.api.delete(id).await {
            Ok(()) => self.tasks.retain(|t| t.id != id),
            Err(e) => log_error("Error deleting todo", &e),
        }
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }
}

fn log_error(context: &str, err: &ApiError) {
    crate::error!("{}: {}", context, err);
}
