//! In-memory store implementations used by the test suites in place of the
//! diesel-backed stores.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::auth::store::UserStore;
use crate::auth::types::UserDraft;
use crate::core::models::User;
use crate::core::utils::StoreError;
use crate::tasks::store::TaskStore;
use crate::tasks::types::{Task, TaskDraft, TaskStatus};

pub struct InMemoryTaskStore {
    tasks: Mutex<BTreeMap<i32, Task>>,
    next_id: AtomicI32,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().expect("task store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks.get(&id).cloned())
    }

    async fn filter_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks
            .values()
            .filter(|t| t.status == status)
            .cloned()
            .collect())
    }

    async fn filter_by_due_date(&self, due_date: NaiveDate) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks
            .values()
            .filter(|t| t.due_date == due_date)
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, draft: TaskDraft) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        match tasks.get_mut(&id) {
            Some(task) => {
                task.title = draft.title;
                task.description = draft.description;
                task.status = draft.status;
                task.due_date = draft.due_date;
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, draft: UserDraft) -> Result<User, StoreError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            password_hash: draft.password_hash,
            created_at: now,
            updated_at: now,
        };
        let mut users = self.users.lock().expect("user store poisoned");
        users.push(user.clone());
        Ok(user)
    }
}
