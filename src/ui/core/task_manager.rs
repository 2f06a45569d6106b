use super::actions::Action;
use crate::backend::BoatDataService;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs facility requests in the background and reports results as actions.
///
/// Superseded requests are not aborted; widgets discard results they no
/// longer care about.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
    service: Arc<dyn BoatDataService>,
}

impl TaskManager {
    pub fn new(service: Arc<dyn BoatDataService>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
                service,
            },
            rx,
        )
    }

    /// Spawn the facility call behind a request action.
    ///
    /// Returns `None` for actions that are not requests.
    pub fn dispatch(&mut self, action: Action) -> Option<TaskId> {
        let service = Arc::clone(&self.service);
        let sender = self.action_sender.clone();

        let (description, handle) = match action {
            Action::FetchBoatLocation { boat_id, fields } => {
                let description = format!("Fetch location of boat {}", boat_id);
                let handle = tokio::spawn(async move {
                    let result = service.get_record(&boat_id, &fields).await;
                    let _ = sender.send(Action::BoatLocationLoaded { boat_id, result });
                });
                (description, handle)
            }
            Action::QueryBoats { request, boat_type_id } => {
                let description = format!("Query boats (type '{}', request {})", boat_type_id, request);
                let handle = tokio::spawn(async move {
                    let result = service.get_boats(&boat_type_id).await;
                    let _ = sender.send(Action::BoatsLoaded { request, result });
                });
                (description, handle)
            }
            Action::UpdateBoats { drafts } => {
                let description = format!("Update {} boat(s)", drafts.len());
                let handle = tokio::spawn(async move {
                    let result = service.update_boat_list(&drafts).await;
                    let _ = sender.send(Action::BoatsUpdated(result));
                });
                (description, handle)
            }
            Action::LoadBoatTypes => {
                let description = "Load boat types".to_string();
                let handle = tokio::spawn(async move {
                    let result = service.get_boat_types().await;
                    let _ = sender.send(Action::BoatTypesLoaded(result));
                });
                (description, handle)
            }
            _ => return None,
        };

        log::debug!("Task {}: {}", self.next_task_id, description);
        Some(self.track(description, handle))
    }

    fn track(&mut self, description: String, handle: JoinHandle<()>) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Drop bookkeeping for finished tasks, returning their ids
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                log::debug!(
                    "Task {} finished after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
        }

        finished
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
