use std::sync::Arc;
use task_manager_rs::storage::file::FileBackend;
use task_manager_rs::storage::sqlite::SqliteBackend;
use task_manager_rs::storage::StorageBackend;
use task_manager_rs::{MemoryBackend, Task, TaskInput, TaskManagerError, TaskRepository};
use tempfile::tempdir;

async fn run_scenario(repo: TaskRepository) {
    let milk = repo.create(TaskInput::new("Buy milk", None)).await.unwrap();
    assert_eq!(
        milk,
        Task {
            id: 1,
            name: "Buy milk".to_string(),
            description: String::new(),
        }
    );

    let dog = repo
        .create(TaskInput::new("Walk dog", Some("evening")))
        .await
        .unwrap();
    assert_eq!(dog.id, 2);
    assert_eq!(dog.description, "evening");

    let tasks = repo.list().await.unwrap();
    assert_eq!(tasks, vec![milk.clone(), dog.clone()]);

    let updated = repo
        .update(1, TaskInput::new("Buy oat milk", None))
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Buy oat milk");
    assert_eq!(updated.description, "");

    repo.delete(2).await.unwrap();
    let tasks = repo.list().await.unwrap();
    assert_eq!(tasks, vec![updated]);

    let result = repo.update(2, TaskInput::new("x", None)).await;
    assert!(matches!(result, Err(TaskManagerError::TaskNotFound(2))));
}

#[tokio::test]
async fn test_scenario_memory() {
    run_scenario(TaskRepository::in_memory()).await;
}

#[tokio::test]
async fn test_scenario_file() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::open(dir.path().join("tasks.json")).await.unwrap();
    run_scenario(TaskRepository::new(Arc::new(backend))).await;
}

#[tokio::test]
async fn test_scenario_sqlite() {
    let backend = SqliteBackend::in_memory().unwrap();
    run_scenario(TaskRepository::new(Arc::new(backend))).await;
}

#[tokio::test]
async fn test_update_changes_only_name_and_description() {
    let repo = TaskRepository::in_memory();
    let task = repo.create(TaskInput::new("a", Some("b"))).await.unwrap();

    let updated = repo
        .update(task.id, TaskInput::new("c", Some("d")))
        .await
        .unwrap();
    assert_eq!(updated.id, task.id);
    assert_eq!((updated.name.as_str(), updated.description.as_str()), ("c", "d"));
}

#[tokio::test]
async fn test_invalid_update_leaves_task_untouched() {
    let repo = TaskRepository::in_memory();
    let task = repo.create(TaskInput::new("a", Some("b"))).await.unwrap();

    let result = repo.update(task.id, TaskInput::new("", Some("z"))).await;
    assert!(matches!(result, Err(TaskManagerError::Validation(_))));
    assert_eq!(repo.list().await.unwrap(), vec![task]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let repo = TaskRepository::in_memory();
    let task = repo.create(TaskInput::new("a", None)).await.unwrap();

    repo.delete(task.id).await.unwrap();
    let after_first = repo.list().await.unwrap();
    repo.delete(task.id).await.unwrap();
    let after_second = repo.list().await.unwrap();

    assert!(after_first.is_empty());
    assert_eq!(after_first, after_second);

    // Never-issued ids are a no-op too
    repo.delete(999).await.unwrap();
}

#[tokio::test]
async fn test_list_after_many_creates() {
    let repo = TaskRepository::in_memory();

    for i in 0..25 {
        repo.create(TaskInput::new(format!("task_{}", i), None))
            .await
            .unwrap();
    }

    let tasks = repo.list().await.unwrap();
    assert_eq!(tasks.len(), 25);
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task.id, i as u64 + 1);
        assert_eq!(task.name, format!("task_{}", i));
    }
}

#[tokio::test]
async fn test_backend_kind_and_health() {
    let repo = TaskRepository::new(Arc::new(MemoryBackend::new()));
    assert_eq!(repo.backend_kind(), "memory");
    assert!(repo.health_check().await);

    let sqlite: Arc<dyn StorageBackend> = Arc::new(SqliteBackend::in_memory().unwrap());
    assert_eq!(TaskRepository::new(sqlite).backend_kind(), "sqlite");
}
