//! End-to-end board flows through the operation processor

use cadence_board::{
    board::{GetBoard, InitBoard},
    section::{AddSection, DeleteSection},
    task::{AddTask, MoveTask, SetStatus},
    BoardContext, BoardOperationProcessor, ContainerKey, Position, Status, TaskId,
};

async fn setup() -> (BoardContext, BoardOperationProcessor) {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
    let ctx = BoardContext::new();
    let processor = BoardOperationProcessor::with_actor("alice[session1]");
    processor
        .process(&InitBoard::new("Sprint Board"), &ctx)
        .await
        .unwrap();
    (ctx, processor)
}

async fn add(
    processor: &BoardOperationProcessor,
    ctx: &BoardContext,
    title: &str,
    container: ContainerKey,
) -> TaskId {
    let result = processor
        .process(&AddTask::new(title).in_container(container), ctx)
        .await
        .unwrap();
    result["id"].as_str().unwrap().into()
}

#[tokio::test]
async fn test_move_sprint_task_into_new_section() {
    let (ctx, processor) = setup().await;

    let t1 = add(&processor, &ctx, "t1", ContainerKey::Sprint).await;
    let prior_status = ctx.read_task(&t1).await.unwrap().status;

    let section = processor
        .process(&AddSection::new(), &ctx)
        .await
        .unwrap();
    assert_eq!(section["id"], "backlog-2");
    assert_eq!(section["title"], "Backlog 2");

    processor
        .process(
            &MoveTask::new(t1.clone(), Position::sprint(0), Position::section("backlog-2", 0)),
            &ctx,
        )
        .await
        .unwrap();

    let registry = ctx.read_registry().await;
    assert!(!registry.sprint().contains(&t1));
    assert_eq!(
        registry.section(&"backlog-2".into()).unwrap().tasks,
        vec![t1.clone()]
    );
    // Status unchanged by the cross-axis move
    assert_eq!(ctx.read_task(&t1).await.unwrap().status, prior_status);
}

#[tokio::test]
async fn test_done_task_moved_to_sprint_keeps_status() {
    let (ctx, processor) = setup().await;

    // Three backlog tasks; the third has already been finished once
    add(&processor, &ctx, "a", ContainerKey::Section("backlog-1".into())).await;
    add(&processor, &ctx, "b", ContainerKey::Section("backlog-1".into())).await;
    let t2 = add(&processor, &ctx, "t2", ContainerKey::Section("backlog-1".into())).await;
    processor
        .process(&SetStatus::new(t2.clone(), Status::Done), &ctx)
        .await
        .unwrap();

    processor
        .process(
            &MoveTask::new(t2.clone(), Position::section("backlog-1", 2), Position::sprint(0)),
            &ctx,
        )
        .await
        .unwrap();

    let task = ctx.read_task(&t2).await.unwrap();
    assert_eq!(task.status, Status::Done);
    let registry = ctx.read_registry().await;
    assert_eq!(registry.sprint()[0], t2);
    assert_eq!(registry.section(&"backlog-1".into()).unwrap().tasks.len(), 2);
}

#[tokio::test]
async fn test_cross_axis_moves_keep_exactly_one_home() {
    let (ctx, processor) = setup().await;

    let id = add(&processor, &ctx, "wanderer", ContainerKey::Sprint).await;

    for (source, destination) in [
        (Position::sprint(0), Position::section("backlog-1", 0)),
        (Position::section("backlog-1", 0), Position::sprint(0)),
        (Position::sprint(0), Position::section("backlog-1", 5)),
        (Position::section("backlog-1", 0), Position::sprint(3)),
    ] {
        processor
            .process(&MoveTask::new(id.clone(), source, destination), &ctx)
            .await
            .unwrap();

        let registry = ctx.read_registry().await;
        let in_sprint = registry.sprint().contains(&id);
        let in_sections = registry
            .sections()
            .iter()
            .any(|section| section.tasks.contains(&id));
        assert!(in_sprint != in_sections, "task must live on exactly one axis");
        assert!(registry.is_consistent());
    }
}

#[tokio::test]
async fn test_deleting_section_excludes_tasks_from_display_index() {
    let (ctx, processor) = setup().await;

    let keep = add(&processor, &ctx, "keep", ContainerKey::Sprint).await;
    processor.process(&AddSection::new(), &ctx).await.unwrap();
    let doomed_a = add(&processor, &ctx, "a", ContainerKey::Section("backlog-2".into())).await;
    let doomed_b = add(&processor, &ctx, "b", ContainerKey::Section("backlog-2".into())).await;

    processor
        .process(&DeleteSection::new("backlog-2"), &ctx)
        .await
        .unwrap();

    let registry = ctx.read_registry().await;
    let index = registry.display_index();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get(&keep), Some(&0));
    assert!(!index.contains_key(&doomed_a));
    assert!(!index.contains_key(&doomed_b));
    assert_eq!(ctx.task_count().await, 1);
}

#[tokio::test]
async fn test_activity_log_end_to_end() {
    let (ctx, processor) = setup().await;

    let id = add(&processor, &ctx, "Task", ContainerKey::Sprint).await;
    processor
        .process(
            &MoveTask::new(id.clone(), Position::sprint(0), Position::section("backlog-1", 0)),
            &ctx,
        )
        .await
        .unwrap();
    // Reads leave no trace
    processor.process(&GetBoard::new(), &ctx).await.unwrap();
    // Neither do cancelled gestures
    processor
        .process(
            &MoveTask::cancelled(id, Position::section("backlog-1", 0)),
            &ctx,
        )
        .await
        .unwrap();

    let entries = ctx.read_activity(None).await;
    assert_eq!(entries.len(), 3); // init board, add task, move task
    assert_eq!(entries[0].op, "move task"); // Newest first
    assert_eq!(entries[1].op, "add task");
    assert_eq!(entries[2].op, "init board");
    for entry in &entries {
        assert_eq!(entry.actor.as_deref(), Some("alice[session1]"));
    }
}

#[tokio::test]
async fn test_snapshot_keys_follow_board_prefix() {
    let ctx = BoardContext::new();
    let processor = BoardOperationProcessor::new();
    processor
        .process(&InitBoard::new("Ops").with_prefix("OPS"), &ctx)
        .await
        .unwrap();

    let id = add(&processor, &ctx, "Task", ContainerKey::Sprint).await;

    let snapshot = processor.process(&GetBoard::new(), &ctx).await.unwrap();
    assert_eq!(snapshot["index"][id.as_str()]["key"], "OPS-1");
}
