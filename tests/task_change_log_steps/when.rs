//! When steps for task change-log BDD scenarios.

use super::world::{ChangeLogWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::{identity::UserId, task::services::UpdateTaskRequest};

fn submit_update(
    world: &mut ChangeLogWorld,
    actor: UserId,
    request: UpdateTaskRequest,
) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.tasks.update(id, actor, request));
    if let Ok(ref update) = result {
        world.task = Some(update.task.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when(r#"the owner changes the status to "{status}""#)]
fn owner_changes_status(world: &mut ChangeLogWorld, status: String) -> Result<(), eyre::Report> {
    let owner = world.owner;
    submit_update(world, owner, UpdateTaskRequest::new().with_status(status))
}

#[when(r#"the owner renames the task to "{title}" and changes the status to "{status}""#)]
fn owner_renames_and_changes_status(
    world: &mut ChangeLogWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let owner = world.owner;
    submit_update(
        world,
        owner,
        UpdateTaskRequest::new().with_title(title).with_status(status),
    )
}

#[when("the owner submits an update with no fields")]
fn owner_submits_empty_update(world: &mut ChangeLogWorld) -> Result<(), eyre::Report> {
    let owner = world.owner;
    submit_update(world, owner, UpdateTaskRequest::new())
}

#[when(r#"another user changes the status to "{status}""#)]
fn other_user_changes_status(
    world: &mut ChangeLogWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let other = world.other;
    submit_update(world, other, UpdateTaskRequest::new().with_status(status))
}

#[when(r#"another user comments "{content}""#)]
fn other_user_comments(world: &mut ChangeLogWorld, content: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = run_async(world.comments.create(id, world.other, content));
    world.last_comment = Some(result);
    Ok(())
}
