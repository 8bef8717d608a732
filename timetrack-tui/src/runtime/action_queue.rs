use timetrack_client::{ActivityId, TaskId, TimeEntryId};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the API. Key handlers enqueue these; the event loop runs
/// them one at a time.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    LoadActivities,
    OpenTasks { activity_id: ActivityId },
    ReloadTasks,
    OpenTimeEntries { task_id: TaskId },
    ReloadTimeEntries,
    ToggleTimer,
    InspectEntry { id: TimeEntryId },
    OpenActivityForm { id: ActivityId },
    SubmitActivityForm,
    OpenTaskForm { id: TaskId },
    SubmitTaskForm,
    CloseTask { id: TaskId },
    ConfirmDelete,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
