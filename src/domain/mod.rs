pub mod enums;
pub mod project;
pub mod task;
pub mod user;

pub use enums::{Priority, Status, TimeRange, TodoFilter, UiMode, View};
pub use project::{CurrentTaskSummary, Member, MemberId, Project, ProjectId, ProjectPatch};
pub use task::{NewTask, Task, TaskId, TaskPatch};
pub use user::{Permission, User};
