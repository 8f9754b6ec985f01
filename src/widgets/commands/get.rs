use crate::commands::CmdResult;
use crate::error::{Result, WidgetsError};
use crate::store::WidgetStore;
use uuid::Uuid;

/// Fetches one widget. A missing id is reported as `EntityNotFound` here,
/// since callers of this layer need a definite outcome.
pub fn run<S: WidgetStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    let widget = store.get(id).ok_or(WidgetsError::EntityNotFound(*id))?;
    Ok(CmdResult::default().with_listed_widgets(vec![widget]))
}
