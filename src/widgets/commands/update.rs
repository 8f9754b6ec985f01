use crate::commands::{ensure_positive_dimensions, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::WidgetChangeSet;
use crate::store::WidgetStore;
use uuid::Uuid;

pub fn run<S: WidgetStore>(
    store: &S,
    id: &Uuid,
    change_set: &WidgetChangeSet,
) -> Result<CmdResult> {
    ensure_positive_dimensions(change_set)?;
    let widget = store.update(id, change_set)?;

    let mut result = CmdResult::default();
    if change_set.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Widget touched, no fields changed: {}",
            widget.id
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Widget updated: {} (z={})",
            widget.id, widget.z
        )));
    }
    result.affected_widgets.push(widget);
    Ok(result)
}
