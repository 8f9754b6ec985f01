use crate::commands::{ensure_positive_dimensions, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::WidgetChangeSet;
use crate::store::WidgetStore;

pub fn run<S: WidgetStore>(store: &S, change_set: &WidgetChangeSet) -> Result<CmdResult> {
    ensure_positive_dimensions(change_set)?;
    let widget = store.create(change_set)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Widget created: {} (z={})",
        widget.id, widget.z
    )));
    result.affected_widgets.push(widget);
    Ok(result)
}
