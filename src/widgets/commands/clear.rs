use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::WidgetStore;

pub fn run<S: WidgetStore>(store: &S) -> Result<CmdResult> {
    store.clear();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All widgets removed"));
    Ok(result)
}
