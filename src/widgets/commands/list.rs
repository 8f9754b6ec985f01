use crate::commands::{CmdMessage, CmdResult};
use crate::config::WidgetsConfig;
use crate::error::Result;
use crate::store::WidgetStore;

/// Paging parameters after the configured defaults and bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Normalizes externally supplied paging input.
    ///
    /// A missing or non-positive limit falls back to the default, a limit over
    /// the maximum is clamped to it, and a missing or negative offset falls
    /// back to the default offset.
    pub fn resolve(limit: Option<i64>, offset: Option<i64>, config: &WidgetsConfig) -> Self {
        let limit = match limit {
            Some(l) if l > config.max_page_limit => config.max_page_limit,
            Some(l) if l > 0 => l,
            _ => config.default_page_limit,
        };
        let offset = match offset {
            Some(o) if o >= 0 => o,
            _ => config.default_page_offset,
        };
        Self { limit, offset }
    }
}

pub fn run<S: WidgetStore>(store: &S, page: PageRequest) -> Result<CmdResult> {
    let widgets = store.get_page(page.limit, page.offset)?;

    let mut result = CmdResult::default();
    if widgets.is_empty() && page.offset > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Offset {} is past the last widget",
            page.offset
        )));
    }
    Ok(result.with_listed_widgets(widgets))
}
