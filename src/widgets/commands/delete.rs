use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::WidgetStore;
use uuid::Uuid;

pub fn run<S: WidgetStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Widget deleted: {}", id)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get};
    use crate::error::WidgetsError;
    use crate::store::memory::fixtures::default_change_set;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn deletes_widget() {
        let store = InMemoryStore::new();
        let id = create::run(&store, &default_change_set()).unwrap().affected_widgets[0].id;

        run(&store, &id).unwrap();
        assert!(matches!(
            get::run(&store, &id),
            Err(WidgetsError::EntityNotFound(_))
        ));
    }

    #[test]
    fn second_delete_is_not_found() {
        let store = InMemoryStore::new();
        let id = create::run(&store, &default_change_set()).unwrap().affected_widgets[0].id;

        run(&store, &id).unwrap();
        assert!(matches!(
            run(&store, &id),
            Err(WidgetsError::EntityNotFound(err_id)) if err_id == id
        ));
    }
}
