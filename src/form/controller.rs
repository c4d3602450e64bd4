use crate::error::{FormError, StorageError, StorageResult};
use crate::form::clock::{format_date_added, Clock, IdGenerator};
use crate::form::fields::FormFields;
use crate::form::traits::ActionHandler;
use crate::models::RecordId;
use crate::render::{Action, Renderer};
use crate::store::PropertyStore;
use crate::ui::UserInterface;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const ADDED_MESSAGE: &str = "Property added successfully!";
pub const DELETE_QUESTION: &str = "Are you sure you want to delete this property?";

/// Drives the create, edit and delete flows against the store.
///
/// Every flow ends with a full redraw from the store. Storage failures are
/// reported through [`UserInterface::notice`] and do not abort the flow; the
/// most recent one is kept for [`FormController::take_storage_error`].
pub struct FormController<U> {
    store: PropertyStore,
    renderer: Renderer,
    ui: U,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    fields: FormFields,
    storage_error: Option<StorageError>,
}

impl<U: UserInterface> FormController<U> {
    pub fn new(store: PropertyStore, renderer: Renderer, ui: U, clock: Arc<dyn Clock>) -> Self {
        let ids = IdGenerator::seeded(store.all().iter().map(|r| r.id).max());
        Self {
            store,
            renderer,
            ui,
            clock,
            ids,
            fields: FormFields::default(),
            storage_error: None,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// The inputs as the user types into them
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Last failed save since this was previously called; the in-memory
    /// change behind it was kept but is not on storage
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    pub fn into_parts(self) -> (PropertyStore, U) {
        (self.store, self.ui)
    }

    /// Draw the current store contents
    pub fn render(&mut self) {
        let view = self.renderer.render_all(self.store.all());
        self.ui.draw(&view);
    }

    /// Create flow. A rejected form leaves the fields and the store untouched.
    pub async fn submit(&mut self) -> Result<RecordId, FormError> {
        let draft = self.fields.parse()?;

        let now = self.clock.now();
        let id = self.ids.next_id(&now).ok_or(FormError::IdsExhausted)?;
        let record = draft.into_record(id, format_date_added(&now));
        info!("Adding property {} ({})", record.name, id);

        let saved = self.store.add(record).await;
        self.report_storage(saved);
        self.render();
        self.fields.clear();
        self.ui.acknowledge(ADDED_MESSAGE);
        Ok(id)
    }

    /// Edit-entry flow: move the record back into the form and out of the store.
    ///
    /// The record is gone until the form is submitted again, which creates a
    /// new id and creation date. Returns `false` when no such record exists.
    pub async fn begin_edit(&mut self, id: RecordId) -> bool {
        let Some(record) = self.store.find(id) else {
            debug!("Edit requested for missing property {}", id);
            return false;
        };
        self.fields = FormFields::from_record(record);
        info!("Editing property {} ({})", self.fields.name, id);

        let removed = self.store.remove(id).await.map(|_| ());
        self.report_storage(removed);
        self.render();
        self.ui.focus_form();
        true
    }

    /// Delete flow. Returns `false` when the user declines.
    pub async fn delete(&mut self, id: RecordId) -> bool {
        if !self.ui.confirm(DELETE_QUESTION) {
            debug!("Delete of property {} cancelled", id);
            return false;
        }

        match self.store.remove(id).await {
            Ok(Some(record)) => info!("Deleted property {} ({})", record.name, id),
            Ok(None) => debug!("Property {} was already gone", id),
            Err(e) => self.report_storage(Err(e)),
        }
        self.render();
        true
    }

    fn report_storage(&mut self, result: StorageResult<()>) {
        if let Err(e) = result {
            warn!("Failed to save properties: {}", e);
            self.ui.notice(&format!("Could not save properties: {}", e));
            self.storage_error = Some(e);
        }
    }
}

#[async_trait]
impl<U: UserInterface> ActionHandler for FormController<U> {
    async fn handle(&mut self, action: Action) {
        match action {
            Action::Edit(id) => {
                self.begin_edit(id).await;
            }
            Action::Delete(id) => {
                self.delete(id).await;
            }
        }
    }
}
