//! Property listing manager: a form, a persisted store and a card renderer.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod storage;
pub mod store;
pub mod ui;

pub use config::AppConfig;
pub use error::{FormError, StorageError};
pub use form::{ActionHandler, FormController, FormFields};
pub use models::{PropertyRecord, PropertyType, RecordId, Status};
pub use render::{Action, ListingView, Renderer};
pub use store::PropertyStore;
