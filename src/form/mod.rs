pub mod clock;
pub mod controller;
pub mod fields;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::FormController;
pub use fields::{FormFields, PropertyDraft};
pub use traits::ActionHandler;
