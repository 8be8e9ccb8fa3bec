pub mod compose;
pub mod crop_dialog;
pub mod extract;
pub mod log_panel;
pub mod notification;

pub use compose::show_compose;
pub use crop_dialog::CropDialog;
pub use extract::show_extract;
pub use log_panel::show_log_panel;
pub use notification::show_notification;
