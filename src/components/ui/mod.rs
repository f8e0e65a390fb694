pub mod accordion;
pub mod alert;
pub mod button;
pub mod checkbox;
pub mod spinner;
pub mod table;
pub mod text_field;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use accordion::*;
pub use alert::*;
pub use button::*;
pub use checkbox::*;
pub use spinner::*;
pub use table::*;
pub use text_field::*;
