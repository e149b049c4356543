/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

// Re-export common dependencies so consumers can rely on this module as a facade.
pub use chrono;
pub use rust_decimal;
pub use serde;
