//! Configuration types and options for the application.
//!
//! There is no configuration file: every value is resolved once from the
//! command line (or its environment variable fallbacks) into the immutable
//! structures below and handed to the operations that need them.

pub mod layout;
pub mod style;
pub mod toolchain;

pub use layout::ProjectLayout;
pub use style::Style;
pub use toolchain::Toolchain;
