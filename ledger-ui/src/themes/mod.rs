mod dark_theme;

pub use dark_theme::{apply_dark_theme, hsla};
