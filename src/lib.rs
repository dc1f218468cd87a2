//! uemacs-flash - transient highlighting triggered by editor commands
//!
//! Register a [`TriggerConfig`] for a command name and every successful run
//! of that command briefly highlights a region (the current line, the
//! selection, the word at point, ...) with a face, removing it after a
//! duration. The engine talks to its editor only through the capability
//! traits in [`host`]; [`Editor`] is a complete built-in host.
//!
//! ```
//! use std::time::Duration;
//! use uemacs_flash::{Editor, Flash, ThingKind, TriggerConfig};
//!
//! let mut editor = Editor::from_text("first line\nsecond line\n");
//! let mut flash = Flash::new();
//! flash.register(&mut editor, "next-line", TriggerConfig::new(ThingKind::Line));
//!
//! editor.execute_command("next-line", 1).unwrap();
//! assert_eq!(editor.overlays().len(), 1);
//!
//! editor.advance(Duration::from_secs(1));
//! assert!(editor.overlays().is_empty());
//! ```

pub mod at_point;
pub mod buffer;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod face;
pub mod flash;
pub mod highlight;
pub mod host;
pub mod intercept;
pub mod line;
pub mod logging;
pub mod region;
pub mod render;
pub mod script;
pub mod thing;
pub mod trigger;
pub mod window;

pub use config::Settings;
pub use editor::Editor;
pub use error::{FlashError, Result};
pub use face::Face;
pub use flash::{Flash, DEFAULT_DURATION};
pub use highlight::ActiveHighlight;
pub use host::Host;
pub use region::{Pos, Region};
pub use thing::{Thing, ThingKind};
pub use trigger::TriggerConfig;
