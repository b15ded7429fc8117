//! Keyboard and paste input for a terminal session: key codes, the key
//! encoder, the paste safety scanner, and the bridge that ties them
//! together.

pub mod bridge;
pub mod keys;
pub mod paste;
pub mod processor;

pub use bridge::{InputBridge, VERSION};
pub use keys::{EncoderOptions, Key, KeyAction, KeyEncoder, KeyEvent, Modifiers};
pub use paste::{encode_paste, is_paste_safe, scan_paste, PasteVerdict};
pub use processor::{InputProcessor, InputResult};
