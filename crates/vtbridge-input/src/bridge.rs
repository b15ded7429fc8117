//! The input bridge: one shared object owning the key encoder lifecycle.
//!
//! Construct one `InputBridge` at startup and hand it (usually behind an
//! `Arc`) to whatever needs to encode keys. All methods take `&self`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};
use vtbridge_common::{EncoderError, EncoderId};

use crate::keys::{EncoderOptions, KeyEncoder, KeyEvent};
use crate::paste;

/// Version of the key encoding logic.
pub const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct InputBridge {
    options: Mutex<EncoderOptions>,
    encoder: Mutex<Option<KeyEncoder>>,
}

impl InputBridge {
    /// A bridge with no encoder yet. Call [`create_encoder`](Self::create_encoder)
    /// before encoding.
    pub fn new(options: EncoderOptions) -> Self {
        Self {
            options: Mutex::new(options),
            encoder: Mutex::new(None),
        }
    }

    /// Create the encoder if none exists.
    ///
    /// Returns whether an encoder exists afterwards. Calling this while an
    /// encoder is live logs a warning and keeps the existing one.
    pub fn create_encoder(&self) -> bool {
        let mut slot = lock(&self.encoder);
        if let Some(existing) = slot.as_ref() {
            warn!(encoder = %existing.id(), "key encoder already exists");
            return true;
        }

        let options = *lock(&self.options);
        match KeyEncoder::new(options) {
            Ok(encoder) => {
                info!(encoder = %encoder.id(), "key encoder ready");
                *slot = Some(encoder);
                true
            }
            Err(e) => {
                error!("{e}");
                false
            }
        }
    }

    /// Destroy the encoder. No-op when none exists.
    pub fn destroy_encoder(&self) {
        if let Some(encoder) = lock(&self.encoder).take() {
            debug!(encoder = %encoder.id(), "releasing key encoder");
        }
    }

    pub fn has_encoder(&self) -> bool {
        lock(&self.encoder).is_some()
    }

    pub fn encoder_id(&self) -> Option<EncoderId> {
        lock(&self.encoder).as_ref().map(KeyEncoder::id)
    }

    /// Encode a key press from raw values: a [`Key`](crate::Key) code, a
    /// modifier bitmask, and the text the platform produced, if any.
    ///
    /// `None` when no encoder exists (logged as an error), the key code is
    /// unknown, or the key has no encoding.
    pub fn encode_key(&self, key_code: u32, mods: u8, text: Option<&str>) -> Option<String> {
        match self.with_encoder(|enc| enc.encode_raw(key_code, mods, text)) {
            Ok(Ok(seq)) => seq,
            Ok(Err(e)) => {
                warn!("{e}");
                None
            }
            Err(e) => {
                error!("encode_key: {e}");
                None
            }
        }
    }

    /// Encode a typed key event. Same failure handling as
    /// [`encode_key`](Self::encode_key).
    pub fn encode_event(&self, event: &KeyEvent) -> Option<String> {
        self.with_encoder(|enc| enc.encode(event))
            .unwrap_or_else(|e| {
                error!("encode_event: {e}");
                None
            })
    }

    /// Run `f` against the live encoder.
    pub fn with_encoder<T>(&self, f: impl FnOnce(&KeyEncoder) -> T) -> Result<T, EncoderError> {
        let slot = lock(&self.encoder);
        let encoder = slot.as_ref().ok_or(EncoderError::NotInitialized)?;
        Ok(f(encoder))
    }

    pub fn options(&self) -> EncoderOptions {
        *lock(&self.options)
    }

    /// Update terminal modes for the live encoder and any created later.
    pub fn set_options(&self, options: EncoderOptions) {
        *lock(&self.options) = options;
        if let Some(encoder) = lock(&self.encoder).as_mut() {
            encoder.set_options(options);
        }
    }

    /// Works with or without an encoder.
    pub fn is_paste_safe(&self, data: &str) -> bool {
        paste::is_paste_safe(data)
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }
}
