use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    ///
    /// The bit layout is the raw `u8` accepted by the encoding boundary.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT     = 1 << 0;
        const CTRL      = 1 << 1;
        const ALT       = 1 << 2;
        const SUPER     = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK  = 1 << 5;
    }
}

impl Modifiers {
    /// Modifiers that change the meaning of a key. Lock states are excluded.
    pub const ACTIVE: Modifiers = Modifiers::SHIFT
        .union(Modifiers::CTRL)
        .union(Modifiers::ALT)
        .union(Modifiers::SUPER);

    /// Build from a raw bitmask. Bits above 5 are dropped.
    pub const fn from_raw(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }

    /// The modifiers without lock states.
    pub fn active(self) -> Self {
        self & Self::ACTIVE
    }

    /// xterm modifier parameter: `1 + shift + 2*alt + 4*ctrl + 8*super`.
    pub fn xterm_param(self) -> u8 {
        let mut value = 1;
        if self.contains(Self::SHIFT) {
            value += 1;
        }
        if self.contains(Self::ALT) {
            value += 2;
        }
        if self.contains(Self::CTRL) {
            value += 4;
        }
        if self.contains(Self::SUPER) {
            value += 8;
        }
        value
    }

    /// Parse names like `ctrl+shift` or `alt super`. Unknown names yield `None`.
    pub fn parse(names: &str) -> Option<Self> {
        let mut mods = Self::empty();
        for part in names
            .split(|c: char| c == '+' || c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            mods |= match part.to_ascii_lowercase().as_str() {
                "shift" => Self::SHIFT,
                "ctrl" | "control" => Self::CTRL,
                "alt" | "option" => Self::ALT,
                "super" | "meta" | "cmd" => Self::SUPER,
                "caps" | "caps_lock" => Self::CAPS_LOCK,
                "num" | "num_lock" => Self::NUM_LOCK,
                _ => return None,
            };
        }
        Some(mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions() {
        assert_eq!(Modifiers::SHIFT.bits(), 1);
        assert_eq!(Modifiers::CTRL.bits(), 2);
        assert_eq!(Modifiers::ALT.bits(), 4);
        assert_eq!(Modifiers::SUPER.bits(), 8);
        assert_eq!(Modifiers::CAPS_LOCK.bits(), 16);
        assert_eq!(Modifiers::NUM_LOCK.bits(), 32);
        assert_eq!(Modifiers::all().bits(), 63);
    }

    #[test]
    fn from_raw_drops_high_bits() {
        assert_eq!(Modifiers::from_raw(0xC3), Modifiers::SHIFT | Modifiers::CTRL);
    }

    #[test]
    fn active_drops_locks() {
        let mods = Modifiers::CTRL | Modifiers::CAPS_LOCK | Modifiers::NUM_LOCK;
        assert_eq!(mods.active(), Modifiers::CTRL);
    }

    #[test]
    fn xterm_param_reorders_bits() {
        assert_eq!(Modifiers::empty().xterm_param(), 1);
        assert_eq!(Modifiers::SHIFT.xterm_param(), 2);
        assert_eq!(Modifiers::ALT.xterm_param(), 3);
        assert_eq!(Modifiers::CTRL.xterm_param(), 5);
        assert_eq!((Modifiers::CTRL | Modifiers::SHIFT).xterm_param(), 6);
        assert_eq!(Modifiers::ACTIVE.xterm_param(), 16);
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            Modifiers::parse("ctrl+shift"),
            Some(Modifiers::CTRL | Modifiers::SHIFT)
        );
        assert_eq!(Modifiers::parse("Alt super"), Some(Modifiers::ALT | Modifiers::SUPER));
        assert_eq!(Modifiers::parse(""), Some(Modifiers::empty()));
        assert_eq!(Modifiers::parse("hyper"), None);
    }
}
