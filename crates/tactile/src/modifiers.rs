//! Keyboard modifier tracking for wheel gestures.

/// Keyboard modifiers as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
    /// Caps lock is on.
    pub lock: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
        lock: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Caps lock only.
    pub const LOCK: Self = Self {
        lock: true,
        ..Self::NONE
    };

    /// Check if any modifier is active.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta || self.lock
    }

    /// Check if no modifiers are active.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// The modifiers the wheel mapping cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierState {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ModifierState {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
}

/// Folds host key notifications into a [`ModifierState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierKeyTracker {
    state: ModifierState,
    command_is_ctrl: bool,
    lock_is_alt: bool,
}

impl ModifierKeyTracker {
    /// Create a tracker with the platform's key aliases.
    pub fn new(command_is_ctrl: bool, lock_is_alt: bool) -> Self {
        Self {
            state: ModifierState::NONE,
            command_is_ctrl,
            lock_is_alt,
        }
    }

    /// Current state.
    pub fn state(&self) -> ModifierState {
        self.state
    }

    /// A key went down while `modifiers` were held.
    pub fn key_down(&mut self, modifiers: KeyboardModifiers) {
        self.state = ModifierState {
            ctrl: modifiers.control || (self.command_is_ctrl && modifiers.meta),
            shift: modifiers.shift,
            alt: modifiers.alt || self.lock_alias(modifiers),
        };
    }

    /// A key was released.
    ///
    /// Ctrl and shift are cleared unconditionally. Alt survives only through
    /// the lock alias.
    pub fn key_up(&mut self, modifiers: KeyboardModifiers) {
        self.state = ModifierState {
            ctrl: false,
            shift: false,
            alt: self.lock_alias(modifiers),
        };
    }

    pub fn reset(&mut self) {
        self.state = ModifierState::NONE;
    }

    fn lock_alias(&self, modifiers: KeyboardModifiers) -> bool {
        self.lock_is_alt && modifiers.lock
    }
}
