//! Keyboard shortcut dispatcher.
//!
//! Bindings are declared as key strings mapping to commands: modifier
//! combinations join tokens with `_` ("ctrl_s"), chained two-keystroke
//! sequences join with `-` ("g-r"). The dispatcher normalizes the table
//! into descriptors once, then matches incoming key events against them,
//! returning the bound command for the editor to interpret.
//!
//! One binding table must work across platforms: a descriptor requesting
//! `meta` is rewritten to require `ctrl` on non-Apple platforms.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::warn;

use crate::input::{InputFocus, KeyEvent};

const DEFAULT_CHAIN_DELAY: Duration = Duration::from_millis(800);

/// Keys that combine meaningfully with Shift besides the alphabet.
/// Shift with punctuation already changes the produced character, so it
/// is ignored there.
const SHIFTABLE_KEYS: [&str; 8] = [
    "arrowleft",
    "arrowright",
    "arrowup",
    "arrowdown",
    "tab",
    "escape",
    "enter",
    "backspace",
];

/// Whether a binding stays enabled while an editable control has focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsingInput {
    /// Disabled while any editable input has focus (the default).
    #[default]
    No,
    /// Always enabled, regardless of focus.
    Always,
    /// Enabled only while the focused input's name matches.
    Field(String),
}

impl UsingInput {
    fn enabled(&self, focus: &InputFocus) -> bool {
        match self {
            Self::No => *focus == InputFocus::None,
            Self::Always => true,
            Self::Field(field) => matches!(focus, InputFocus::Editable { name } if name == field),
        }
    }
}

/// One entry of the binding table: independent keydown/keyup commands plus
/// the focus gate.
#[derive(Debug, Clone, Default)]
pub struct ShortcutBinding<C> {
    pub keydown: Option<C>,
    pub keyup: Option<C>,
    pub using_input: UsingInput,
}

impl<C> ShortcutBinding<C> {
    /// A keydown-only binding, the common case.
    pub fn keydown(command: C) -> Self {
        Self {
            keydown: Some(command),
            keyup: None,
            using_input: UsingInput::No,
        }
    }

    /// A hold-style binding with both keydown and keyup commands.
    pub fn hold(keydown: C, keyup: C) -> Self {
        Self {
            keydown: Some(keydown),
            keyup: Some(keyup),
            using_input: UsingInput::No,
        }
    }

    pub fn with_using_input(mut self, using_input: UsingInput) -> Self {
        self.using_input = using_input;
        self
    }
}

/// Dispatcher tuning knobs.
#[derive(Debug, Clone)]
pub struct ShortcutOptions {
    /// Window within which the second keystroke of a chain must arrive.
    pub chain_delay: Duration,
    /// Match physical key codes ("KeyG") instead of produced characters,
    /// so shortcuts survive non-QWERTY layouts.
    pub layout_independent: bool,
    /// Apple platforms keep `meta` bindings as-is; elsewhere they are
    /// rewritten to `ctrl`.
    pub apple: bool,
}

impl Default for ShortcutOptions {
    fn default() -> Self {
        Self {
            chain_delay: DEFAULT_CHAIN_DELAY,
            layout_independent: false,
            apple: cfg!(target_os = "macos"),
        }
    }
}

#[derive(Debug, Clone)]
struct ShortcutDescriptor<C> {
    /// Base key (lowercased), physical code in layout-independent mode,
    /// or both chain parts joined by `-` for chained shortcuts.
    key: String,
    ctrl: bool,
    meta: bool,
    shift: bool,
    #[allow(dead_code)]
    alt: bool,
    chained: bool,
    keydown: Option<C>,
    keyup: Option<C>,
    using_input: UsingInput,
}

/// Matches key events against a compiled binding table.
#[derive(Debug)]
pub struct ShortcutDispatcher<C> {
    descriptors: Vec<ShortcutDescriptor<C>>,
    chain_buffer: SmallVec<[String; 2]>,
    last_key_at: Option<Instant>,
    options: ShortcutOptions,
}

impl<C: Clone> ShortcutDispatcher<C> {
    /// Compiles a binding table. Malformed entries (no command at all) are
    /// dropped with a warning; shortcut tables merge contributions from
    /// several tools and one bad entry must not break the rest.
    pub fn new<I, S>(bindings: I, options: ShortcutOptions) -> Self
    where
        I: IntoIterator<Item = (S, ShortcutBinding<C>)>,
        S: AsRef<str>,
    {
        let mut descriptors = Vec::new();
        for (key, binding) in bindings {
            let key = key.as_ref();
            if binding.keydown.is_none() && binding.keyup.is_none() {
                warn!(key, "shortcut binding has no handler, dropping");
                continue;
            }
            match compile_descriptor(key, binding, &options) {
                Some(descriptor) => descriptors.push(descriptor),
                None => warn!(key, "invalid shortcut key, dropping"),
            }
        }
        Self {
            descriptors,
            chain_buffer: SmallVec::new(),
            last_key_at: None,
            options,
        }
    }

    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Processes a key-down event; returns the command to run, if any.
    pub fn on_key_down(&mut self, event: &KeyEvent, focus: &InputFocus) -> Option<C> {
        self.on_key_down_at(event, focus, Instant::now())
    }

    /// Key-down matching with an explicit clock, for replay and tests.
    pub fn on_key_down_at(
        &mut self,
        event: &KeyEvent,
        focus: &InputFocus,
        now: Instant,
    ) -> Option<C> {
        // Input autocomplete can deliver a keydown with no key.
        if event.key.is_empty() {
            return None;
        }

        // The chain window expired; start a fresh chain.
        if let Some(last) = self.last_key_at {
            if now.duration_since(last) > self.options.chain_delay {
                self.chain_buffer.clear();
            }
        }
        self.last_key_at = Some(now);

        let raw = if self.options.layout_independent {
            event.code.clone()
        } else {
            event.key.clone()
        };
        if self.chain_buffer.len() == 2 {
            self.chain_buffer.remove(0);
        }
        self.chain_buffer.push(raw);

        let alphabet_key = if self.options.layout_independent {
            is_alpha_code(&event.code)
        } else {
            event.key.len() == 1 && event.key.chars().all(|c| c.is_ascii_alphabetic())
        };
        let shiftable_key = if self.options.layout_independent {
            SHIFTABLE_KEYS
                .iter()
                .any(|k| convert_key_to_code(k) == event.code)
        } else {
            SHIFTABLE_KEYS.contains(&event.key.to_lowercase().as_str())
        };

        if self.chain_buffer.len() >= 2 {
            let chained_key = self.chain_buffer.join("-");
            for descriptor in self.descriptors.iter().filter(|d| d.chained) {
                if descriptor.key != chained_key {
                    continue;
                }
                // First matching chained descriptor stops the scan; a
                // disabled one still swallows the chain.
                let command = if descriptor.using_input.enabled(focus) {
                    descriptor.keydown.clone()
                } else {
                    None
                };
                self.chain_buffer.clear();
                return command;
            }
        }

        for descriptor in self.descriptors.iter().filter(|d| !d.chained) {
            if self.options.layout_independent {
                if event.code != descriptor.key {
                    continue;
                }
            } else if event.key.to_lowercase() != descriptor.key {
                continue;
            }
            if event.meta != descriptor.meta {
                continue;
            }
            if event.ctrl != descriptor.ctrl {
                continue;
            }
            // Shift only disambiguates alphabet and shiftable keys; for
            // symbol keys the produced character already reflects it.
            if (alphabet_key || shiftable_key) && event.shift != descriptor.shift {
                continue;
            }

            let command = if descriptor.using_input.enabled(focus) {
                descriptor.keydown.clone()
            } else {
                None
            };
            self.chain_buffer.clear();
            return command;
        }

        None
    }

    /// Processes a key-up event. Matches the base key only (no modifier
    /// re-check, chain buffer untouched) to support hold-to-activate
    /// patterns such as space-to-pan.
    pub fn on_key_up(&mut self, event: &KeyEvent, focus: &InputFocus) -> Option<C> {
        if event.key.is_empty() {
            return None;
        }
        for descriptor in self.descriptors.iter().filter(|d| !d.chained) {
            let matched = if self.options.layout_independent {
                event.code == descriptor.key
            } else {
                event.key.to_lowercase() == descriptor.key
            };
            if !matched {
                continue;
            }
            if descriptor.keyup.is_none() {
                continue;
            }
            if descriptor.using_input.enabled(focus) {
                return descriptor.keyup.clone();
            }
            return None;
        }
        None
    }
}

fn is_alpha_code(code: &str) -> bool {
    code.len() == 4 && code.starts_with("Key")
}

/// Maps a key token to its physical code for layout-independent matching.
fn convert_key_to_code(key: &str) -> String {
    let lower = key.to_lowercase();
    if lower.len() == 1 && lower.chars().all(|c| c.is_ascii_alphabetic()) {
        return format!("Key{}", lower.to_uppercase());
    }
    if lower.len() == 1 && lower.chars().all(|c| c.is_ascii_digit()) {
        return format!("Digit{lower}");
    }
    match lower.as_str() {
        " " | "space" => "Space".to_string(),
        "enter" => "Enter".to_string(),
        "escape" | "esc" => "Escape".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Backspace".to_string(),
        "delete" => "Delete".to_string(),
        "arrowup" => "ArrowUp".to_string(),
        "arrowdown" => "ArrowDown".to_string(),
        "arrowleft" => "ArrowLeft".to_string(),
        "arrowright" => "ArrowRight".to_string(),
        _ => key.to_string(),
    }
}

const MODIFIER_TOKENS: [&str; 6] = ["meta", "command", "ctrl", "shift", "alt", "option"];

fn compile_descriptor<C>(
    key: &str,
    binding: ShortcutBinding<C>,
    options: &ShortcutOptions,
) -> Option<ShortcutDescriptor<C>> {
    let chained = key.contains('-') && key != "-" && !key.contains('_');

    let mut descriptor = if chained {
        let parts: Vec<&str> = key.split('-').filter(|p| !p.is_empty()).collect();
        if parts.len() != 2 {
            return None;
        }
        let compiled = if options.layout_independent {
            parts
                .iter()
                .map(|p| convert_key_to_code(p))
                .collect::<Vec<_>>()
                .join("-")
        } else {
            key.to_lowercase()
        };
        ShortcutDescriptor {
            key: compiled,
            ctrl: false,
            meta: false,
            shift: false,
            alt: false,
            chained: true,
            keydown: binding.keydown,
            keyup: binding.keyup,
            using_input: binding.using_input,
        }
    } else {
        let tokens: Vec<String> = key.to_lowercase().split('_').map(str::to_string).collect();
        let base: Vec<&String> = tokens
            .iter()
            .filter(|t| !MODIFIER_TOKENS.contains(&t.as_str()))
            .collect();
        if base.is_empty() && key != "_" {
            return None;
        }
        let mut base_key = if key == "_" {
            "_".to_string()
        } else {
            base.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("_")
        };
        // "esc" is accepted as an alias for the full key name.
        if base_key == "esc" {
            base_key = "escape".to_string();
        }
        if options.layout_independent {
            base_key = convert_key_to_code(&base_key);
        }
        let has = |t: &str| tokens.iter().any(|token| token == t);
        ShortcutDescriptor {
            key: base_key,
            ctrl: has("ctrl"),
            meta: has("meta") || has("command"),
            shift: has("shift"),
            alt: has("alt") || has("option"),
            chained: false,
            keydown: binding.keydown,
            keyup: binding.keyup,
            using_input: binding.using_input,
        }
    };

    if !options.apple && descriptor.meta && !descriptor.ctrl {
        descriptor.meta = false;
        descriptor.ctrl = true;
    }

    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(
        bindings: Vec<(&str, ShortcutBinding<&'static str>)>,
    ) -> ShortcutDispatcher<&'static str> {
        ShortcutDispatcher::new(
            bindings,
            ShortcutOptions {
                apple: false,
                ..Default::default()
            },
        )
    }

    #[test]
    fn single_key_matches_case_insensitively() {
        let mut d = dispatcher(vec![("r", ShortcutBinding::keydown("rect"))]);
        let cmd = d.on_key_down(&KeyEvent::new("R", "KeyR"), &InputFocus::None);
        assert_eq!(cmd, Some("rect"));
    }

    #[test]
    fn chained_match_fires_once_and_skips_single_binding() {
        let mut d = dispatcher(vec![
            ("g-r", ShortcutBinding::keydown("chained")),
            ("r", ShortcutBinding::keydown("single")),
        ]);
        let now = Instant::now();
        assert_eq!(
            d.on_key_down_at(&KeyEvent::new("g", "KeyG"), &InputFocus::None, now),
            None
        );
        assert_eq!(
            d.on_key_down_at(
                &KeyEvent::new("r", "KeyR"),
                &InputFocus::None,
                now + Duration::from_millis(100)
            ),
            Some("chained")
        );
    }

    #[test]
    fn chain_window_expiry_falls_back_to_single_binding() {
        let mut d = dispatcher(vec![
            ("g-r", ShortcutBinding::keydown("chained")),
            ("r", ShortcutBinding::keydown("single")),
        ]);
        let now = Instant::now();
        d.on_key_down_at(&KeyEvent::new("g", "KeyG"), &InputFocus::None, now);
        let cmd = d.on_key_down_at(
            &KeyEvent::new("r", "KeyR"),
            &InputFocus::None,
            now + Duration::from_millis(900),
        );
        assert_eq!(cmd, Some("single"));
    }

    #[test]
    fn meta_rewrites_to_ctrl_off_apple() {
        let mut d = dispatcher(vec![("meta_s", ShortcutBinding::keydown("save"))]);
        assert_eq!(
            d.on_key_down(&KeyEvent::new("s", "KeyS").with_ctrl(), &InputFocus::None),
            Some("save")
        );
        assert_eq!(
            d.on_key_down(&KeyEvent::new("s", "KeyS").with_meta(), &InputFocus::None),
            None
        );
    }

    #[test]
    fn meta_stays_meta_on_apple() {
        let mut d = ShortcutDispatcher::new(
            vec![("meta_s", ShortcutBinding::keydown("save"))],
            ShortcutOptions {
                apple: true,
                ..Default::default()
            },
        );
        assert_eq!(
            d.on_key_down(&KeyEvent::new("s", "KeyS").with_meta(), &InputFocus::None),
            Some("save")
        );
    }

    #[test]
    fn shift_ignored_for_symbol_keys() {
        let mut d = dispatcher(vec![("?", ShortcutBinding::keydown("help"))]);
        assert_eq!(
            d.on_key_down(&KeyEvent::new("?", "Slash").with_shift(), &InputFocus::None),
            Some("help")
        );
    }

    #[test]
    fn shift_checked_for_alphabet_keys() {
        let mut d = dispatcher(vec![("r", ShortcutBinding::keydown("rect"))]);
        assert_eq!(
            d.on_key_down(&KeyEvent::new("R", "KeyR").with_shift(), &InputFocus::None),
            None
        );
    }

    #[test]
    fn editable_focus_swallows_unless_opted_in() {
        let mut d = dispatcher(vec![
            ("r", ShortcutBinding::keydown("rect")),
            (
                "enter",
                ShortcutBinding::keydown("submit").with_using_input(UsingInput::Always),
            ),
            (
                "s",
                ShortcutBinding::keydown("search")
                    .with_using_input(UsingInput::Field("search".to_string())),
            ),
        ]);
        let focus = InputFocus::editable("search");
        assert_eq!(d.on_key_down(&KeyEvent::new("r", "KeyR"), &focus), None);
        assert_eq!(
            d.on_key_down(&KeyEvent::new("Enter", "Enter"), &focus),
            Some("submit")
        );
        assert_eq!(d.on_key_down(&KeyEvent::new("s", "KeyS"), &focus), Some("search"));
        assert_eq!(
            d.on_key_down(&KeyEvent::new("s", "KeyS"), &InputFocus::editable("other")),
            None
        );
    }

    #[test]
    fn keyup_matches_base_key_without_modifiers() {
        let mut d = dispatcher(vec![(" ", ShortcutBinding::hold("pan-start", "pan-end"))]);
        assert_eq!(
            d.on_key_down(&KeyEvent::new(" ", "Space"), &InputFocus::None),
            Some("pan-start")
        );
        assert_eq!(
            d.on_key_up(&KeyEvent::new(" ", "Space").with_ctrl(), &InputFocus::None),
            Some("pan-end")
        );
    }

    #[test]
    fn handler_less_binding_is_dropped() {
        let d = dispatcher(vec![("x", ShortcutBinding::default())]);
        assert_eq!(d.descriptor_count(), 0);
    }

    #[test]
    fn layout_independent_matches_physical_codes() {
        let mut d = ShortcutDispatcher::new(
            vec![("g-r", ShortcutBinding::keydown("chained"))],
            ShortcutOptions {
                apple: false,
                layout_independent: true,
                ..Default::default()
            },
        );
        let now = Instant::now();
        // A non-QWERTY layout produces different characters on the same keys.
        d.on_key_down_at(&KeyEvent::new("u", "KeyG"), &InputFocus::None, now);
        let cmd = d.on_key_down_at(
            &KeyEvent::new("p", "KeyR"),
            &InputFocus::None,
            now + Duration::from_millis(50),
        );
        assert_eq!(cmd, Some("chained"));
    }

    #[test]
    fn esc_alias_compiles_to_escape() {
        let mut d = dispatcher(vec![("esc", ShortcutBinding::keydown("cancel"))]);
        assert_eq!(
            d.on_key_down(&KeyEvent::new("Escape", "Escape"), &InputFocus::None),
            Some("cancel")
        );
    }
}
