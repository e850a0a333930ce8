//! The value bundle delivered with every routed event.
//!
//! An [`EventParameter`] describes one input occurrence: which button was
//! involved, the text-producing keycode, the in-progress IME composition,
//! the held modifiers, the pointer position and whether a release happened
//! outside its region. Each optional field has its own presence flag
//! (`has_*`), and reading a field that is absent returns a documented
//! neutral default instead of failing.
//!
//! # Textual Rendering
//!
//! `Display` prints the fields in this fixed order, separated by single
//! spaces, so tests and logs can compare rendered parameters directly:
//!
//! 1. `button=<name>` or `button=none`
//! 2. `repeat=<bool>`
//! 3. `keycode=<n>` (only when present)
//! 4. `candidate="<text>" highlight=<start>..<end> cursor=<pos>` (only when present)
//! 5. `modifiers={<name>, ...}`
//! 6. `mouse=(<x>, <y>)` (only when present)
//! 7. `outside=<bool>`
//!
//! For example: `button=mouse1 repeat=false modifiers={lshift} mouse=(0.5, 0.25) outside=true`.

use std::fmt;

use crate::button::Button;
use crate::error::CandidateError;
use crate::geometry::Point;
use crate::modifiers::ModifierState;

/// An in-progress IME composition.
///
/// Offsets are character (not byte) indices into `text`, with
/// `highlight_start <= highlight_end <= len` and `cursor <= len`. The
/// constructor enforces this, so a `Candidate` is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    text: String,
    highlight_start: usize,
    highlight_end: usize,
    cursor: usize,
}

impl Candidate {
    /// Create a candidate, validating the offsets against the text.
    pub fn new(
        text: impl Into<String>,
        highlight_start: usize,
        highlight_end: usize,
        cursor: usize,
    ) -> Result<Self, CandidateError> {
        let text = text.into();
        validate_offsets(&text, highlight_start, highlight_end, cursor)?;
        Ok(Self {
            text,
            highlight_start,
            highlight_end,
            cursor,
        })
    }

    /// The composed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start of the highlighted range, in characters.
    pub fn highlight_start(&self) -> usize {
        self.highlight_start
    }

    /// End of the highlighted range, in characters.
    pub fn highlight_end(&self) -> usize {
        self.highlight_end
    }

    /// Edit cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the composed text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the composed text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Check candidate offsets against `text`.
pub(crate) fn validate_offsets(
    text: &str,
    highlight_start: usize,
    highlight_end: usize,
    cursor: usize,
) -> Result<(), CandidateError> {
    let len = text.chars().count();
    if highlight_start > highlight_end {
        return Err(CandidateError::HighlightReversed {
            start: highlight_start,
            end: highlight_end,
        });
    }
    if highlight_end > len {
        return Err(CandidateError::HighlightOutOfRange {
            end: highlight_end,
            len,
        });
    }
    if cursor > len {
        return Err(CandidateError::CursorOutOfRange { cursor, len });
    }
    Ok(())
}

/// Description of one input occurrence.
///
/// Construction yields a parameter with every field absent; each `set_*`
/// method sets exactly one field together with its presence flag.
///
/// | field      | absent default        |
/// |------------|-----------------------|
/// | button     | `None` (no button)    |
/// | keyrepeat  | `false`               |
/// | keycode    | `0`                   |
/// | candidate  | `""`, offsets `0`     |
/// | modifiers  | nothing held          |
/// | mouse      | [`Point::ZERO`]       |
/// | outside    | `false`               |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventParameter {
    button: Option<Button>,
    keyrepeat: bool,
    keycode: Option<u32>,
    candidate: Option<Candidate>,
    modifiers: ModifierState,
    mouse: Option<Point>,
    outside: bool,
}

impl EventParameter {
    /// Create a parameter with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: impl Into<Button>) {
        self.button = Some(button.into());
    }

    pub fn has_button(&self) -> bool {
        self.button.is_some()
    }

    /// The button involved, or `None` for events without one.
    pub fn button(&self) -> Option<Button> {
        self.button
    }

    pub fn set_keyrepeat(&mut self, keyrepeat: bool) {
        self.keyrepeat = keyrepeat;
    }

    /// Check if this press was generated by key auto-repeat.
    ///
    /// Always `false` when no button is present.
    pub fn is_keyrepeat(&self) -> bool {
        self.button.is_some() && self.keyrepeat
    }

    pub fn set_keycode(&mut self, keycode: u32) {
        self.keycode = Some(keycode);
    }

    pub fn has_keycode(&self) -> bool {
        self.keycode.is_some()
    }

    /// The raw platform keycode, or `0` when absent.
    pub fn keycode(&self) -> u32 {
        self.keycode.unwrap_or(0)
    }

    /// The keycode as a character, if it is a valid Unicode scalar.
    pub fn keycode_char(&self) -> Option<char> {
        self.keycode.and_then(char::from_u32)
    }

    pub fn set_candidate(&mut self, candidate: Candidate) {
        self.candidate = Some(candidate);
    }

    /// Remove the candidate, leaving every other field untouched.
    pub fn clear_candidate(&mut self) {
        self.candidate = None;
    }

    pub fn has_candidate(&self) -> bool {
        self.candidate.is_some()
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    /// The composed text, or `""` when absent.
    pub fn candidate_string(&self) -> &str {
        self.candidate.as_ref().map_or("", Candidate::text)
    }

    /// Highlight start, or `0` when absent.
    pub fn highlight_start(&self) -> usize {
        self.candidate.as_ref().map_or(0, Candidate::highlight_start)
    }

    /// Highlight end, or `0` when absent.
    pub fn highlight_end(&self) -> usize {
        self.candidate.as_ref().map_or(0, Candidate::highlight_end)
    }

    /// Edit cursor position, or `0` when absent.
    pub fn cursor_pos(&self) -> usize {
        self.candidate.as_ref().map_or(0, Candidate::cursor)
    }

    pub fn set_modifiers(&mut self, modifiers: ModifierState) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    pub fn set_mouse_position(&mut self, position: Point) {
        self.mouse = Some(position);
    }

    pub fn has_mouse_position(&self) -> bool {
        self.mouse.is_some()
    }

    /// The pointer position, or [`Point::ZERO`] when absent.
    pub fn mouse_position(&self) -> Point {
        self.mouse.unwrap_or(Point::ZERO)
    }

    pub fn set_outside(&mut self, outside: bool) {
        self.outside = outside;
    }

    /// For releases: whether the pointer had left the region by then.
    pub fn is_outside(&self) -> bool {
        self.outside
    }
}

impl fmt::Display for EventParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.button {
            Some(button) => write!(f, "button={button}")?,
            None => f.write_str("button=none")?,
        }
        write!(f, " repeat={}", self.is_keyrepeat())?;
        if let Some(keycode) = self.keycode {
            write!(f, " keycode={keycode}")?;
        }
        if let Some(candidate) = &self.candidate {
            write!(
                f,
                " candidate={:?} highlight={}..{} cursor={}",
                candidate.text, candidate.highlight_start, candidate.highlight_end, candidate.cursor
            )?;
        }
        write!(f, " modifiers={}", self.modifiers)?;
        if let Some(mouse) = self.mouse {
            write!(f, " mouse={mouse}")?;
        }
        write!(f, " outside={}", self.outside)
    }
}

static_assertions::assert_impl_all!(EventParameter: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{Key, MouseButton};

    #[test]
    fn test_new_parameter_is_absent() {
        let param = EventParameter::new();
        assert!(!param.has_button());
        assert_eq!(param.button(), None);
        assert!(!param.is_keyrepeat());
        assert!(!param.has_keycode());
        assert_eq!(param.keycode(), 0);
        assert!(!param.has_candidate());
        assert_eq!(param.candidate_string(), "");
        assert_eq!(param.highlight_start(), 0);
        assert_eq!(param.highlight_end(), 0);
        assert_eq!(param.cursor_pos(), 0);
        assert!(!param.modifiers().any());
        assert!(!param.has_mouse_position());
        assert_eq!(param.mouse_position(), Point::ZERO);
        assert!(!param.is_outside());
    }

    #[test]
    fn test_setters_touch_one_field() {
        let mut param = EventParameter::new();
        param.set_keycode(97);
        let before = param.clone();

        param.set_mouse_position(Point::new(0.5, -0.5));
        assert_eq!(param.keycode(), before.keycode());
        assert_eq!(param.button(), before.button());
        assert_eq!(param.candidate(), before.candidate());
        assert!(param.has_mouse_position());

        param.set_candidate(Candidate::new("ab", 0, 1, 1).unwrap());
        assert_eq!(param.mouse_position(), Point::new(0.5, -0.5));
        assert_eq!(param.keycode(), 97);

        param.clear_candidate();
        assert!(!param.has_candidate());
        assert_eq!(param.keycode(), 97);
        assert!(param.has_mouse_position());
    }

    #[test]
    fn test_keyrepeat_requires_button() {
        let mut param = EventParameter::new();
        param.set_keyrepeat(true);
        assert!(!param.is_keyrepeat());

        param.set_button(Key::A);
        assert!(param.is_keyrepeat());
    }

    #[test]
    fn test_candidate_offsets_are_characters() {
        let candidate = Candidate::new("你好", 0, 2, 2).unwrap();
        assert_eq!(candidate.len(), 2);
        assert!(Candidate::new("你好", 0, 3, 0).is_err());
    }

    #[test]
    fn test_candidate_validation() {
        assert_eq!(
            Candidate::new("ab", 3, 3, 0),
            Err(CandidateError::HighlightOutOfRange { end: 3, len: 2 })
        );
        assert_eq!(
            Candidate::new("hello", 3, 1, 0),
            Err(CandidateError::HighlightReversed { start: 3, end: 1 })
        );
        assert_eq!(
            Candidate::new("hello", 1, 3, 6),
            Err(CandidateError::CursorOutOfRange { cursor: 6, len: 5 })
        );
        assert!(Candidate::new("", 0, 0, 0).is_ok());
    }

    #[test]
    fn test_display_minimal() {
        let param = EventParameter::new();
        assert_eq!(param.to_string(), "button=none repeat=false modifiers={} outside=false");
    }

    #[test]
    fn test_display_full() {
        let mut modifiers = ModifierState::new();
        modifiers.set(Key::ShiftLeft, true);

        let mut param = EventParameter::new();
        param.set_button(MouseButton::Left);
        param.set_keycode(104);
        param.set_candidate(Candidate::new("hello", 1, 3, 2).unwrap());
        param.set_modifiers(modifiers);
        param.set_mouse_position(Point::new(0.5, 0.25));
        param.set_outside(true);

        assert_eq!(
            param.to_string(),
            "button=mouse1 repeat=false keycode=104 candidate=\"hello\" highlight=1..3 cursor=2 \
             modifiers={lshift} mouse=(0.5, 0.25) outside=true"
        );
    }
}
