//! Raw device samples and the queue that carries them.
//!
//! The device layer describes what happened as [`InputSample`]s. They can be
//! fed to a [`Dispatcher`](crate::Dispatcher) directly with
//! [`feed_sample`](crate::Dispatcher::feed_sample), or, when the device is
//! polled on another thread, sent through a [`sample_queue`] and drained on
//! the thread that owns the dispatcher.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_input::{sample_queue, Dispatcher, InputSample, Point};
//!
//! let (sender, receiver) = sample_queue();
//!
//! std::thread::spawn(move || {
//!     sender.send(InputSample::Position(Point::new(0.1, 0.2))).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! let mut dispatcher = Dispatcher::new();
//! assert_eq!(dispatcher.drain(&receiver).unwrap(), 1);
//! assert_eq!(dispatcher.mouse_position(), Some(Point::new(0.1, 0.2)));
//! ```

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::button::Button;
use crate::error::{InputError, Result};
use crate::geometry::Point;

/// Direction of a button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonTransition {
    Down,
    Up,
}

/// One raw sample from the device layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSample {
    /// The pointer is at this position.
    Position(Point),
    /// The pointer is no longer over the viewport.
    PointerLost,
    /// A button went down or up.
    Button {
        button: Button,
        transition: ButtonTransition,
        /// Auto-repeat press; ignored for `Up`.
        is_keyrepeat: bool,
        /// Raw platform keycode for text-producing keys.
        keycode: Option<u32>,
    },
    /// A text-producing key was typed.
    Keystroke(u32),
    /// The IME composition changed; empty text clears it.
    Candidate {
        text: String,
        highlight_start: usize,
        highlight_end: usize,
        cursor: usize,
    },
}

impl InputSample {
    /// A plain press of `button`.
    pub fn button_down(button: impl Into<Button>) -> Self {
        Self::Button {
            button: button.into(),
            transition: ButtonTransition::Down,
            is_keyrepeat: false,
            keycode: None,
        }
    }

    /// An auto-repeat press of `button`.
    pub fn key_repeat(button: impl Into<Button>) -> Self {
        Self::Button {
            button: button.into(),
            transition: ButtonTransition::Down,
            is_keyrepeat: true,
            keycode: None,
        }
    }

    /// A release of `button`.
    pub fn button_up(button: impl Into<Button>) -> Self {
        Self::Button {
            button: button.into(),
            transition: ButtonTransition::Up,
            is_keyrepeat: false,
            keycode: None,
        }
    }

    /// A candidate update.
    pub fn candidate(
        text: impl Into<String>,
        highlight_start: usize,
        highlight_end: usize,
        cursor: usize,
    ) -> Self {
        Self::Candidate {
            text: text.into(),
            highlight_start,
            highlight_end,
            cursor,
        }
    }

    /// A candidate update that clears the composition.
    pub fn clear_candidate() -> Self {
        Self::candidate(String::new(), 0, 0, 0)
    }
}

/// Create a single-producer/single-consumer queue of samples.
pub fn sample_queue() -> (SampleSender, SampleReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (SampleSender { tx }, SampleReceiver { rx })
}

/// The producing half of a [`sample_queue`], owned by the device layer.
#[derive(Debug)]
pub struct SampleSender {
    tx: Sender<InputSample>,
}

impl SampleSender {
    /// Queue a sample.
    ///
    /// Fails with [`InputError::QueueDisconnected`] once the receiver is gone.
    pub fn send(&self, sample: InputSample) -> Result<()> {
        self.tx
            .send(sample)
            .map_err(|_| InputError::QueueDisconnected)
    }
}

/// The consuming half of a [`sample_queue`], owned next to the dispatcher.
#[derive(Debug)]
pub struct SampleReceiver {
    rx: Receiver<InputSample>,
}

impl SampleReceiver {
    /// Take the next queued sample without blocking.
    pub fn try_recv(&self) -> Option<InputSample> {
        match self.rx.try_recv() {
            Ok(sample) => Some(sample),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until a sample arrives.
    ///
    /// Fails with [`InputError::QueueDisconnected`] once the sender is gone
    /// and the queue is empty.
    pub fn recv(&self) -> Result<InputSample> {
        self.rx.recv().map_err(|_| InputError::QueueDisconnected)
    }

    /// Number of samples waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

static_assertions::assert_impl_all!(SampleSender: Send);
static_assertions::assert_impl_all!(SampleReceiver: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{Key, MouseButton};

    #[test]
    fn test_queue_preserves_order() {
        let (sender, receiver) = sample_queue();
        sender.send(InputSample::Position(Point::ZERO)).unwrap();
        sender.send(InputSample::button_down(MouseButton::Left)).unwrap();
        sender.send(InputSample::Keystroke(97)).unwrap();
        assert_eq!(receiver.len(), 3);

        assert_eq!(receiver.try_recv(), Some(InputSample::Position(Point::ZERO)));
        assert_eq!(receiver.try_recv(), Some(InputSample::button_down(MouseButton::Left)));
        assert_eq!(receiver.try_recv(), Some(InputSample::Keystroke(97)));
        assert_eq!(receiver.try_recv(), None);
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_disconnection() {
        let (sender, receiver) = sample_queue();
        sender.send(InputSample::PointerLost).unwrap();
        drop(sender);

        // Queued samples survive the sender.
        assert_eq!(receiver.recv(), Ok(InputSample::PointerLost));
        assert_eq!(receiver.recv(), Err(InputError::QueueDisconnected));

        let (sender, receiver) = sample_queue();
        drop(receiver);
        assert_eq!(
            sender.send(InputSample::PointerLost),
            Err(InputError::QueueDisconnected)
        );
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            InputSample::key_repeat(Key::A),
            InputSample::Button {
                button: Button::Key(Key::A),
                transition: ButtonTransition::Down,
                is_keyrepeat: true,
                keycode: None,
            }
        );
        assert_eq!(
            InputSample::clear_candidate(),
            InputSample::Candidate {
                text: String::new(),
                highlight_start: 0,
                highlight_end: 0,
                cursor: 0,
            }
        );
    }
}
