//! Host-environment seam for the controllers.
//!
//! Controllers never talk to a terminal or a page directly. Everything a
//! host must do for them (switching surfaces, blocking notifications,
//! confirmations and displaying rendered views) goes through [`Shell`].

use std::collections::VecDeque;
use std::fmt;

/// A navigable surface of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Unauthenticated entry surface (login and register forms).
    Login,
    /// Customer list, the main record-list surface.
    Customers,
    /// Order list.
    Orders,
}

impl Surface {
    /// Surface shown after a successful login or registration.
    pub const HOME: Self = Self::Customers;

    /// Whether this surface may be shown without a credential.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Login)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Customers => write!(f, "customers"),
            Self::Orders => write!(f, "orders"),
        }
    }
}

/// Host environment driven by the controllers.
pub trait Shell {
    /// Switch to another surface.
    fn navigate(&mut self, surface: Surface);

    /// Show a blocking notification.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `false` cancels the pending action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Display freshly rendered content for a surface.
    fn present(&mut self, surface: Surface, content: &str);
}

/// Something a [`RecordingShell`] observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Navigate(Surface),
    Alert(String),
    Confirm(String),
    Present(Surface, String),
}

/// Headless shell that records every interaction.
///
/// Confirmations are answered from a queue of scripted answers, falling back
/// to a default once the queue is empty.
#[derive(Debug, Default)]
pub struct RecordingShell {
    events: Vec<ShellEvent>,
    answers: VecDeque<bool>,
    default_answer: bool,
}

impl RecordingShell {
    /// Create a shell that declines every confirmation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shell that accepts every confirmation.
    #[must_use]
    pub fn confirming() -> Self {
        Self {
            default_answer: true,
            ..Self::default()
        }
    }

    /// Queue the answer for the next confirmation.
    pub fn answer_next(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ShellEvent] {
        &self.events
    }

    /// Surfaces navigated to, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<Surface> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ShellEvent::Navigate(surface) => Some(*surface),
                _ => None,
            })
            .collect()
    }

    /// Alert messages, in order.
    #[must_use]
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ShellEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Confirmation prompts, in order.
    #[must_use]
    pub fn confirmations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ShellEvent::Confirm(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Content most recently presented for `surface`.
    #[must_use]
    pub fn last_presented(&self, surface: Surface) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            ShellEvent::Present(s, content) if *s == surface => Some(content.as_str()),
            _ => None,
        })
    }

    /// Forget recorded events, keeping queued answers.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Shell for RecordingShell {
    fn navigate(&mut self, surface: Surface) {
        self.events.push(ShellEvent::Navigate(surface));
    }

    fn alert(&mut self, message: &str) {
        self.events.push(ShellEvent::Alert(message.to_owned()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.events.push(ShellEvent::Confirm(message.to_owned()));
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn present(&mut self, surface: Surface, content: &str) {
        self.events
            .push(ShellEvent::Present(surface, content.to_owned()));
    }
}
