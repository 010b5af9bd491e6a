use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// How urgently a screen reader should read an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Read when the user is idle.
    #[default]
    Polite,
    /// Interrupt whatever is being read.
    Assertive,
}

impl Priority {
    /// The matching `aria-live` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Polite => "polite",
            Priority::Assertive => "assertive",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for screen-reader announcements.
pub trait Announcer {
    fn announce(&self, message: &str, priority: Priority);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub message: String,
    pub priority: Priority,
}

/// A pair of live regions, one per [`Priority`], plus a bounded history.
#[derive(Debug)]
pub struct LiveRegion {
    polite: RefCell<Option<String>>,
    assertive: RefCell<Option<String>>,
    history: RefCell<VecDeque<Announcement>>,
    capacity: usize,
}

impl LiveRegion {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            polite: RefCell::new(None),
            assertive: RefCell::new(None),
            history: RefCell::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Text currently in the region for `priority`.
    pub fn current(&self, priority: Priority) -> Option<String> {
        self.region(priority).borrow().clone()
    }

    /// Announcements, oldest first.
    pub fn history(&self) -> Vec<Announcement> {
        self.history.borrow().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.polite.borrow_mut().take();
        self.assertive.borrow_mut().take();
    }

    fn region(&self, priority: Priority) -> &RefCell<Option<String>> {
        match priority {
            Priority::Polite => &self.polite,
            Priority::Assertive => &self.assertive,
        }
    }
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for LiveRegion {
    fn announce(&self, message: &str, priority: Priority) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        log::debug!("Announcing ({priority}): {message}");
        *self.region(priority).borrow_mut() = Some(message.to_string());

        let mut history = self.history.borrow_mut();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(Announcement {
            message: message.to_string(),
            priority,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults_to_polite() {
        assert_eq!(Priority::default(), Priority::Polite);
        assert_eq!(Priority::Assertive.as_str(), "assertive");
    }

    #[test]
    fn test_regions_are_independent() {
        let region = LiveRegion::new();
        region.announce("Saved", Priority::Polite);
        region.announce("Connection lost", Priority::Assertive);

        assert_eq!(region.current(Priority::Polite).as_deref(), Some("Saved"));
        assert_eq!(
            region.current(Priority::Assertive).as_deref(),
            Some("Connection lost")
        );

        region.clear();
        assert_eq!(region.current(Priority::Polite), None);
        assert_eq!(region.history().len(), 2);
    }

    #[test]
    fn test_blank_messages_are_ignored() {
        let region = LiveRegion::new();
        region.announce("   ", Priority::Assertive);
        assert!(region.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let region = LiveRegion::with_capacity(2);
        for message in ["one", "two", "three"] {
            region.announce(message, Priority::Polite);
        }
        let messages: Vec<String> = region.history().into_iter().map(|a| a.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }
}
