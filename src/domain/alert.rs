//! Process-wide alert banner state.

/// The single optional alert text shown to every connected client.
///
/// Any session may set or clear it. Memory-only: an alert does not survive a
/// restart and is never part of the board snapshot.
#[derive(Debug, Default)]
pub struct AlertState {
    current: Option<String>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: String) {
        self.current = Some(text);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
