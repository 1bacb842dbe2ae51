/// Value-holding input controls with change notification
///
/// A `Control` stands in for a toolkit widget: it holds a value, records a
/// change notification whenever the value changes, and can have its
/// notifications blocked while code writes to it programmatically.

/// An input control holding one value
#[derive(Debug, Clone, PartialEq)]
pub struct Control<T> {
    value: T,
    blocked: bool,
    notifications: usize,
}

impl<T: Copy + PartialEq> Control<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            blocked: false,
            notifications: 0,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Store a value. Emits a notification if it changed and signals are not blocked.
    pub fn set_value(&mut self, value: T) {
        if self.value == value {
            return;
        }
        self.value = value;
        if !self.blocked {
            self.notifications += 1;
        }
    }

    pub fn block_signals(&mut self, block: bool) {
        self.blocked = block;
    }

    pub fn signals_blocked(&self) -> bool {
        self.blocked
    }

    /// Drain pending change notifications, returning how many there were
    pub fn take_notifications(&mut self) -> usize {
        std::mem::take(&mut self.notifications)
    }

    pub fn pending_notifications(&self) -> usize {
        self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_notifies() {
        let mut control = Control::new(1.0);
        control.set_value(2.0);
        control.set_value(2.0);
        assert_eq!(control.take_notifications(), 1);
        assert_eq!(control.pending_notifications(), 0);
    }

    #[test]
    fn test_blocked_writes_are_silent() {
        let mut control = Control::new(5u32);
        control.block_signals(true);
        assert!(control.signals_blocked());
        control.set_value(7);
        control.block_signals(false);
        assert!(!control.signals_blocked());

        assert_eq!(control.value(), 7);
        assert_eq!(control.pending_notifications(), 0);
    }
}
