//! Command-driven hotkey registry adapter
//!
//! There is no portable global-hotkey API for a headless CLI, so the
//! desktop environment binds the key and runs `plansnap daemon hotkey`;
//! the daemon's IPC layer forwards that to `dispatch`. Registration
//! semantics still live here: at most one live callback per combo,
//! replace on re-register.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{HotkeyCallback, HotkeyError, HotkeyHandle, HotkeyRegistry};
use crate::domain::hotkey::KeyCombo;

struct Registered {
    id: u64,
    callback: HotkeyCallback,
}

/// In-process hotkey registry fed by daemon commands
#[derive(Default)]
pub struct CommandHotkeys {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    bindings: HashMap<KeyCombo, Registered>,
}

impl CommandHotkeys {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the callback registered for a combo.
    ///
    /// # Returns
    /// Whether a callback was registered for the combo
    pub fn dispatch(&self, combo: &KeyCombo) -> bool {
        let callback = {
            let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.bindings.get(combo).map(|r| r.callback.clone())
        };

        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => {
                log::debug!("no hotkey registered for {}", combo);
                false
            }
        }
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .bindings
            .len()
    }

    /// Whether no combos are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HotkeyRegistry for CommandHotkeys {
    fn register(
        &self,
        combo: KeyCombo,
        callback: HotkeyCallback,
    ) -> Result<HotkeyHandle, HotkeyError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let id = inner.next_id;

        if inner
            .bindings
            .insert(combo.clone(), Registered { id, callback })
            .is_some()
        {
            log::debug!("replaced prior registration for {}", combo);
        }

        Ok(HotkeyHandle { id, combo })
    }

    fn unregister(&self, handle: HotkeyHandle) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Only remove if the handle still owns the binding; a stale
        // handle from before a re-register is a no-op.
        if inner
            .bindings
            .get(&handle.combo)
            .is_some_and(|r| r.id == handle.id)
        {
            inner.bindings.remove(&handle.combo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_callback() -> (Arc<AtomicUsize>, HotkeyCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let cloned = Arc::clone(&count);
        (count, Arc::new(move || {
            cloned.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn dispatch_fires_registered_callback() {
        let registry = CommandHotkeys::new();
        let (count, callback) = counter_callback();
        registry
            .register(KeyCombo::default_capture(), callback)
            .unwrap();

        assert!(registry.dispatch(&KeyCombo::default_capture()));
        assert!(registry.dispatch(&KeyCombo::default_capture()));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dispatch_without_registration_is_false() {
        let registry = CommandHotkeys::new();
        assert!(!registry.dispatch(&KeyCombo::default_capture()));
    }

    #[test]
    fn reregister_replaces_prior_callback() {
        let registry = CommandHotkeys::new();
        let combo = KeyCombo::default_capture();

        let (old_count, old_callback) = counter_callback();
        let (new_count, new_callback) = counter_callback();

        registry.register(combo.clone(), old_callback).unwrap();
        registry.register(combo.clone(), new_callback).unwrap();

        registry.dispatch(&combo);
        assert_eq!(old_count.load(Ordering::SeqCst), 0);
        assert_eq!(new_count.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn stale_handle_unregister_is_a_no_op() {
        let registry = CommandHotkeys::new();
        let combo = KeyCombo::default_capture();

        let (_, old_callback) = counter_callback();
        let (new_count, new_callback) = counter_callback();

        let stale = registry.register(combo.clone(), old_callback).unwrap();
        registry.register(combo.clone(), new_callback).unwrap();

        registry.unregister(stale);
        assert!(registry.dispatch(&combo));
        assert_eq!(new_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregister_removes_live_binding() {
        let registry = CommandHotkeys::new();
        let (_, callback) = counter_callback();

        let handle = registry
            .register(KeyCombo::default_capture(), callback)
            .unwrap();
        registry.unregister(handle);

        assert!(registry.is_empty());
        assert!(!registry.dispatch(&KeyCombo::default_capture()));
    }

    #[test]
    fn different_combos_are_independent() {
        let registry = CommandHotkeys::new();
        let (count_a, callback_a) = counter_callback();
        let (count_b, callback_b) = counter_callback();

        let combo_a: KeyCombo = "ctrl+alt+a".parse().unwrap();
        let combo_b: KeyCombo = "ctrl+alt+b".parse().unwrap();

        registry.register(combo_a.clone(), callback_a).unwrap();
        registry.register(combo_b.clone(), callback_b).unwrap();

        registry.dispatch(&combo_a);
        assert_eq!(count_a.load(Ordering::SeqCst), 1);
        assert_eq!(count_b.load(Ordering::SeqCst), 0);
    }
}
