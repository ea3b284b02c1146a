use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::Subscription;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener: Cell<u64>,
}

/// Shared, observable value.
///
/// Cloning an `Atom` yields another handle to the same cell. Listeners run
/// synchronously inside [`set`](Self::set), after the new value is stored,
/// and receive a snapshot so they may read or write the atom again.
pub struct Atom<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Clone + PartialEq + 'static> Atom<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value`. Listeners are notified only if the value changed.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.notify(&value);
        true
    }

    /// Applies `f` to a copy of the value and stores the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Registers `listener`, called with the new value after every change.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, value: &T) {
        // Snapshot so listeners can subscribe or unsubscribe while running.
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            listener(value);
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Atom").field(&*self.inner.value.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_notifies_only_on_change() {
        let atom = Atom::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = atom.subscribe(move |v| sink.borrow_mut().push(*v));

        assert!(atom.set(2));
        assert!(!atom.set(2));
        atom.update(|v| v + 1);

        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let atom = Atom::new(false);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = atom.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(atom.listener_count(), 1);

        atom.set(true);
        drop(sub);
        atom.set(false);

        assert_eq!(hits.get(), 1);
        assert_eq!(atom.listener_count(), 0);
    }

    #[test]
    fn listener_may_write_back() {
        let atom = Atom::new(0u32);
        let handle = atom.clone();
        let _sub = atom.subscribe(move |v| {
            if *v < 3 {
                handle.set(v + 1);
            }
        });

        atom.set(1);
        assert_eq!(atom.get(), 3);
    }

    #[test]
    fn subscription_outliving_atom_is_harmless() {
        let sub = {
            let atom = Atom::new(0);
            atom.subscribe(|_| {})
        };
        sub.unsubscribe();
    }
}
