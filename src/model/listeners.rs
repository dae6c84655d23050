//! Host-implemented callback capabilities.
//!
//! Modules never store bare closures: every callback is one of the traits
//! below, wrapped in a [`Callback`] so descriptors stay `Clone + Debug`.
//! Closures implement the traits through blanket impls.

use super::value::ModuleValue;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Notified when a toggle module changes value.
pub trait ToggleListener: Send + Sync {
    /// Called with the newly written value.
    fn on_toggled(&self, value: bool);
}

impl<F> ToggleListener for F
where
    F: Fn(bool) + Send + Sync,
{
    fn on_toggled(&self, value: bool) {
        self(value)
    }
}

/// Notified when a button module is pressed.
pub trait ButtonListener: Send + Sync {
    /// Called once per press.
    fn on_button_pressed(&self);
}

impl<F> ButtonListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_button_pressed(&self) {
        self()
    }
}

/// Notified when an item of a list module is selected.
pub trait SelectionListener: Send + Sync {
    /// Called with the id of the selected item.
    fn on_item_selected(&self, item_id: &str);
}

impl<F> SelectionListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_item_selected(&self, item_id: &str) {
        self(item_id)
    }
}

/// Notified when a value-wrapper module commits a new value.
pub trait ValueListener: Send + Sync {
    /// Called with the committed value.
    fn on_value_changed(&self, value: &ModuleValue);
}

impl<F> ValueListener for F
where
    F: Fn(&ModuleValue) + Send + Sync,
{
    fn on_value_changed(&self, value: &ModuleValue) {
        self(value)
    }
}

/// Shared handle to a host callback.
pub struct Callback<L: ?Sized>(Arc<L>);

impl<L: ?Sized> Callback<L> {
    /// Wrap an already shared listener.
    pub fn from_arc(listener: Arc<L>) -> Self {
        Self(listener)
    }
}

impl Callback<dyn ToggleListener> {
    /// Wrap a toggle listener.
    pub fn toggle(listener: impl ToggleListener + 'static) -> Self {
        let listener: Arc<dyn ToggleListener> = Arc::new(listener);
        Self(listener)
    }
}

impl Callback<dyn ButtonListener> {
    /// Wrap a button listener.
    pub fn button(listener: impl ButtonListener + 'static) -> Self {
        let listener: Arc<dyn ButtonListener> = Arc::new(listener);
        Self(listener)
    }
}

impl Callback<dyn SelectionListener> {
    /// Wrap a selection listener.
    pub fn selection(listener: impl SelectionListener + 'static) -> Self {
        let listener: Arc<dyn SelectionListener> = Arc::new(listener);
        Self(listener)
    }
}

impl Callback<dyn ValueListener> {
    /// Wrap a value listener.
    pub fn value(listener: impl ValueListener + 'static) -> Self {
        let listener: Arc<dyn ValueListener> = Arc::new(listener);
        Self(listener)
    }
}

impl<L: ?Sized> Clone for Callback<L> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<L: ?Sized> Deref for Callback<L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.0
    }
}

impl<L: ?Sized> fmt::Debug for Callback<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}
