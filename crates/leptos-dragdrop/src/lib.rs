//! Leptos DragDrop Utilities
//!
//! Mouse-driven moving of absolutely positioned elements for Leptos.
//! Uses movement threshold to distinguish click from drag; while an element
//! is dragged the current pointer delta is exposed as a reactive offset and
//! the final delta is reported once on mouseup.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Drag state signals, keyed by whatever identifies a draggable element
pub struct DragSignals<K: Send + Sync + 'static> {
    pub dragging_read: ReadSignal<Option<K>>,
    pub dragging_write: WriteSignal<Option<K>>,
    /// Pending key (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<K>>,
    pub pending_write: WriteSignal<Option<K>>,
    /// Pointer position at mousedown
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Pointer delta since mousedown, only meaningful while dragging
    pub offset_read: ReadSignal<(i32, i32)>,
    pub offset_write: WriteSignal<(i32, i32)>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
}

impl<K: Send + Sync + 'static> Clone for DragSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DragSignals<K> {}

pub fn create_drag_signals<K>() -> DragSignals<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    let (dragging_read, dragging_write) = signal(None::<K>);
    let (pending_read, pending_write) = signal(None::<K>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (offset_read, offset_write) = signal((0i32, 0i32));
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    DragSignals {
        dragging_read,
        dragging_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
        offset_read,
        offset_write,
        drag_just_ended_read,
        drag_just_ended_write,
    }
}

/// Whether a pointer delta is large enough to count as a drag
pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// Reactive offset for `key`: the live delta while it is dragged, else (0, 0)
pub fn offset_for<K>(drag: DragSignals<K>, key: K) -> (i32, i32)
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    if drag.dragging_read.get() == Some(key) {
        drag.offset_read.get()
    } else {
        (0, 0)
    }
}

/// False right after a drag ended, so the trailing click can be ignored
pub fn click_allowed<K: Send + Sync + 'static>(drag: DragSignals<K>) -> bool {
    !drag.drag_just_ended_read.try_get_untracked().unwrap_or(false)
}

/// End drag operation
pub fn end_drag<K>(drag: &DragSignals<K>)
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    drag.dragging_write.try_set(None);
    drag.pending_write.try_set(None);
    drag.offset_write.try_set((0, 0));
    drag.drag_just_ended_write.try_set(true);

    if let Some(win) = web_sys::window() {
        let clear = drag.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for a draggable element
/// Records pending drag with start position
pub fn make_on_mousedown<K>(drag: DragSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        // Nested draggables: the innermost element wins
        ev.stop_propagation();
        ev.prevent_default();
        drag.pending_write.set(Some(key));
        drag.start_write.set((ev.client_x(), ev.client_y()));
        drag.offset_write.set((0, 0));
    }
}

/// Runs its release hook exactly once, when dropped
pub struct ListenerGuard<F: FnOnce()> {
    release: Option<F>,
}

impl<F: FnOnce()> ListenerGuard<F> {
    pub fn new(release: F) -> Self {
        Self { release: Some(release) }
    }
}

impl<F: FnOnce()> Drop for ListenerGuard<F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Tie `release` to the current reactive owner: it runs when the owner is
/// cleaned up (the component unmounts)
pub fn release_on_cleanup<F: FnOnce() + 'static>(release: F) {
    let _ = StoredValue::new_local(ListenerGuard::new(release));
}

type MouseClosure = wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Document mousemove: starts a drag once past the threshold, then tracks the offset
fn mousemove_handler<K>(drag: DragSignals<K>) -> MouseClosure
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    MouseClosure::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = drag.pending_read.try_get_untracked().flatten() else {
            return;
        };
        let (start_x, start_y) = drag.start_read.try_get_untracked().unwrap_or((0, 0));
        let dx = ev.client_x() - start_x;
        let dy = ev.client_y() - start_y;

        let dragging = drag.dragging_read.try_get_untracked().flatten();
        if dragging.is_none() {
            if exceeds_threshold(dx, dy) {
                drag.dragging_write.try_set(Some(pending));
                drag.offset_write.try_set((dx, dy));
            }
        } else {
            drag.offset_write.try_set((dx, dy));
        }
    })
}

/// Bind document mouseup and mousemove for the lifetime of the current owner.
/// Reports `(key, dx, dy)` when a real drag ends.
pub fn bind_global_mouseup<K, F>(drag: DragSignals<K>, on_drag_end: F)
where
    K: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(K, i32, i32) + Clone + 'static,
{
    let on_mouseup = MouseClosure::new(move |_ev: web_sys::MouseEvent| {
        let dragging = drag.dragging_read.try_get_untracked().flatten();
        let offset = drag.offset_read.try_get_untracked().unwrap_or((0, 0));

        if let Some(key) = dragging {
            end_drag(&drag);
            on_drag_end(key, offset.0, offset.1);
        } else {
            // Plain click: let the click event fire naturally on the element
            drag.pending_write.try_set(None);
        }
    });
    let on_mousemove = mousemove_handler(drag);

    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());

    release_on_cleanup(move || {
        let _ = doc.remove_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        let _ = doc.remove_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold(0, 0));
        assert!(!exceeds_threshold(5, -5));
        assert!(exceeds_threshold(6, 0));
        assert!(exceeds_threshold(0, -6));
    }

    #[test]
    fn test_guard_releases_once_on_drop() {
        use std::cell::Cell;
        use std::rc::Rc;

        let released = Rc::new(Cell::new(0));
        let counter = released.clone();
        let guard = ListenerGuard::new(move || counter.set(counter.get() + 1));
        assert_eq!(released.get(), 0);

        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_release_runs_when_owner_is_cleaned_up() {
        use std::cell::Cell;
        use std::rc::Rc;

        let released = Rc::new(Cell::new(false));
        let flag = released.clone();
        let owner = Owner::new();
        owner.with(|| release_on_cleanup(move || flag.set(true)));
        assert!(!released.get());

        owner.cleanup();
        assert!(released.get());
    }
}
