//! Browser scheduler: `requestAnimationFrame` for frames, `setInterval` for
//! the countdown.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{Scheduler, TaskHandle, TaskKind};

/// Called on every task firing
pub type Dispatch = Rc<dyn Fn(TaskKind, TaskHandle)>;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

enum Registration {
    Interval {
        id: i32,
        callback: Closure<dyn FnMut()>,
    },
    Frames {
        raf_id: Option<i32>,
        callback: FrameSlot,
    },
}

/// Closures of cancelled tasks. A task can be cancelled from inside its own
/// callback, so dropping is deferred until the next task starts.
#[allow(dead_code)]
enum Retired {
    Interval(Closure<dyn FnMut()>),
    Frames(Closure<dyn FnMut(f64)>),
}

pub struct WebScheduler {
    window: web_sys::Window,
    dispatch: Dispatch,
    next_id: u64,
    registrations: Rc<RefCell<HashMap<TaskHandle, Registration>>>,
    retired: Vec<Retired>,
}

impl WebScheduler {
    pub fn new(window: web_sys::Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            dispatch,
            next_id: 0,
            registrations: Rc::new(RefCell::new(HashMap::new())),
            retired: Vec::new(),
        }
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.retired.clear();
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl Scheduler for WebScheduler {
    fn start_frames(&mut self) -> TaskHandle {
        let handle = self.next_handle();
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let registrations = self.registrations.clone();
        let dispatch = self.dispatch.clone();
        let window = self.window.clone();
        let self_slot = slot.clone();
        *slot.borrow_mut() = Some(Closure::new(move |_time: f64| {
            if !registrations.borrow().contains_key(&handle) {
                return;
            }
            dispatch(TaskKind::Frames, handle);

            // Re-arm unless the dispatch cancelled us
            let next = {
                let slot = self_slot.borrow();
                match slot.as_ref() {
                    Some(cb) if registrations.borrow().contains_key(&handle) => window
                        .request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok(),
                    _ => None,
                }
            };
            if let Some(Registration::Frames { raf_id, .. }) =
                registrations.borrow_mut().get_mut(&handle)
            {
                *raf_id = next;
            }
        }));

        let raf_id = slot.borrow().as_ref().and_then(|cb| {
            self.window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok()
        });
        if raf_id.is_none() {
            log::warn!("requestAnimationFrame failed; frame loop not started");
        }
        self.registrations.borrow_mut().insert(
            handle,
            Registration::Frames {
                raf_id,
                callback: slot,
            },
        );
        handle
    }

    fn start_countdown(&mut self, period_ms: u32) -> TaskHandle {
        let handle = self.next_handle();
        let registrations = self.registrations.clone();
        let dispatch = self.dispatch.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if registrations.borrow().contains_key(&handle) {
                dispatch(TaskKind::Countdown, handle);
            }
        });

        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => {
                self.registrations
                    .borrow_mut()
                    .insert(handle, Registration::Interval { id, callback });
            }
            Err(e) => log::warn!("setInterval failed: {:?}", e),
        }
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let registration = self.registrations.borrow_mut().remove(&handle);
        match registration {
            Some(Registration::Interval { id, callback }) => {
                self.window.clear_interval_with_handle(id);
                self.retired.push(Retired::Interval(callback));
            }
            Some(Registration::Frames { raf_id, callback }) => {
                if let Some(id) = raf_id {
                    let _ = self.window.cancel_animation_frame(id);
                }
                // Break the closure's self-reference
                if let Some(cb) = callback.borrow_mut().take() {
                    self.retired.push(Retired::Frames(cb));
                }
            }
            None => {}
        }
    }
}
