use crate::render::GpuState;
use behave_core::{CancelToken, FrameClock, RenderTask, Step};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
    token: CancelToken,
}

fn schedule(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("[loop] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(task: Rc<RefCell<RenderTask<GpuState>>>) -> FrameLoop {
    let token = task.borrow().token().clone();
    let clock = FrameClock::start();
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    let token_tick = token.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        if token_tick.is_cancelled() {
            return;
        }
        let step = match task.try_borrow_mut() {
            Ok(mut t) => t.step(clock.elapsed_secs()),
            // Busy (re-entrant call); try again next refresh
            Err(_) => Step::Continue,
        };
        if step == Step::Continue && !token_tick.is_cancelled() {
            schedule(&tick_clone, &pending_clone);
        }
    }) as Box<dyn FnMut()>));

    schedule(&tick, &pending);
    log::info!("[loop] started");
    FrameLoop {
        tick,
        pending,
        token,
    }
}

impl FrameLoop {
    /// Cancel the token and the pending frame, then free the callback
    /// (breaking the closure's reference to itself). Idempotent.
    pub fn stop(&self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
