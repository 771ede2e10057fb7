//! Window listeners feeding the render task: pointer moves set the rotation
//! target, resizes re-aspect the camera and resize the surface.
//!
//! The closures are kept (not `forget`-ed) so unmount can remove them;
//! dropping [`Listeners`] unregisters both.

use crate::dom;
use crate::render::GpuState;
use behave_core::RenderTask;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Listeners {
    window: web::Window,
    pointermove: Closure<dyn FnMut(web::PointerEvent)>,
    resize: Closure<dyn FnMut()>,
}

pub fn wire(
    window: &web::Window,
    task: Rc<RefCell<RenderTask<GpuState>>>,
) -> anyhow::Result<Listeners> {
    let pointermove = wire_pointermove(window, task.clone())?;
    let resize = match wire_resize(window, task) {
        Ok(c) => c,
        Err(e) => {
            _ = window.remove_event_listener_with_callback(
                "pointermove",
                pointermove.as_ref().unchecked_ref(),
            );
            return Err(e);
        }
    };
    Ok(Listeners {
        window: window.clone(),
        pointermove,
        resize,
    })
}

fn wire_pointermove(
    window: &web::Window,
    task: Rc<RefCell<RenderTask<GpuState>>>,
) -> anyhow::Result<Closure<dyn FnMut(web::PointerEvent)>> {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Ok(mut t) = task.try_borrow_mut() {
            t.pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
        }
    }) as Box<dyn FnMut(_)>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "pointermove",
            closure.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| anyhow::anyhow!("pointermove listener: {:?}", e))?;
    Ok(closure)
}

fn wire_resize(
    window: &web::Window,
    task: Rc<RefCell<RenderTask<GpuState>>>,
) -> anyhow::Result<Closure<dyn FnMut()>> {
    let window_for_resize = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let vp = dom::viewport(&window_for_resize);
        if let Ok(mut t) = task.try_borrow_mut() {
            t.resized(vp);
        }
    }) as Box<dyn FnMut()>);

    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("resize listener: {:?}", e))?;
    Ok(closure)
}

// Listeners are removed before their closures are freed.
impl Drop for Listeners {
    fn drop(&mut self) {
        _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.pointermove.as_ref().unchecked_ref(),
        );
        _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
    }
}
