#![cfg(target_arch = "wasm32")]
use behave_core::{CancelToken, FieldConfig, PointField, RenderTask};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod render;

use render::GpuState;

/// Everything one mounted background owns.
struct Mounted {
    task: Rc<RefCell<RenderTask<GpuState>>>,
    frame_loop: frame::FrameLoop,
    listeners: events::Listeners,
}

impl Mounted {
    fn teardown(self) {
        let Mounted {
            task,
            frame_loop,
            listeners,
        } = self;
        frame_loop.stop();
        drop(listeners);
        // Releases buffers, pipeline and device, then detaches the canvas
        task.borrow_mut().teardown();
        drop(frame_loop);
    }
}

async fn mount_into(container: &web::HtmlElement) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // The canvas is appended before the first await, so a concurrent mount
    // into the same container sees it too.
    if dom::holds_field(container) {
        anyhow::bail!("container already holds a point field");
    }

    let viewport = dom::viewport(&window);
    let canvas = dom::create_canvas(&document)?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;

    let field = PointField::new(&FieldConfig::default(), viewport);
    let gpu = match GpuState::new(canvas.clone(), field.cloud(), viewport.physical_size()).await {
        Ok(g) => g,
        Err(e) => {
            dom::detach(&canvas);
            return Err(e.into());
        }
    };
    log::info!(
        "[mount] {} points, viewport {}x{} @{}x",
        field.cloud().len(),
        viewport.width,
        viewport.height,
        viewport.device_pixel_ratio
    );

    let task = Rc::new(RefCell::new(RenderTask::new(field, gpu, CancelToken::new())));
    let listeners = match events::wire(&window, task.clone()) {
        Ok(l) => l,
        Err(e) => {
            task.borrow_mut().teardown();
            return Err(e);
        }
    };
    let frame_loop = frame::start_loop(task.clone());
    Ok(Mounted {
        task,
        frame_loop,
        listeners,
    })
}

/// The animated point-field background, mounted into a container element.
#[wasm_bindgen]
pub struct ParticleScene {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleScene {
    /// Append a canvas to `container` and start rendering. Rejects when no
    /// WebGPU device can be had, the shader fails validation, or `container`
    /// already holds a mounted field.
    pub async fn mount(container: web::HtmlElement) -> Result<ParticleScene, JsValue> {
        match mount_into(&container).await {
            Ok(m) => Ok(ParticleScene { mounted: Some(m) }),
            Err(e) => {
                log::error!("[mount] {:#}", e);
                Err(JsValue::from_str(&format!("{:#}", e)))
            }
        }
    }

    /// Stop the loop, remove listeners, release GPU resources and detach the
    /// canvas. Further calls do nothing.
    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.teardown();
            log::info!("[mount] unmounted");
        }
    }

    /// False after `unmount`, and after a lost device stopped the loop.
    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.task.borrow().is_running())
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> f64 {
        self.mounted
            .as_ref()
            .map(|m| m.task.borrow().frames() as f64)
            .unwrap_or(0.0)
    }
}

impl Drop for ParticleScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("behave-web ready");
    Ok(())
}
