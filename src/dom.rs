use behave_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Marks the canvas of a mounted field inside its container.
pub const FIELD_MARKER_ATTR: &str = "data-behave-field";

/// Current viewport in CSS pixels and the device pixel ratio.
pub fn viewport(window: &web::Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport::new(
        dim(window.inner_width()),
        dim(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// A full-viewport canvas, not yet attached anywhere.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute(FIELD_MARKER_ATTR, "")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100vw");
    _ = style.set_property("height", "100vh");
    Ok(canvas)
}

/// Whether `container` already has a field canvas as a direct child.
pub fn holds_field(container: &web::HtmlElement) -> bool {
    let selector = format!(":scope > canvas[{}]", FIELD_MARKER_ATTR);
    matches!(container.query_selector(&selector), Ok(Some(_)))
}

/// Set the backing store to `width` x `height` physical pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));
}

/// Remove `canvas` from its parent, if it still has one.
pub fn detach(canvas: &web::HtmlCanvasElement) {
    if let Some(parent) = canvas.parent_node() {
        _ = parent.remove_child(canvas);
    }
}
