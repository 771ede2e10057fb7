// Browser tests for mount/unmount against a real DOM.
//
// Run with `wasm-pack test --headless --chrome`. Where the browser offers no
// WebGPU adapter, `mount` rejects and only the DOM-side assertions apply.
#![cfg(target_arch = "wasm32")]

use behave_web::ParticleScene;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> web::HtmlElement {
    let document = web::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web::HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn field_canvases(container: &web::HtmlElement) -> u32 {
    container
        .query_selector_all("canvas[data-behave-field]")
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
async fn unmount_removes_the_canvas_from_its_container() {
    let el = container();
    match ParticleScene::mount(el.clone()).await {
        Ok(mut scene) => {
            assert!(scene.mounted());
            assert_eq!(field_canvases(&el), 1);
            scene.unmount();
            assert!(!scene.mounted());
            assert_eq!(field_canvases(&el), 0);
            assert_eq!(el.child_element_count(), 0);
            scene.unmount();
            assert_eq!(el.child_element_count(), 0);
        }
        // No adapter here: a rejected mount must not leave its canvas behind
        Err(_) => assert_eq!(el.child_element_count(), 0),
    }
}

#[wasm_bindgen_test]
async fn dropping_a_scene_removes_its_canvas() {
    let el = container();
    if let Ok(scene) = ParticleScene::mount(el.clone()).await {
        assert_eq!(field_canvases(&el), 1);
        drop(scene);
    }
    assert_eq!(el.child_element_count(), 0);
}

#[wasm_bindgen_test]
async fn mounting_an_occupied_container_is_refused() {
    let el = container();
    let document = web::window().unwrap().document().unwrap();
    let existing = document.create_element("canvas").unwrap();
    existing.set_attribute("data-behave-field", "").unwrap();
    el.append_child(&existing).unwrap();

    assert!(ParticleScene::mount(el.clone()).await.is_err());
    assert_eq!(el.child_element_count(), 1);
    el.remove();
}

#[wasm_bindgen_test]
async fn second_mount_into_the_same_container_is_refused() {
    let el = container();
    let Ok(mut first) = ParticleScene::mount(el.clone()).await else {
        return;
    };
    assert!(ParticleScene::mount(el.clone()).await.is_err());
    assert_eq!(field_canvases(&el), 1);
    assert!(first.mounted());

    first.unmount();
    let mut again = ParticleScene::mount(el.clone())
        .await
        .expect("remount after unmount");
    assert_eq!(field_canvases(&el), 1);
    again.unmount();
}
