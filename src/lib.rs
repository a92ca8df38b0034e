#![cfg(target_arch = "wasm32")]
use pad_core::{Session, SessionConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

pub(crate) type PadSession = Session<audio::WebAudioBackend>;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<PadSession>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        let vp = dom::canvas_viewport(&canvas_resize);
        if let Ok(mut s) = session.try_borrow_mut() {
            s.resize(vp);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// The start gesture unlocks audio on mobile browsers, so the session stays
// inert until it fires.
fn wire_start_button(
    document: &web::Document,
    session: Rc<RefCell<PadSession>>,
    video: Option<web::HtmlVideoElement>,
) {
    let doc = document.clone();
    dom::add_click_listener(document, constants::START_BUTTON_ID, move || {
        let mut s = session.borrow_mut();
        _ = s.router().backend().context().resume();
        s.start();
        overlay::hide(&doc);
        if let Some(v) = &video {
            assets::play_background_video(v);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pad-web starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "touch-action: none");
    dom::sync_canvas_backing_size(&canvas);
    let renderer = render::Renderer::new(canvas.clone())?;

    // Context starts suspended until the start gesture; decoding works regardless
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let fx = audio::build_fx_chain(&audio_ctx)?;

    let config = SessionConfig::default();
    let pad_count = config.grid.pad_count();
    let assets::LoadedAssets { samples, images } = assets::load_all(&audio_ctx, pad_count).await;
    let backend = audio::WebAudioBackend::new(audio_ctx, fx, pad_count)?;

    let viewport = dom::canvas_viewport(&canvas);
    let session = Rc::new(RefCell::new(Session::new(
        config, viewport, backend, samples,
    )));
    log::info!(
        "[init] viewport {:.0}x{:.0}, {} pads",
        viewport.width,
        viewport.height,
        pad_count
    );

    let video = assets::create_background_video(&document);
    let clock = frame::Clock::new();

    wire_canvas_resize(&canvas, session.clone());
    wire_start_button(&document, session.clone(), video.clone());
    overlay::show(&document);

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        clock,
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        renderer,
        images,
        video,
        clock,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
