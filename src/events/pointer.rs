use crate::frame::Clock;
use crate::input;
use crate::PadSession;
use pad_core::{PointerEvent, PointerKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<PadSession>>,
    pub clock: Clock,
}

/// Mouse, touch and pen all arrive as DOM pointer events; collapse them
/// into the single event shape the session understands.
#[inline]
pub fn to_pointer_event(
    kind: PointerKind,
    ev: &web::PointerEvent,
    canvas: &web::HtmlCanvasElement,
) -> PointerEvent {
    PointerEvent {
        kind,
        position: input::pointer_canvas_css(ev, canvas),
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointer(&w, &w.canvas, "pointerdown", PointerKind::Down);
    if let Some(wnd) = web::window() {
        wire_pointer(&w, &wnd, "pointermove", PointerKind::Move);
        wire_pointer(&w, &wnd, "pointerup", PointerKind::Up);
        // A cancelled touch drops the press without playing anything
        wire_pointer(&w, &wnd, "pointercancel", PointerKind::Cancel);
    }
}

fn wire_pointer(w: &InputWiring, target: &web::EventTarget, name: &str, kind: PointerKind) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if kind == PointerKind::Down {
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
        }
        let event = to_pointer_event(kind, &ev, &w.canvas);
        let now = w.clock.now();
        let Ok(mut session) = w.session.try_borrow_mut() else {
            log::warn!("[pointer] session busy, dropping {:?}", kind);
            return;
        };
        if !session.is_started() {
            return;
        }
        let triggers = session.handle_pointer(event, now);
        if !triggers.is_empty() {
            log::info!("[pointer] triggered pads {:?}", triggers.as_slice());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}
