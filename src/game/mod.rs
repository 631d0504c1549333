//! DOM game shell: builds the scene, wires pointer and touch listeners, and
//! drives the feed flow against the pure controllers. Nothing here is invoked
//! until `start_game()` is called from JS.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, MouseEvent, TouchEvent, window};

use crate::config::{GameConfig, RemoteConfig};
use crate::counter::FeedCounter;
use crate::drag::{DragController, DragOutcome};
use crate::geom::{Direction, Point, Rect};
use crate::store::{self, RemoteCounter};
use crate::{console_error, console_warn};

mod audio;
mod pile;
mod surface;

// Element ids of the scene pieces this module owns or expects.
const CAT_CONTAINER_ID: &str = "cat-container";
const CAT_BODY_ID: &str = "cat-body";
const CAT_HEAD_ID: &str = "cat-head";
const CAT_FACE_ID: &str = "cat-face";
const CAT_EYES_ID: &str = "cat-eyes";
const CAT_MOUTH_ID: &str = "cat-mouth";
const PILE_ID: &str = "glizzy-pile";
const STYLE_ID: &str = "gc-style";

/// Classes toggled on the sprites and the drop zone.
const CLASS_GLIZZY: &str = "glizzy";
const CLASS_DRAGGING: &str = "dragging";
const CLASS_EATEN: &str = "eaten";
const CLASS_ZONE_ACTIVE: &str = "drop-zone-active";

const SCENE_CSS: &str = "\
.glizzy{width:120px;cursor:grab;filter:drop-shadow(0 4px 8px rgba(0,0,0,0.2));transition:transform 0.2s ease,filter 0.2s ease;}\
.glizzy.dragging{cursor:grabbing;pointer-events:none;transform:scale(1.2);filter:drop-shadow(0 8px 16px rgba(0,0,0,0.8));}\
.glizzy.eaten{animation:gc-eat 0.5s ease-out forwards;}\
@keyframes gc-eat{0%{transform:scale(1);opacity:1;}50%{transform:scale(0.5) rotate(180deg);opacity:0.8;}100%{transform:scale(0) rotate(360deg);opacity:0;}}\
#cat-mouth.drop-zone-active{background:rgba(255,191,123,0.45);border-radius:50%;box-shadow:0 0 48px rgba(255,191,123,0.8);}\
#drop-feedback{opacity:0;transition:opacity 0.3s linear;}\
#drop-feedback.show{opacity:1;}\
#glizzy-counter.loading{opacity:0.5;}\
#owner-donate{display:none;}\
#owner-donate.show{display:block;}\
body.gc-dragging{cursor:grabbing;}";

/// State-change notifications fanned out to the presentation consumers.
#[derive(Clone, Copy, Debug)]
pub(crate) enum GameEvent {
    CounterLoaded { total: u64 },
    Fed { total: u64 },
    DragStarted,
    DragEnded { fed: bool },
}

fn notify(event: GameEvent) {
    surface::on_event(&event);
    audio::on_event(&event);
}

/// Runtime game state. One instance lives in the thread-local cell below; all
/// mutation happens on the main thread through `with_state`.
struct GameState {
    config: GameConfig,
    drag: DragController,
    counter: FeedCounter,
    remote: Option<RemoteCounter>,
    direction: Direction,
    /// DOM handle mirroring the active drag session, cleared with it.
    dragged_el: Option<HtmlElement>,
    next_glizzy_id: u32,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = const { RefCell::new(None) };
}

fn with_state<R>(f: impl FnOnce(&mut GameState) -> R) -> Option<R> {
    GAME_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start_feeding_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ensure_style(&doc)?;
    ensure_scene(&doc)?;
    surface::ensure_overlays(&doc)?;
    audio::ensure_elements(&doc)?;

    let config = GameConfig::default();
    let remote = match RemoteConfig::from_window() {
        Some(cfg) => Some(RemoteCounter::new(cfg)),
        None => {
            console_warn("Remote counter not configured. Using local counter.");
            None
        }
    };
    let remote_for_load = remote.clone();
    let storage_key = config.storage_key;

    let state = GameState {
        drag: DragController::new(config.drop_margin),
        counter: FeedCounter::default(),
        remote,
        direction: Direction::Left,
        dragged_el: None,
        next_glizzy_id: 0,
        config,
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    pile::fill(&doc)?;
    set_cat_sprites(&doc, Direction::Left);
    attach_listeners(&win, &doc)?;
    audio::schedule_foley();

    // Initial counter read; the remote call must never block dragging.
    wasm_bindgen_futures::spawn_local(async move {
        let total = store::load_count(remote_for_load.as_ref(), storage_key).await;
        with_state(|s| s.counter.set(total));
        notify(GameEvent::CounterLoaded { total });
    });

    Ok(())
}

// --- Scene bootstrap ---------------------------------------------------------

fn ensure_style(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(SCENE_CSS));
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&style)?;
    Ok(())
}

/// Creates the cat and the pile tray unless the host page already has them.
fn ensure_scene(doc: &Document) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    if doc.get_element_by_id(CAT_CONTAINER_ID).is_none() {
        let container = create_div(
            doc,
            CAT_CONTAINER_ID,
            "position:fixed; bottom:-5vh; right:0; width:50%; max-width:640px; min-width:320px; z-index:10;",
        )?;
        let cat_body = create_img(
            doc,
            CAT_BODY_ID,
            "images/cat_body.png",
            "Cat Body",
            "width:100%; display:block;",
        )?;
        container.append_child(&cat_body)?;

        // Head proportions measured off the body sprite.
        let head = create_div(
            doc,
            CAT_HEAD_ID,
            "position:absolute; width:64.7%; left:23.9%; bottom:65.4%;",
        )?;
        let eyes = create_img(
            doc,
            CAT_EYES_ID,
            "images/cat_eyes_left.png",
            "Cat Eyes",
            "position:absolute; width:100%; left:0; top:0;",
        )?;
        let face = create_img(
            doc,
            CAT_FACE_ID,
            "images/cat_face_left.png",
            "Cat Face",
            "position:relative; width:100%; display:block;",
        )?;
        head.append_child(&eyes)?;
        head.append_child(&face)?;
        // Invisible hit region over the muzzle; the drop margin supplies the
        // rest of the forgiveness.
        let mouth = create_div(
            doc,
            CAT_MOUTH_ID,
            "position:absolute; left:30%; bottom:8%; width:40%; height:26%;",
        )?;
        head.append_child(&mouth)?;
        container.append_child(&head)?;
        body.append_child(&container)?;
    }

    if doc.get_element_by_id(PILE_ID).is_none() {
        let pile = create_div(
            doc,
            PILE_ID,
            "position:fixed; bottom:4vh; left:4vw; display:flex; align-items:flex-end; gap:12px; z-index:15;",
        )?;
        body.append_child(&pile)?;
    }
    Ok(())
}

fn create_div(doc: &Document, id: &str, style: &str) -> Result<Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    Ok(el)
}

fn create_img(
    doc: &Document,
    id: &str,
    src: &str,
    alt: &str,
    style: &str,
) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_id(id);
    img.set_src(src);
    img.set_alt(alt);
    img.set_draggable(false);
    img.set_attribute("style", style)?;
    Ok(img)
}

// --- Event wiring ------------------------------------------------------------

fn attach_listeners(win: &web_sys::Window, doc: &Document) -> Result<(), JsValue> {
    // Mouse
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            on_pointer_move(Point::new(evt.client_x() as f64, evt.client_y() as f64));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let p = Point::new(evt.client_x() as f64, evt.client_y() as f64);
            if on_pointer_down(p, evt.target()) {
                evt.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            on_pointer_up(Point::new(evt.client_x() as f64, evt.client_y() as f64));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch: same handlers fed by the first touch point.
    {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(touch) = evt.touches().get(0) {
                let p = Point::new(touch.client_x() as f64, touch.client_y() as f64);
                if on_pointer_down(p, evt.target()) {
                    evt.prevent_default();
                }
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(touch) = evt.touches().get(0) {
                // Stop the page from scrolling under an active drag.
                if with_state(|s| s.drag.is_active()).unwrap_or(false) {
                    evt.prevent_default();
                }
                on_pointer_move(Point::new(touch.client_x() as f64, touch.client_y() as f64));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            if let Some(touch) = evt.changed_touches().get(0) {
                on_pointer_up(Point::new(touch.client_x() as f64, touch.client_y() as f64));
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // The context menu fights the drag interaction.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // A drag cannot survive a relayout or a hidden tab.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            cancel_drag();
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let doc_vis = doc.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if doc_vis.hidden() {
                cancel_drag();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// --- Pointer handlers --------------------------------------------------------

/// Pointer-down over a live glizzy starts a session. Returns whether a drag
/// began so the caller can suppress the default (text-select / scroll) action.
fn on_pointer_down(p: Point, target: Option<web_sys::EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    let classes = el.class_list();
    if !classes.contains(CLASS_GLIZZY) || classes.contains(CLASS_EATEN) {
        return false;
    }
    let id = el
        .get_attribute("data-glizzy-id")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let rect = Rect::from_dom(&el.get_bounding_client_rect());
    let began = with_state(|s| {
        if s.drag.begin(id, p, rect) {
            s.dragged_el = Some(el.clone());
            true
        } else {
            false
        }
    })
    .unwrap_or(false);
    if began {
        let _ = classes.add_1(CLASS_DRAGGING);
        notify(GameEvent::DragStarted);
    }
    began
}

fn on_pointer_move(p: Point) {
    if with_state(|s| s.drag.is_active()).unwrap_or(false) {
        drag_to(p);
    } else {
        track_cat(p);
    }
}

fn drag_to(p: Point) {
    let Some((pos, el)) =
        with_state(|s| s.drag.drag_position(p).zip(s.dragged_el.clone())).flatten()
    else {
        return;
    };
    let style = el.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", &format!("{}px", pos.x));
    let _ = style.set_property("top", &format!("{}px", pos.y));
    let _ = style.set_property("z-index", "1000");

    // Re-test the zone on every move for live mouth feedback.
    match mouth_rect() {
        Some(mouth) => {
            let over = with_state(|s| s.drag.over_zone(p, mouth)).unwrap_or(false);
            set_zone_highlight(over);
        }
        None => console_error("Cat mouth element not found"),
    }
}

fn on_pointer_up(p: Point) {
    let mouth = mouth_rect();
    if mouth.is_none() && with_state(|s| s.drag.is_active()) == Some(true) {
        console_error("Cat mouth element not found");
    }
    let Some((outcome, el)) = with_state(|s| {
        let outcome = match mouth {
            Some(m) => s.drag.resolve(p, m),
            // Without a drop target every release is a miss.
            None => match s.drag.cancel() {
                Some(sess) => DragOutcome::Returned {
                    glizzy: sess.glizzy,
                    origin: sess.origin,
                },
                None => DragOutcome::Idle,
            },
        };
        (outcome, s.dragged_el.take())
    }) else {
        return;
    };
    match outcome {
        DragOutcome::Idle => {}
        DragOutcome::Fed { .. } => {
            if let Some(el) = el {
                consume_glizzy(&el);
            }
            finish_drag(true);
            feed();
        }
        DragOutcome::Returned { .. } => {
            if let Some(el) = el {
                return_to_pile(&el);
            }
            finish_drag(false);
        }
    }
}

/// Forced teardown on resize or tab-hide: the sprite returns to the pile and
/// every dragging flag clears.
fn cancel_drag() {
    let Some(dragged) = with_state(|s| s.drag.cancel().map(|_| s.dragged_el.take())).flatten()
    else {
        return;
    };
    if let Some(el) = dragged {
        return_to_pile(&el);
    }
    finish_drag(false);
}

fn finish_drag(fed: bool) {
    set_zone_highlight(false);
    notify(GameEvent::DragEnded { fed });
}

// --- Feed & return flows -----------------------------------------------------

fn feed() {
    let Some((total, remote, key)) = with_state(|s| {
        let total = s.counter.increment();
        (total, s.remote.clone(), s.config.storage_key)
    }) else {
        return;
    };
    store::persist_count(remote, key, total);
    notify(GameEvent::Fed { total });
}

fn consume_glizzy(el: &HtmlElement) {
    let classes = el.class_list();
    let _ = classes.remove_1(CLASS_DRAGGING);
    let _ = classes.add_1(CLASS_EATEN);
    // Let the eat animation finish before the sprite disappears and a fresh
    // glizzy rolls into the pile.
    let el = el.clone();
    set_timeout(500, move || {
        el.remove();
        pile::replenish();
    });
}

fn return_to_pile(el: &HtmlElement) {
    let _ = el.class_list().remove_1(CLASS_DRAGGING);
    let style = el.style();
    let _ = style.set_property("position", "static");
    let _ = style.set_property("left", "auto");
    let _ = style.set_property("top", "auto");
    let _ = style.set_property("z-index", "auto");
    if let Some(pile) = element(PILE_ID) {
        if !pile.contains(Some(el.as_ref())) {
            let _ = pile.append_child(el);
        }
    }
}

// --- Cat tracking ------------------------------------------------------------

fn track_cat(p: Point) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(head) = doc.get_element_by_id(CAT_HEAD_ID) else {
        console_error("Cat head element not found");
        return;
    };
    let center = Rect::from_dom(&head.get_bounding_client_rect()).center();
    let dir = Direction::toward(center, p);
    let changed = with_state(|s| {
        if s.direction == dir {
            false
        } else {
            s.direction = dir;
            true
        }
    });
    if changed == Some(true) {
        set_cat_sprites(&doc, dir);
    }
    move_eyes(&doc, center, p);
}

fn set_cat_sprites(doc: &Document, dir: Direction) {
    let (Some(face), Some(eyes)) = (image(doc, CAT_FACE_ID), image(doc, CAT_EYES_ID)) else {
        console_error("Cat face or eyes element not found");
        return;
    };
    face.set_src(&format!("images/cat_face_{}.png", dir.as_str()));
    eyes.set_src(&format!("images/cat_eyes_{}.png", dir.as_str()));
}

/// Pupils drift a few pixels toward the pointer, proportional to how far it is
/// across the viewport.
fn move_eyes(doc: &Document, center: Point, p: Point) {
    let Some(eyes) = doc
        .get_element_by_id(CAT_EYES_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let Some(win) = window() else {
        return;
    };
    let vw = win
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    let vh = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0);
    let tx = 12.0 * (p.x - center.x) / vw;
    let ty = 12.0 * (p.y - center.y) / vh;
    let _ = eyes
        .style()
        .set_property("transform", &format!("translate({tx}px, {ty}px)"));
}

// --- Small DOM helpers -------------------------------------------------------

fn element(id: &str) -> Option<Element> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
}

fn image(doc: &Document, id: &str) -> Option<HtmlImageElement> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into().ok())
}

fn mouth_rect() -> Option<Rect> {
    element(CAT_MOUTH_ID).map(|el| Rect::from_dom(&el.get_bounding_client_rect()))
}

fn set_zone_highlight(active: bool) {
    if let Some(mouth) = element(CAT_MOUTH_ID) {
        let classes = mouth.class_list();
        let _ = if active {
            classes.add_1(CLASS_ZONE_ACTIVE)
        } else {
            classes.remove_1(CLASS_ZONE_ACTIVE)
        };
    }
}

fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(win) = window() {
        let cb = Closure::once_into_js(f);
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}
