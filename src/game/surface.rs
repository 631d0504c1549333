//! Presentation consumers: the counter overlay, drop feedback, and the donate
//! nag. These react to explicit `GameEvent` notifications and never feed back
//! into the game state.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, window};

use crate::counter::format_count;
use crate::{FEED_RESPONSES, console_error};

use super::pile::rand_index;
use super::{GameEvent, create_div, set_timeout};

const HUD_ID: &str = "glizzy-hud";
const COUNTER_ID: &str = "glizzy-counter";
const INSTRUCTIONS_ID: &str = "glizzy-instructions";
const FEEDBACK_ID: &str = "drop-feedback";
const DONATE_ID: &str = "owner-donate";
const DONATE_URL: &str = "https://example.com/feed-the-owner";

const PANEL_STYLE: &str =
    "background:rgba(0,0,0,0.5); padding:10px 20px; border-radius:10px; border:2px solid #fff;";

pub(super) fn ensure_overlays(doc: &Document) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    if doc.get_element_by_id(HUD_ID).is_none() {
        let hud = create_div(
            doc,
            HUD_ID,
            "position:fixed; top:0; left:0; z-index:100; margin:20px; text-align:center; \
             color:#fff; text-shadow:2px 2px 4px rgba(0,0,0,0.8); font-family:sans-serif;",
        )?;
        let counter = create_div(
            doc,
            COUNTER_ID,
            &format!("{PANEL_STYLE} margin-bottom:10px; font-size:2rem; font-weight:bold;"),
        )?;
        let _ = counter.class_list().add_1("loading");
        counter.set_text_content(Some("Glizzies guzzled: …"));
        hud.append_child(&counter)?;
        let hint = create_div(doc, INSTRUCTIONS_ID, &format!("{PANEL_STYLE} font-size:1.2rem;"))?;
        hint.set_text_content(Some("Drag hotdogs to feed the cat! 🚀🐱🌭"));
        hud.append_child(&hint)?;
        body.append_child(&hud)?;
    }

    if doc.get_element_by_id(FEEDBACK_ID).is_none() {
        // Starts transparent; the stylesheet fades it in on `.show`.
        let feedback = create_div(
            doc,
            FEEDBACK_ID,
            "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); z-index:200; \
             font-family:sans-serif; font-size:2rem; font-weight:bold; color:#ff0; \
             text-shadow:3px 3px 6px rgba(0,0,0,0.8); pointer-events:none; text-align:center;",
        )?;
        body.append_child(&feedback)?;
    }

    if doc.get_element_by_id(DONATE_ID).is_none() {
        let nag = create_div(
            doc,
            DONATE_ID,
            &format!(
                "{PANEL_STYLE} position:fixed; top:30%; left:50%; transform:translateX(-50%); \
                 z-index:210; color:#fff; font-family:sans-serif;"
            ),
        )?;
        nag.set_inner_html(&format!(
            "<h4 style=\"margin:0 0 8px 0\">Feed my owner too! 😺</h4>\
             <a style=\"color:#7ce5ff\" href=\"{DONATE_URL}\" target=\"_blank\">Send them a hotdog.</a>"
        ));
        body.append_child(&nag)?;
    }

    Ok(())
}

pub(super) fn on_event(event: &GameEvent) {
    match *event {
        GameEvent::CounterLoaded { total } => {
            update_counter(total);
            if let Some(el) = element(COUNTER_ID) {
                let _ = el.class_list().remove_1("loading");
            }
        }
        GameEvent::Fed { total } => {
            update_counter(total);
            show_feedback();
            maybe_nag(total);
        }
        GameEvent::DragStarted => set_body_dragging(true),
        GameEvent::DragEnded { .. } => set_body_dragging(false),
    }
}

fn element(id: &str) -> Option<Element> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
}

fn update_counter(total: u64) {
    match element(COUNTER_ID) {
        Some(el) => {
            el.set_text_content(Some(&format!("Glizzies guzzled: {}", format_count(total))));
        }
        None => console_error("Counter element not found"),
    }
}

fn show_feedback() {
    let Some(el) = element(FEEDBACK_ID) else {
        console_error("Drop feedback element not found");
        return;
    };
    let line = FEED_RESPONSES[rand_index(FEED_RESPONSES.len())];
    el.set_text_content(Some(line));
    let _ = el.class_list().add_1("show");
    set_timeout(1000, move || {
        let _ = el.class_list().remove_1("show");
    });
}

fn set_body_dragging(active: bool) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let classes = body.class_list();
        let _ = if active {
            classes.add_1("gc-dragging")
        } else {
            classes.remove_1("gc-dragging")
        };
    }
}

/// Every fifth feed politely suggests feeding the developer as well.
fn maybe_nag(total: u64) {
    if total == 0 || total % 5 != 0 {
        return;
    }
    set_timeout(3000, || {
        if let Some(el) = element(DONATE_ID) {
            let _ = el.class_list().add_1("show");
            set_timeout(6000, move || {
                let _ = el.class_list().remove_1("show");
            });
        }
    });
}
