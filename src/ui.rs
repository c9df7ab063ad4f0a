//! Browser adapter: DOM wiring, drag-and-drop, countdown, modal and the
//! high-score table.
//!
//! All game decisions live in `game`/`lanes`; this module projects the model
//! into the page and translates browser events back into model operations.
//! State sits in a `thread_local!` cell and every listener is a leaked
//! `Closure`, wired once at mount.

use std::cell::RefCell;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, window, Document, Element, HtmlElement, HtmlInputElement};

use crate::catalog::card_by_rank;
use crate::format::stats_message;
use crate::game::{placed_literal, CheckOutcome, EndReason, GameSession, TickOutcome};
use crate::lanes::{insertion_index, LaneId, Lanes};
use crate::leaderboard::{self, ScoreRow, TOP_LIMIT};

// Element ids the page template provides.
const SOURCE_LANE: &str = "source-container";
const TARGET_LANE: &str = "card-container";
const SCORE_LABEL: &str = "score";
const MESSAGE: &str = "message";
const TIMER_LABEL: &str = "timer";
const CHECK_BTN: &str = "check-order-btn";
const RESTART_BTN: &str = "restart-btn";
const YEAR: &str = "current-year";
const MODAL: &str = "name-modal";
const MODAL_SCORE: &str = "final-score-text";
const MODAL_INPUT: &str = "player-name-input";
const MODAL_ERROR: &str = "submit-score-error";
const SUBMIT_BTN: &str = "submit-score-btn";
const CANCEL_BTN: &str = "cancel-score-btn";
const STATS_LINE: &str = "score-stats";
const TABLE_BODY_SELECTOR: &str = "#high-scores-table tbody";

struct App {
    session: GameSession,
    lanes: Lanes,
    timer: Option<Interval>,
    /// Guards against a second submit while one is in flight.
    submitting: bool,
}

impl App {
    fn new() -> Self {
        Self {
            session: GameSession::new(),
            lanes: Lanes::new(),
            timer: None,
            submitting: false,
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Wire the page and start the first round. Called once from `start_game()`.
pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    fill_year(&doc);

    APP.with(|cell| cell.replace(Some(App::new())));

    wire_tile_drag(&doc)?;
    wire_dropzone(&doc, SOURCE_LANE, LaneId::Source)?;
    wire_dropzone(&doc, TARGET_LANE, LaneId::Target)?;
    wire_click(&doc, CHECK_BTN, on_check)?;
    wire_click(&doc, RESTART_BTN, on_restart)?;
    wire_click(&doc, SUBMIT_BTN, on_submit)?;
    wire_click(&doc, CANCEL_BTN, on_cancel)?;
    wire_modal_overlay(&doc)?;
    wire_enter_key(&doc)?;

    start_round();
    Ok(())
}

// --- Round flow -------------------------------------------------------------

fn start_round() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.session.start();
            app.lanes.deal(app.session.deck());

            set_score_label(app.session.score());
            set_message("", None);
            set_stats_line("");
            set_timer_label(app.session.remaining_secs());

            render_lane(LaneId::Source, app.lanes.order(LaneId::Source));
            render_lane(LaneId::Target, app.lanes.order(LaneId::Target));

            style_display(RESTART_BTN, "none");
            class_toggle(CHECK_BTN, "pulse", true);

            // Fresh 1 Hz countdown; the old handle (if any) is dropped, which
            // clears its interval.
            app.timer = Some(Interval::new(1_000, on_timer_tick));
        }
    });

    spawn_local(async {
        refresh_highscores().await;
    });
}

fn on_timer_tick() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            match app.session.tick() {
                TickOutcome::Ignored => {}
                TickOutcome::Running => set_timer_label(app.session.remaining_secs()),
                TickOutcome::Expired => {
                    set_timer_label(0);
                    end_round(app, EndReason::TimeExpired);
                }
            }
        }
    });
}

fn on_check() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            let placed = app.lanes.order(LaneId::Target).to_vec();
            match app.session.check(&placed) {
                CheckOutcome::Ignored => {}
                CheckOutcome::NothingPlaced => {
                    set_message("Drag some cards into the sorting lane first.", None);
                }
                CheckOutcome::Correct { gained } => {
                    set_score_label(app.session.score());
                    set_message(
                        &format!("✅ Nice! Correct order. You earned <b>{gained}</b> points."),
                        Some("flash-ef-correct"),
                    );
                    // Checked cards leave play; they do not return to the pool.
                    app.lanes.take_target();
                    render_lane(LaneId::Target, &[]);
                }
                CheckOutcome::Wrong { placed } => {
                    set_message(
                        &format!(
                            "Not quite! The order isn't correct. You placed: <code>{}</code>",
                            placed_literal(&placed)
                        ),
                        None,
                    );
                    end_round(app, EndReason::WrongOrder);
                }
            }
        }
    });
}

fn on_restart() {
    let running = APP.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|app| app.session.is_running())
            .unwrap_or(false)
    });
    // Restart is an explicit Ended-state action; the control is hidden while
    // a round runs, but a stray click must not reshuffle mid-game.
    if !running {
        start_round();
    }
}

fn end_round(app: &mut App, reason: EndReason) {
    app.timer = None;
    class_toggle(CHECK_BTN, "pulse", false);
    style_display(RESTART_BTN, "inline-block");
    append_message(&format!(
        "<b>Game Over:</b> {}<br>Final Score: <b>{}</b>",
        reason.message(),
        app.session.score()
    ));
    open_modal(app.session.score());
}

// --- Drag adapter -----------------------------------------------------------

/// Document-level dragstart/dragend delegation: tiles come and go with every
/// render, the two listeners do not.
fn wire_tile_drag(doc: &Document) -> Result<(), JsValue> {
    let start = Closure::wrap(Box::new(move |evt: web_sys::DragEvent| {
        let Some(tile) = event_tile(&evt) else {
            return;
        };
        tile.class_list().add_1("dragging").ok();
        if let Some(dt) = evt.data_transfer() {
            dt.set_effect_allowed("move");
            if let Some(rank) = tile.get_attribute("data-rank") {
                dt.set_data("text/plain", &rank).ok();
            }
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("dragstart", start.as_ref().unchecked_ref())?;
    start.forget();

    let end = Closure::wrap(Box::new(move |evt: web_sys::DragEvent| {
        if let Some(tile) = event_tile(&evt) {
            tile.class_list().remove_1("dragging").ok();
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("dragend", end.as_ref().unchecked_ref())?;
    end.forget();

    Ok(())
}

/// The `.card` element an event originated on, if any.
fn event_tile(evt: &web_sys::DragEvent) -> Option<Element> {
    let el: Element = evt.target()?.dyn_into().ok()?;
    if el.class_list().contains("card") {
        Some(el)
    } else {
        el.closest(".card").ok().flatten()
    }
}

fn wire_dropzone(doc: &Document, id: &str, lane: LaneId) -> Result<(), JsValue> {
    let zone = doc
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str("missing dropzone element"))?;

    let over_zone = zone.clone();
    let over = Closure::wrap(Box::new(move |evt: web_sys::DragEvent| {
        evt.prevent_default();
        on_drag_over(&over_zone, lane, f64::from(evt.client_x()));
    }) as Box<dyn FnMut(_)>);
    zone.add_event_listener_with_callback("dragover", over.as_ref().unchecked_ref())?;
    over.forget();

    // Reordering already happened during dragover; drop only suppresses the
    // browser default.
    let drop = Closure::wrap(Box::new(move |evt: web_sys::DragEvent| {
        evt.prevent_default();
    }) as Box<dyn FnMut(_)>);
    zone.add_event_listener_with_callback("drop", drop.as_ref().unchecked_ref())?;
    drop.forget();

    Ok(())
}

/// Optimistic reorder-on-hover: update the lane model, then relocate the one
/// lifted DOM node. A full re-render here would destroy the dragged element
/// and abort the browser drag session.
fn on_drag_over(zone: &Element, lane: LaneId, pointer_x: f64) {
    let Some(doc) = document() else { return };
    let Some(lifted) = doc.query_selector(".dragging").ok().flatten() else {
        return;
    };
    let Some(rank) = lifted
        .get_attribute("data-rank")
        .and_then(|r| r.parse::<u32>().ok())
    else {
        return;
    };

    let Ok(others) = zone.query_selector_all(".card:not(.dragging)") else {
        return;
    };
    let mut midpoints = Vec::with_capacity(others.length() as usize);
    let mut elements = Vec::with_capacity(others.length() as usize);
    for i in 0..others.length() {
        let Some(node) = others.get(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        midpoints.push(rect.left() + rect.width() / 2.0);
        elements.push(el);
    }

    let index = insertion_index(pointer_x, &midpoints);

    let moved = APP.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|app| app.lanes.move_to(rank, lane, index))
            .unwrap_or(false)
    });
    if !moved {
        return;
    }

    let result = if let Some(before) = elements.get(index) {
        let before: &web_sys::Node = before.as_ref();
        zone.insert_before(&lifted, Some(before))
    } else {
        zone.append_child(&lifted)
    };
    if result.is_err() {
        console::error_1(&JsValue::from_str("failed to reposition dragged card"));
    }
}

// --- Tile rendering ---------------------------------------------------------

fn render_lane(lane: LaneId, ranks: &[u32]) {
    let Some(doc) = document() else { return };
    let id = match lane {
        LaneId::Source => SOURCE_LANE,
        LaneId::Target => TARGET_LANE,
    };
    let Some(zone) = doc.get_element_by_id(id) else {
        return;
    };
    clear_children(&zone);
    for &rank in ranks {
        match make_tile(&doc, rank) {
            Ok(tile) => {
                zone.append_child(&tile).ok();
            }
            Err(err) => console::error_1(&err),
        }
    }
}

fn make_tile(doc: &Document, rank: u32) -> Result<Element, JsValue> {
    let card = card_by_rank(rank)
        .ok_or_else(|| JsValue::from_str(&format!("rank {rank} not in catalog")))?;

    let tile = doc.create_element("div")?;
    tile.set_class_name("card");
    tile.set_attribute("draggable", "true")?;
    tile.set_attribute("data-rank", &card.rank.to_string())?;

    let title = doc.create_element("div")?;
    title.set_text_content(Some(card.title));
    tile.append_child(&title)?;

    let value = doc.create_element("div")?;
    value.set_class_name("card-value");
    value.set_text_content(Some(card.display));
    tile.append_child(&value)?;

    Ok(tile)
}

// --- Modal & score submission -----------------------------------------------

fn open_modal(final_score: u32) {
    set_text(MODAL_SCORE, &final_score.to_string());
    if let Some(input) = input_element(MODAL_INPUT) {
        input.set_value("");
    }
    style_display(MODAL_ERROR, "none");
    style_display(MODAL, "flex");
    if let Some(input) = input_element(MODAL_INPUT) {
        input.focus().ok();
    }
}

fn close_modal() {
    style_display(MODAL, "none");
}

fn show_modal_error(text: &str) {
    set_text(MODAL_ERROR, text);
    style_display(MODAL_ERROR, "block");
}

fn on_submit() {
    let raw = input_element(MODAL_INPUT)
        .map(|i| i.value())
        .unwrap_or_default();
    let Some(name) = leaderboard::validate_name(&raw).map(str::to_owned) else {
        // Validation failure stays local; no request goes out.
        show_modal_error("Please enter a name.");
        return;
    };

    let score = APP.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let app = borrow.as_mut()?;
        if app.submitting {
            return None;
        }
        app.submitting = true;
        Some(app.session.score())
    });
    let Some(score) = score else { return };

    spawn_local(async move {
        let outcome = leaderboard::submit(&name, score).await;
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.submitting = false;
            }
        });
        match outcome {
            Ok(stats) => {
                close_modal();
                set_stats_line(&stats_message(&stats));
                refresh_highscores().await;
            }
            Err(err) => {
                console::error_1(&JsValue::from_str(&format!("score submit failed: {err}")));
                show_modal_error("Failed to submit score. Please try again.");
            }
        }
    });
}

fn on_cancel() {
    // Dismissal skips the submit but still refreshes the table.
    close_modal();
    spawn_local(async {
        refresh_highscores().await;
    });
}

fn wire_modal_overlay(doc: &Document) -> Result<(), JsValue> {
    let modal = doc
        .get_element_by_id(MODAL)
        .ok_or_else(|| JsValue::from_str("missing modal element"))?;
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        let Some(target) = evt.target() else { return };
        let Ok(el) = target.dyn_into::<Element>() else {
            return;
        };
        // Only a click on the overlay itself dismisses; clicks inside the
        // dialog bubble up with a different target.
        if el.id() == MODAL {
            on_cancel();
        }
    }) as Box<dyn FnMut(_)>);
    modal.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_enter_key(doc: &Document) -> Result<(), JsValue> {
    let input = doc
        .get_element_by_id(MODAL_INPUT)
        .ok_or_else(|| JsValue::from_str("missing name input"))?;
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if evt.key() == "Enter" {
            evt.prevent_default();
            on_submit();
        }
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- High-score table -------------------------------------------------------

async fn refresh_highscores() {
    match leaderboard::fetch_top(TOP_LIMIT).await {
        Ok(rows) => render_highscores(&rows),
        Err(err) => {
            // Read failures never reach the player; log and show an empty table.
            console::error_1(&JsValue::from_str(&format!(
                "failed to load highscores: {err}"
            )));
            render_highscores(&[]);
        }
    }
}

fn render_highscores(rows: &[ScoreRow]) {
    let Some(doc) = document() else { return };
    let Some(body) = doc.query_selector(TABLE_BODY_SELECTOR).ok().flatten() else {
        return;
    };
    clear_children(&body);
    for row in rows {
        let Ok(tr) = doc.create_element("tr") else {
            continue;
        };
        for cell_text in [
            row.name.clone(),
            row.score.to_string(),
            fmt_timestamp(row.timestamp.as_deref()),
        ] {
            if let Ok(td) = doc.create_element("td") {
                td.set_text_content(Some(&cell_text));
                tr.append_child(&td).ok();
            }
        }
        body.append_child(&tr).ok();
    }
}

/// Local-display date/time; unparseable input falls back to the raw string.
fn fmt_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        raw.to_string()
    } else {
        String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
    }
}

// --- Small DOM helpers ------------------------------------------------------

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn set_text(id: &str, text: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}

fn set_message(html: &str, class: Option<&str>) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(MESSAGE)) {
        el.set_class_name(class.unwrap_or(""));
        el.set_inner_html(html);
    }
}

/// Add a line below whatever the message element already shows (used for the
/// game-over banner after a wrong-order message).
fn append_message(html: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(MESSAGE)) {
        let existing = el.inner_html();
        if existing.is_empty() {
            el.set_inner_html(html);
        } else {
            el.set_inner_html(&format!("{existing}<br>{html}"));
        }
    }
}

fn set_stats_line(html: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(STATS_LINE)) {
        el.set_inner_html(html);
    }
}

fn set_score_label(score: u32) {
    set_text(SCORE_LABEL, &format!("Score: {score}"));
}

fn set_timer_label(secs: u32) {
    set_text(TIMER_LABEL, &format!("Time Left: {secs}s"));
}

fn style_display(id: &str, value: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        if let Ok(html) = el.dyn_into::<HtmlElement>() {
            html.style().set_property("display", value).ok();
        }
    }
}

fn class_toggle(id: &str, class: &str, on: bool) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        let list = el.class_list();
        let result = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        result.ok();
    }
}

fn input_element(id: &str) -> Option<HtmlInputElement> {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

fn clear_children(el: &Element) {
    while let Some(child) = el.first_child() {
        el.remove_child(&child).ok();
    }
}

fn fill_year(doc: &Document) {
    if let Some(el) = doc.get_element_by_id(YEAR) {
        el.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    }
}

fn wire_click(doc: &Document, id: &str, handler: fn()) -> Result<(), JsValue> {
    let el = doc
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str("missing clickable element"))?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        handler();
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
