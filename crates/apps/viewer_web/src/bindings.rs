//! Browser entry points. The page keeps one [`App`] and its main map in
//! thread-local state; every call exchanges JSON with the host.
//!
//! Subscriber callbacks may call [`state`], [`step_country`], [`subscribe`]
//! and [`unsubscribe`]; the entry points that touch the main map return an
//! error when called from inside a callback.

use console_error_panic_hook::set_once;
use foundation::{CountryCode, LonLat};
use layers::{GeoFeature, ScreenPoint, filter_options};
use runtime::SubscriptionId;
use scene::navigation::{Direction, navigate};
use scene::{MapContext, SharedSelection};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::pages::MainMap;
use crate::session::Slot;

thread_local! {
    static MAIN: Slot<MainMap> = const { Slot::new() };
    static SHARED: Slot<SharedSelection> = const { Slot::new() };
}

/// Clone of the shared store handle; no slot access outlives the call.
fn shared() -> Result<SharedSelection, JsValue> {
    SHARED.with(|slot| slot.with(|shared| shared.clone()).map_err(js_error))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn with_main<R>(f: impl FnOnce(&mut MainMap) -> Result<R, JsValue>) -> Result<R, JsValue> {
    MAIN.with(|slot| slot.with(f).map_err(js_error)?)
}

fn parse_code(raw: &str) -> Result<CountryCode, JsValue> {
    CountryCode::parse(raw).map_err(js_error)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the application from the bundled tables and opens the main map
/// with `query` (the page's `location.search`).
#[wasm_bindgen]
pub fn open_main_map(query: &str) -> Result<(), JsValue> {
    let app = match App::builtin() {
        Ok(app) => app,
        Err(err) => {
            let msg = format!("world map init error: {err}");
            web_sys::console::log_1(&JsValue::from_str(&msg));
            return Err(js_error(err));
        }
    };
    let main = app.main_map(query);
    SHARED.with(|slot| slot.set(app.shared().clone())).map_err(js_error)?;
    MAIN.with(|slot| slot.set(main)).map_err(js_error)
}

/// `features_json`: array of `{ "key": ..., "raw_id": ... }`.
#[wasm_bindgen]
pub fn set_features(features_json: &str) -> Result<(), JsValue> {
    let features: Vec<GeoFeature> = serde_json::from_str(features_json).map_err(js_error)?;
    with_main(|main| {
        main.view.set_features(features);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn paint() -> Result<String, JsValue> {
    with_main(|main| to_json(&main.view.paint()))
}

#[wasm_bindgen]
pub fn state() -> Result<String, JsValue> {
    to_json(&shared()?.state())
}

/// Returns the outcome, or `null` when the click was dropped.
#[wasm_bindgen]
pub fn click_feature(key: &str) -> Result<String, JsValue> {
    with_main(|main| to_json(&main.view.click(key)))
}

/// Returns the tooltip to show, or `null`.
#[wasm_bindgen]
pub fn hover_feature(key: &str, x: f64, y: f64) -> Result<String, JsValue> {
    with_main(|main| to_json(&main.view.pointer_enter(key, ScreenPoint::new(x, y))))
}

#[wasm_bindgen]
pub fn leave_feature() -> Result<(), JsValue> {
    with_main(|main| {
        main.view.pointer_leave();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn move_end(lon: f64, lat: f64, zoom: f64) -> Result<(), JsValue> {
    with_main(|main| {
        main.view.move_end(LonLat::new(lon, lat), zoom);
        Ok(())
    })
}

/// Options matching `query`, in table order.
#[wasm_bindgen]
pub fn search(query: &str) -> Result<String, JsValue> {
    with_main(|main| to_json(&filter_options(main.search.options(), query)))
}

/// Selects `code`; an empty or missing code clears the selection.
#[wasm_bindgen]
pub fn choose_country(code: Option<String>) -> Result<String, JsValue> {
    let code = match code.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_code(raw)?),
    };
    with_main(|main| to_json(&main.search.choose(code.as_ref())))
}

#[wasm_bindgen]
pub fn zoom_in() -> Result<(), JsValue> {
    with_main(|main| {
        main.controls.zoom_in();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn zoom_out() -> Result<(), JsValue> {
    with_main(|main| {
        main.controls.zoom_out();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn reset_view() -> Result<(), JsValue> {
    with_main(|main| {
        main.controls.reset();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn toggle_unselected() -> Result<(), JsValue> {
    with_main(|main| {
        main.controls.toggle_unselected();
        Ok(())
    })
}

/// Steps the shared selection; `forward == false` goes backwards.
#[wasm_bindgen]
pub fn step_country(forward: bool) -> Result<Option<String>, JsValue> {
    let direction = if forward { Direction::Next } else { Direction::Prev };
    let mut shared = shared()?;
    Ok(navigate(&mut shared, direction).map(|c| c.to_string()))
}

/// Calls `callback(stateJson)` after every change of the shared store.
/// Returns an id for [`unsubscribe`].
#[wasm_bindgen]
pub fn subscribe(callback: js_sys::Function) -> Result<f64, JsValue> {
    let mut shared = shared()?;
    let id = shared.subscribe(move |change| {
        let payload = match serde_json::to_string(&change.state) {
            Ok(json) => JsValue::from_str(&json),
            Err(err) => {
                web_sys::console::log_1(&js_error(err));
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
            web_sys::console::log_1(&err);
        }
    });
    Ok(id.to_f64())
}

/// `id` must be a value returned by [`subscribe`].
#[wasm_bindgen]
pub fn unsubscribe(id: f64) -> Result<bool, JsValue> {
    let id = SubscriptionId::from_f64(id)
        .ok_or_else(|| JsValue::from_str(&format!("invalid subscription id {id}")))?;
    let mut shared = shared()?;
    Ok(shared.unsubscribe(id))
}
