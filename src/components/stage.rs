use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::model::ObjectState;
use crate::recognizer::{GestureSource, SourceSignal, TouchRecognizer};
use crate::settings::{FieldSet, Subject, Thresholds};
use crate::state::{ScreenAction, ScreenState, touch_points};

const IMAGE_SRC: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 200 200'><defs><linearGradient id='g' x1='0' y1='0' x2='1' y2='1'><stop offset='0' stop-color='%23ff9f1c'/><stop offset='1' stop-color='%232ec4b6'/></linearGradient></defs><rect width='200' height='200' fill='url(%23g)'/><circle cx='150' cy='50' r='24' fill='%23fff6'/><path d='M0 170 L60 110 L100 150 L140 100 L200 160 L200 200 L0 200 Z' fill='%23011627' fill-opacity='0.6'/></svg>";

#[derive(Properties, PartialEq, Clone)]
pub struct StageProps {
    pub dispatcher: UseReducerDispatcher<ScreenState>,
    /// Object as it should be drawn this frame (persistent + live manipulation).
    pub preview: ObjectState,
    pub active: bool,
    pub subject: Subject,
    pub thresholds: Thresholds,
    pub fields: FieldSet,
    /// Changes whenever the screen is reset or reconfigured.
    pub generation: u64,
}

fn dispatch_signal(dispatcher: &UseReducerDispatcher<ScreenState>, signal: SourceSignal) {
    if signal != SourceSignal::Nothing {
        dispatcher.dispatch(ScreenAction::Signal {
            signal,
            at_ms: js_sys::Date::now(),
        });
    }
}

#[function_component(Stage)]
pub fn stage(props: &StageProps) -> Html {
    let stage_ref = use_node_ref();
    let recognizer = {
        let thresholds = props.thresholds;
        use_mut_ref(move || TouchRecognizer::new(thresholds))
    };

    // Effect: thresholds changed in settings
    {
        let recognizer = recognizer.clone();
        use_effect_with(props.thresholds, move |th| {
            recognizer.borrow_mut().set_thresholds(*th);
            || ()
        });
    }
    {
        let recognizer = recognizer.clone();
        use_effect_with(props.fields, move |fields| {
            recognizer.borrow_mut().set_fields(*fields);
            || ()
        });
    }
    // Effect: reset/reconfigure drops whatever the fingers are doing
    {
        let recognizer = recognizer.clone();
        use_effect_with(props.generation, move |_| {
            recognizer.borrow_mut().reset();
            || ()
        });
    }
    // Mount effect: touch listeners
    {
        let stage_ref = stage_ref.clone();
        let recognizer = recognizer.clone();
        let dispatcher = props.dispatcher.clone();
        use_effect_with((), move |_| {
            let listeners = stage_ref.cast::<HtmlElement>().map(|stage| {
                let touch_cb = {
                    let stage_tc = stage.clone();
                    let recognizer_tc = recognizer.clone();
                    let dispatcher_tc = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        let rect = stage_tc.get_bounding_client_rect();
                        let points = touch_points(&e.touches(), &rect);
                        let signal = recognizer_tc.borrow_mut().touches_changed(&points);
                        dispatch_signal(&dispatcher_tc, signal);
                        e.prevent_default();
                    }) as Box<dyn FnMut(_)>)
                };
                let cancel_cb = {
                    let recognizer_tc = recognizer.clone();
                    let dispatcher_tc = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        let signal = recognizer_tc.borrow_mut().cancel();
                        dispatch_signal(&dispatcher_tc, signal);
                        e.prevent_default();
                    }) as Box<dyn FnMut(_)>)
                };
                for name in ["touchstart", "touchmove", "touchend"] {
                    stage
                        .add_event_listener_with_callback(name, touch_cb.as_ref().unchecked_ref())
                        .ok();
                }
                stage
                    .add_event_listener_with_callback(
                        "touchcancel",
                        cancel_cb.as_ref().unchecked_ref(),
                    )
                    .ok();
                (stage, touch_cb, cancel_cb)
            });
            // Cleanup
            move || {
                if let Some((stage, touch_cb, cancel_cb)) = listeners {
                    for name in ["touchstart", "touchmove", "touchend"] {
                        let _ = stage.remove_event_listener_with_callback(
                            name,
                            touch_cb.as_ref().unchecked_ref(),
                        );
                    }
                    let _ = stage.remove_event_listener_with_callback(
                        "touchcancel",
                        cancel_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let p = &props.preview;
    let (left, top) = match p.position {
        Some(pt) => (format!("{}px", pt.x), format!("{}px", pt.y)),
        None => ("50%".to_string(), "50%".to_string()),
    };
    let outline = if props.active {
        "outline:2px dashed #58a6ff; outline-offset:6px;"
    } else {
        ""
    };
    let object_style = format!(
        "position:absolute; left:{}; top:{}; width:{}px; height:{}px; transform:translate(-50%, -50%) rotate({}deg); pointer-events:none; {}",
        left, top, p.width, p.height, p.rotation, outline
    );

    html! {
        <div ref={stage_ref} style="position:absolute; inset:0; overflow:hidden; touch-action:none; user-select:none; background:#0d1117;">
            {
                match props.subject {
                    Subject::Rectangle => html! {
                        <div style={format!("{} background:orange; box-shadow:0 0 10px rgba(0,0,0,0.6);", object_style)}></div>
                    },
                    Subject::Image => html! {
                        <img src={IMAGE_SRC} draggable="false" style={format!("{} object-fit:cover; border-radius:6px; box-shadow:0 0 10px rgba(0,0,0,0.6);", object_style)} />
                    },
                }
            }
            <div style="position:absolute; left:50%; bottom:16px; transform:translateX(-50%); font-size:12px; opacity:0.6; pointer-events:none;">
                {"Use two fingers to rotate and pinch; drag to move. Rotation snaps to the grid on release."}
            </div>
        </div>
    }
}
