use yew::prelude::*;

use crate::model::SnapMode;
use crate::settings::{Preset, Settings, snap_mode_label};

const SNAP_STEPS: [f64; 4] = [5.0, 15.0, 45.0, 90.0];

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
    pub on_forget: Callback<()>,
}

fn choice_style(selected: bool) -> &'static str {
    if selected {
        "background:#1f6feb; border:1px solid #388bfd; color:#fff;"
    } else {
        ""
    }
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Emits an edited copy of the current settings
    let edit = |apply: fn(&mut Settings)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = current.clone();
            apply(&mut next);
            cb.emit(next);
        })
    };
    let toggle_rotate_cb = edit(|s| s.fields.rotate = !s.fields.rotate);
    let toggle_magnify_cb = edit(|s| s.fields.magnify = !s.fields.magnify);
    let toggle_drag_cb = edit(|s| s.fields.drag = !s.fields.drag);
    let forget_cb = {
        let cb = props.on_forget.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Forget saved settings and go back to the defaults?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    let active_preset = props.settings.preset();
    let preset_buttons = Preset::ALL.into_iter().map(|p| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let onclick = Callback::from(move |_| cb.emit(current.with_preset(p)));
        html! {
            <button onclick={onclick} style={choice_style(active_preset == Some(p))}>{ p.label() }</button>
        }
    });
    let mode_buttons = [SnapMode::Truncate, SnapMode::Nearest].into_iter().map(|mode| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let onclick = Callback::from(move |_| {
            let mut next = current.clone();
            next.snap.mode = mode;
            cb.emit(next);
        });
        html! {
            <button onclick={onclick} style={choice_style(props.settings.snap.mode == mode)}>{ snap_mode_label(mode) }</button>
        }
    });
    let step_buttons = SNAP_STEPS.into_iter().map(|step| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let onclick = Callback::from(move |_| {
            let mut next = current.clone();
            next.snap.step = step;
            cb.emit(next);
        });
        html! {
            <button onclick={onclick} style={choice_style(props.settings.snap.step == step)}>{ format!("{}°", step) }</button>
        }
    });
    let fields = props.settings.fields;

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <div style="font-size:12px; opacity:0.7;">{"Preset"}</div>
                { for preset_buttons }
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={fields.rotate} onclick={toggle_rotate_cb} />
                    <span>{"Rotate"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={fields.magnify} onclick={toggle_magnify_cb} />
                    <span>{"Magnify"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={fields.drag} onclick={toggle_drag_cb} />
                    <span>{"Drag"}</span>
                </label>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <div style="font-size:12px; opacity:0.7;">{"Rotation snap"}</div>
                <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for step_buttons }</div>
                <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for mode_buttons }</div>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={forget_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Forget Saved Settings"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Changing settings during a gesture drops it without committing."}</div>
        </div>
    </div>}
}
