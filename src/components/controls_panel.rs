use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_open_settings: Callback<()>,
    pub on_reset: Callback<()>,
    pub snap_label: String,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={settings_cb}>{"Settings"}</button>
        <button onclick={reset_cb}>{"Reset Object"}</button>
        <div style="font-size:11px; opacity:0.7;">{ props.snap_label.clone() }</div>
    </div>}
}
