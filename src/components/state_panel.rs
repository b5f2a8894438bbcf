use yew::prelude::*;

use crate::model::{Manipulation, ObjectState};
use crate::util::format_degrees;

#[derive(Properties, PartialEq, Clone)]
pub struct StatePanelProps {
    /// Committed state, not the live preview.
    pub object: ObjectState,
    pub current: Option<Manipulation>,
    pub mode_label: String,
}

#[function_component]
pub fn StatePanel(props: &StatePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:110px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let o = &props.object;
    let position = match o.position {
        Some(p) => format!("{:.0}, {:.0}", p.x, p.y),
        None => "centred".to_string(),
    };
    let (status, status_color) = match &props.current {
        Some(_) => ("Active", "#3fb950"),
        None => ("Idle", "#8b949e"),
    };
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:260px; display:flex; flex-direction:column; gap:8px; font-size:14px; pointer-events:none;">
            <div style="font-size:12px; opacity:0.7;">{ props.mode_label.clone() }</div>
            <div style={row_style}>
                <span style={label_style}>{"Size"}</span>
                <span style={value_style}>{ format!("{:.0} × {:.0}", o.width, o.height) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Rotation"}</span>
                <span style={value_style}>{ format_degrees(o.rotation) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Position"}</span>
                <span style={value_style}>{ position }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Gesture"}</span>
                <span style={format!("{} color:{};", value_style, status_color)}>{ status }</span>
            </div>
            {
                if let Some(m) = &props.current {
                    html! { <div style="font-size:12px; line-height:1.3; background:#1c2128; border:1px solid #30363d; padding:4px 6px; border-radius:6px; font-variant-numeric:tabular-nums;">{ if m.is_empty() { "(nothing measured)".to_string() } else { m.to_string() } }</div> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
