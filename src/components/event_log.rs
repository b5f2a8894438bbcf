use std::collections::VecDeque;
use yew::prelude::*;

use crate::state::LogEntry;
use crate::util::format_clock;

const VISIBLE_ENTRIES: usize = 12;

#[derive(Properties, PartialEq, Clone)]
pub struct EventLogProps {
    pub entries: VecDeque<LogEntry>,
}

#[function_component(EventLog)]
pub fn event_log(props: &EventLogProps) -> Html {
    if props.entries.is_empty() {
        return html! {};
    }
    html! {
        <div style="position:absolute; left:12px; bottom:44px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 10px; max-width:min(560px, 90vw); display:flex; flex-direction:column; gap:2px; font-size:11px; font-family:monospace; pointer-events:none;">
            { for props.entries.iter().rev().take(VISIBLE_ENTRIES).map(|e| {
                let color = if e.warning { "#d29922" } else { "#c9d1d9" };
                html! {
                    <div style={format!("color:{}; white-space:nowrap; overflow:hidden; text-overflow:ellipsis;", color)}>
                        <span style="opacity:0.5;">{ format_clock(e.at_ms) }</span>{" "}{ e.text.clone() }
                    </div>
                }
            }) }
        </div>
    }
}
