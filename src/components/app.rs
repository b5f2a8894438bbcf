use super::{
    controls_panel::ControlsPanel, event_log::EventLog, settings_modal::SettingsModal,
    stage::Stage, state_panel::StatePanel,
};
use crate::settings::{Settings, snap_mode_label};
use crate::state::{ScreenAction, ScreenState};
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(Settings::load);
    let screen = {
        let initial = (*settings).clone();
        use_reducer(move || ScreenState::new(&initial))
    };
    let open_settings = use_state(|| false);

    // Persist settings & reconfigure the tracker when channels or snapping change
    {
        let screen = screen.clone();
        use_effect_with((*settings).clone(), move |s| {
            s.save();
            if screen.tracker.fields() != s.fields || screen.snap != s.snap {
                screen.dispatch(ScreenAction::Configure {
                    settings: s.clone(),
                    at_ms: js_sys::Date::now(),
                });
            }
            || ()
        });
    }
    // Console trace of every transition
    {
        let screen_log = screen.clone();
        use_effect_with(screen.version, move |_| {
            if let Some(d) = &screen_log.last.diagnostic {
                cwarn(&d.to_string());
            }
            if let Some(ev) = &screen_log.last.event {
                clog(&ev.to_string());
            }
            || ()
        });
    }

    let on_change = {
        let settings = settings.clone();
        Callback::from(move |s: Settings| settings.set(s.sanitized()))
    };
    let on_forget = {
        let settings = settings.clone();
        Callback::from(move |_| {
            Settings::clear_saved();
            settings.set(Settings::default());
        })
    };
    let on_open_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(true))
    };
    let on_close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(false))
    };
    let on_reset = {
        let screen = screen.clone();
        Callback::from(move |_| {
            screen.dispatch(ScreenAction::Reset {
                at_ms: js_sys::Date::now(),
            })
        })
    };

    let mode_label = match settings.preset() {
        Some(p) => p.label().to_string(),
        None => "Custom channels".to_string(),
    };
    let snap_label = format!(
        "Snap: {}° ({})",
        settings.snap.step,
        snap_mode_label(settings.snap.mode)
    );

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; color:#c9d1d9; font-family:sans-serif;">
            <Stage
                dispatcher={screen.dispatcher()}
                preview={screen.preview()}
                active={screen.tracker.is_active()}
                subject={settings.subject}
                thresholds={settings.thresholds}
                fields={screen.tracker.fields()}
                generation={screen.generation}
            />
            <StatePanel
                object={screen.object.clone()}
                current={screen.tracker.current().copied()}
                mode_label={mode_label}
            />
            <ControlsPanel
                on_open_settings={on_open_settings}
                on_reset={on_reset}
                snap_label={snap_label}
            />
            <EventLog entries={screen.log.clone()} />
            <SettingsModal
                show={*open_settings}
                settings={(*settings).clone()}
                on_change={on_change}
                on_close={on_close_settings}
                on_forget={on_forget}
            />
        </div>
    }
}
