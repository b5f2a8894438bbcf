pub mod app;
pub mod controls_panel;
pub mod event_log;
pub mod settings_modal;
pub mod stage;
pub mod state_panel;
