pub mod menu;
pub mod notification;
pub mod progress_bar;
pub mod quiz_card;
pub mod result_panel;
pub mod settings_panel;
