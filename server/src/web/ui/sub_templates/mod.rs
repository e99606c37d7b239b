pub mod form_inputs;
pub mod show_card;
