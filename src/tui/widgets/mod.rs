pub mod chat;
pub mod help;
pub mod input_bar;
pub mod root;
pub mod sidebar;
