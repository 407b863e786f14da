pub mod category_list;
pub mod header;
pub mod help_overlay;
pub mod picker;
