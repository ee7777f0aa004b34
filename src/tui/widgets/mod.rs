pub mod form_view;
pub mod row;
pub mod select_modal;
pub mod status_bar;

#[cfg(test)]
pub mod testing;

pub use form_view::render_form;
pub use row::render_row;
pub use select_modal::render_select_modal;
pub use status_bar::render_status_bar;
