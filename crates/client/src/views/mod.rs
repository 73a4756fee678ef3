//! Text views of the record lists and their modal forms.
//!
//! Rendering is a pure function of controller state: the same records
//! always produce the same text.

pub mod customers;
pub mod orders;

pub use customers::{CustomerForm, render_customer_form, render_customers};
pub use orders::{OrderForm, render_order_form, render_orders};

/// Render a template, logging and returning an empty view on failure.
fn render_or_log(template: &impl askama::Template, view: &str) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!(view, "Template render error: {}", e);
        String::new()
    })
}
