//! Modal form state.

/// A modal dialog holding a form.
///
/// Closing keeps the form contents; opening through
/// [`Modal::open_with`] replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal<F> {
    title: &'static str,
    form: F,
    open: bool,
}

impl<F> Modal<F> {
    /// Open the modal with a title and fresh form contents.
    pub fn open_with(&mut self, title: &'static str, form: F) {
        self.title = title;
        self.form = form;
        self.open = true;
    }

    /// Close the modal.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub const fn form(&self) -> &F {
        &self.form
    }

    /// Mutable access to the form fields, for hosts filling them in.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }
}
