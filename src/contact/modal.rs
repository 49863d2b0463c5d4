use super::compose::{Composer, ContactForm};
use super::handoff::{Handoff, HandoffError};

/// Which form field receives typed input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

/// The contact overlay: visibility plus the form being edited.
#[derive(Debug, Default)]
pub struct ContactModal {
    visible: bool,
    pub form: ContactForm,
    pub focus: FormField,
}

impl ContactModal {
    pub fn show(&mut self) {
        self.visible = true;
        self.focus = FormField::Name;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.form.name,
            FormField::Email => &mut self.form.email,
            FormField::Message => &mut self.form.message,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.field_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Compose the contact message, hand it off and hide the overlay.
    ///
    /// The overlay is hidden whatever the handoff outcome.
    pub fn submit(
        &mut self,
        composer: &Composer,
        handoff: &dyn Handoff,
    ) -> Result<(), HandoffError> {
        let message = composer.contact(&self.form);
        let result = handoff.hand_off(&message);
        self.hide();
        result
    }
}
