use folio_protocol::ContactMessage;

/// Literal status lines shown under the form. The store write is the only
/// fallible operation on the page, and its outcome surfaces as exactly one
/// of these strings.
pub const STATUS_SENDING: &str = "Sending...";
pub const STATUS_SENT: &str = "Message sent successfully!";
pub const STATUS_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

/// The contact form state machine, free of any I/O.
///
/// The draft mutates on every keystroke. `submit` hands the record to the
/// caller for delivery and moves to `Sending`; the caller reports the
/// write's outcome through `resolve`. The draft is cleared only on
/// success, so a failed submission leaves it intact for manual resubmit.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    status: FormStatus,
}

impl Default for FormStatus {
    fn default() -> Self {
        FormStatus::Idle
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = value.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn draft(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The status line to display, if any.
    pub fn status_line(&self) -> Option<&'static str> {
        match self.status {
            FormStatus::Idle => None,
            FormStatus::Sending => Some(STATUS_SENDING),
            FormStatus::Sent => Some(STATUS_SENT),
            FormStatus::Failed => Some(STATUS_FAILED),
        }
    }

    /// Begin a submission.
    ///
    /// Returns the record to deliver, or `None` when a required field is
    /// empty or a submission is already in flight (one at a time; a second
    /// click while sending is rejected rather than duplicated).
    pub fn submit(&mut self) -> Option<ContactMessage> {
        if self.status == FormStatus::Sending {
            return None;
        }
        let draft = self.draft();
        if !draft.is_complete() {
            return None;
        }
        self.status = FormStatus::Sending;
        Some(draft)
    }

    /// Report the outcome of the in-flight write. Ignored unless a
    /// submission is actually pending, which makes stray late callbacks
    /// harmless.
    pub fn resolve<E>(&mut self, result: Result<(), E>) {
        if self.status != FormStatus::Sending {
            return;
        }
        match result {
            Ok(()) => {
                self.status = FormStatus::Sent;
                self.name.clear();
                self.email.clear();
                self.message.clear();
            }
            Err(_) => self.status = FormStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_name("A");
        form.set_email("a@b.com");
        form.set_message("hi");
        form
    }

    #[test]
    fn successful_submission_clears_the_draft() {
        let mut form = filled();
        let msg = form.submit().expect("complete draft submits");
        assert_eq!(msg.name, "A");
        assert_eq!(form.status_line(), Some(STATUS_SENDING));

        form.resolve::<()>(Ok(()));
        assert_eq!(form.status_line(), Some(STATUS_SENT));
        assert_eq!(form.draft(), ContactMessage {
            name: String::new(),
            email: String::new(),
            message: String::new(),
        });
    }

    #[test]
    fn failed_submission_keeps_the_draft() {
        let mut form = filled();
        form.submit();
        form.resolve(Err("network down"));
        assert_eq!(form.status_line(), Some(STATUS_FAILED));
        assert_eq!(form.name(), "A");
        assert_eq!(form.email(), "a@b.com");
        assert_eq!(form.message(), "hi");
    }

    #[test]
    fn empty_fields_do_not_submit() {
        let mut form = ContactForm::new();
        form.set_name("A");
        assert!(form.submit().is_none());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn second_submit_while_sending_is_rejected() {
        let mut form = filled();
        assert!(form.submit().is_some());
        assert!(form.submit().is_none());
        assert_eq!(form.status(), FormStatus::Sending);
    }

    #[test]
    fn resubmit_after_failure_works() {
        let mut form = filled();
        form.submit();
        form.resolve(Err("boom"));
        assert!(form.submit().is_some());
        form.resolve::<()>(Ok(()));
        assert_eq!(form.status(), FormStatus::Sent);
    }

    #[test]
    fn late_resolve_without_pending_submission_is_ignored() {
        let mut form = filled();
        form.resolve::<()>(Ok(()));
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.name(), "A");
    }
}
