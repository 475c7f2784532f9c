#![forbid(unsafe_code)]

//! Input boundaries that create new menu entries.
//!
//! - [`PageSelection`]: a checklist of existing pages; checked pages become
//!   root entries with a slug URL.
//! - [`CustomLinkForm`]: free text + URL fields; empty fields are flagged
//!   invalid for a while instead of failing hard.
//!
//! Both produce [`NewEntry`] drafts. Allocating IDs and appending to the
//! tree is the owner's job.

use std::time::Duration;

use navtree_model::MenuKind;

/// Default time an invalid-field marker stays up.
pub const DEFAULT_INVALID_MARKER_TIMEOUT: Duration = Duration::from_millis(2000);

/// A menu entry ready to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub url: String,
    pub kind: MenuKind,
}

/// Site-relative URL for a page title: `/` + lowercase title with each
/// whitespace run replaced by `-`.
#[must_use]
pub fn page_slug_url(title: &str) -> String {
    let mut url = String::with_capacity(title.len() + 1);
    url.push('/');
    let mut in_space = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_space {
                url.push('-');
            }
            in_space = true;
        } else {
            url.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    url
}

/// One selectable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOption {
    pub title: String,
    pub kind: MenuKind,
    pub checked: bool,
}

impl PageOption {
    #[must_use]
    pub fn new(title: impl Into<String>, kind: MenuKind) -> Self {
        Self {
            title: title.into(),
            kind,
            checked: false,
        }
    }
}

/// Checklist of pages that can be added to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSelection {
    options: Vec<PageOption>,
}

impl PageSelection {
    #[must_use]
    pub fn new(options: Vec<PageOption>) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &[PageOption] {
        &self.options
    }

    /// Set the check state of option `index`. Returns false if out of range.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> bool {
        match self.options.get_mut(index) {
            Some(option) => {
                option.checked = checked;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.options.iter().filter(|option| option.checked).count()
    }

    /// Drafts for every checked option, in option order; unchecks them.
    pub fn take_checked(&mut self) -> Vec<NewEntry> {
        self.options
            .iter_mut()
            .filter(|option| option.checked)
            .map(|option| {
                option.checked = false;
                NewEntry {
                    url: page_slug_url(&option.title),
                    title: option.title.clone(),
                    kind: option.kind.clone(),
                }
            })
            .collect()
    }
}

/// Which custom-link field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomLinkField {
    Text,
    Url,
}

/// One text input with a transient invalid marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    value: String,
    /// Monotonic deadline after which the marker clears.
    invalid_until: Option<Duration>,
}

impl FieldState {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.invalid_until.is_some()
    }

    /// Replace the value; any keystroke clears the invalid marker.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.invalid_until = None;
    }

    fn clear(&mut self) {
        self.value.clear();
        self.invalid_until = None;
    }

    fn mark_invalid(&mut self, until: Duration) {
        self.invalid_until = Some(until);
    }

    fn expire(&mut self, now: Duration) -> bool {
        match self.invalid_until {
            Some(deadline) if now >= deadline => {
                self.invalid_until = None;
                true
            }
            _ => false,
        }
    }
}

/// Fields that were empty on a rejected submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomLinkRejection {
    pub missing_text: bool,
    pub missing_url: bool,
}

impl CustomLinkRejection {
    /// Flagged fields in display order.
    #[must_use]
    pub fn fields(&self) -> Vec<CustomLinkField> {
        let mut fields = Vec::with_capacity(2);
        if self.missing_text {
            fields.push(CustomLinkField::Text);
        }
        if self.missing_url {
            fields.push(CustomLinkField::Url);
        }
        fields
    }
}

/// Text + URL form for adding a custom link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLinkForm {
    text: FieldState,
    url: FieldState,
    marker_timeout: Duration,
}

impl Default for CustomLinkForm {
    fn default() -> Self {
        Self::new(DEFAULT_INVALID_MARKER_TIMEOUT)
    }
}

impl CustomLinkForm {
    #[must_use]
    pub fn new(marker_timeout: Duration) -> Self {
        Self {
            text: FieldState::default(),
            url: FieldState::default(),
            marker_timeout,
        }
    }

    #[must_use]
    pub fn field(&self, field: CustomLinkField) -> &FieldState {
        match field {
            CustomLinkField::Text => &self.text,
            CustomLinkField::Url => &self.url,
        }
    }

    pub fn input(&mut self, field: CustomLinkField, value: impl Into<String>) {
        match field {
            CustomLinkField::Text => self.text.set_value(value),
            CustomLinkField::Url => self.url.set_value(value),
        }
    }

    #[must_use]
    pub fn is_invalid(&self, field: CustomLinkField) -> bool {
        self.field(field).is_invalid()
    }

    /// Produce a custom entry, or flag the empty fields until `now + timeout`.
    ///
    /// Values are taken verbatim: whitespace-only input counts as present.
    /// On success both fields are cleared.
    pub fn submit(&mut self, now: Duration) -> Result<NewEntry, CustomLinkRejection> {
        let rejection = CustomLinkRejection {
            missing_text: self.text.value.is_empty(),
            missing_url: self.url.value.is_empty(),
        };
        if rejection.missing_text || rejection.missing_url {
            let until = now.saturating_add(self.marker_timeout);
            if rejection.missing_text {
                self.text.mark_invalid(until);
            }
            if rejection.missing_url {
                self.url.mark_invalid(until);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "navtree.add.custom_rejected",
                missing_text = rejection.missing_text,
                missing_url = rejection.missing_url
            );
            return Err(rejection);
        }

        let entry = NewEntry {
            title: self.text.value.clone(),
            url: self.url.value.clone(),
            kind: MenuKind::Custom,
        };
        self.text.clear();
        self.url.clear();
        Ok(entry)
    }

    /// Expire markers whose deadline has passed. Returns true if any cleared.
    pub fn tick(&mut self, now: Duration) -> bool {
        let text = self.text.expire(now);
        let url = self.url.expire(now);
        text || url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_collapses_whitespace() {
        assert_eq!(page_slug_url("About Us"), "/about-us");
        assert_eq!(page_slug_url("Terms \t and  Conditions"), "/terms-and-conditions");
        assert_eq!(page_slug_url(" Lead"), "/-lead");
        assert_eq!(page_slug_url(""), "/");
    }

    #[test]
    fn take_checked_preserves_order_and_unchecks() {
        let mut selection = PageSelection::new(vec![
            PageOption::new("Home", MenuKind::Page),
            PageOption::new("Blog Post", MenuKind::Other("post".into())),
            PageOption::new("Contact", MenuKind::Page),
        ]);
        assert!(selection.set_checked(2, true));
        assert!(selection.set_checked(1, true));
        assert!(!selection.set_checked(9, true));

        let entries = selection.take_checked();
        assert_eq!(
            entries,
            vec![
                NewEntry {
                    title: "Blog Post".into(),
                    url: "/blog-post".into(),
                    kind: MenuKind::Other("post".into()),
                },
                NewEntry {
                    title: "Contact".into(),
                    url: "/contact".into(),
                    kind: MenuKind::Page,
                },
            ]
        );
        assert_eq!(selection.checked_count(), 0);
        assert!(selection.take_checked().is_empty());
    }

    #[test]
    fn empty_text_is_flagged_and_nothing_is_produced() {
        let mut form = CustomLinkForm::default();
        form.input(CustomLinkField::Url, "https://example.com");
        let rejection = form.submit(Duration::ZERO).expect_err("text missing");
        assert_eq!(rejection.fields(), vec![CustomLinkField::Text]);
        assert!(form.is_invalid(CustomLinkField::Text));
        assert!(!form.is_invalid(CustomLinkField::Url));
        assert_eq!(form.field(CustomLinkField::Url).value(), "https://example.com");
    }

    #[test]
    fn markers_clear_on_timeout() {
        let mut form = CustomLinkForm::default();
        let _ = form.submit(Duration::from_millis(100));
        assert!(form.is_invalid(CustomLinkField::Text));
        assert!(form.is_invalid(CustomLinkField::Url));
        assert!(!form.tick(Duration::from_millis(2099)));
        assert!(form.tick(Duration::from_millis(2100)));
        assert!(!form.is_invalid(CustomLinkField::Text));
        assert!(!form.is_invalid(CustomLinkField::Url));
    }

    #[test]
    fn markers_clear_on_next_keystroke() {
        let mut form = CustomLinkForm::default();
        let _ = form.submit(Duration::ZERO);
        form.input(CustomLinkField::Url, "h");
        assert!(!form.is_invalid(CustomLinkField::Url));
        assert!(form.is_invalid(CustomLinkField::Text));
    }

    #[test]
    fn success_clears_inputs_and_yields_custom_entry() {
        let mut form = CustomLinkForm::default();
        form.input(CustomLinkField::Text, "Docs");
        form.input(CustomLinkField::Url, "https://docs.rs");
        let entry = form.submit(Duration::ZERO).expect("both present");
        assert_eq!(entry.kind, MenuKind::Custom);
        assert_eq!(entry.title, "Docs");
        assert_eq!(form.field(CustomLinkField::Text).value(), "");
        assert_eq!(form.field(CustomLinkField::Url).value(), "");
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut form = CustomLinkForm::default();
        form.input(CustomLinkField::Text, " ");
        form.input(CustomLinkField::Url, " ");
        assert!(form.submit(Duration::ZERO).is_ok());
    }
}
