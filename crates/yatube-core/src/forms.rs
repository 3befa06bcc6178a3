//! Post form binding and validation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Group, Post, PostDraft};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Field name to error messages. Non-field errors live under `"__all__"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub const NON_FIELD: &'static str = "__all__";

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        self.field(Self::NON_FIELD)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The `text`/`group` form for creating and editing posts.
///
/// Holds raw submitted values so an invalid form can be shown again as the
/// user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostForm {
    pub text: String,
    pub group: String,
    pub choices: Vec<Group>,
    pub errors: FormErrors,
}

impl PostForm {
    pub const FIELDS: [&'static str; 2] = ["text", "group"];

    /// An empty form.
    pub fn unbound(choices: Vec<Group>) -> Self {
        Self::bind(String::new(), String::new(), choices)
    }

    /// A form pre-filled with the current values of `post`.
    pub fn for_post(post: &Post, choices: Vec<Group>) -> Self {
        let group = post.group_id.map(|id| id.to_string()).unwrap_or_default();
        Self::bind(post.text.clone(), group, choices)
    }

    /// A form holding submitted values.
    pub fn bind(text: String, group: String, choices: Vec<Group>) -> Self {
        Self {
            text,
            group,
            choices,
            errors: FormErrors::default(),
        }
    }

    /// The group currently selected, if the raw value names one of the choices.
    pub fn selected_group(&self) -> Option<&Group> {
        let id: i64 = self.group.trim().parse().ok()?;
        self.choices.iter().find(|g| g.id == id)
    }

    /// Clean the submitted values.
    ///
    /// On failure the form is returned with its errors filled in.
    pub fn validate(mut self) -> Result<PostDraft, Self> {
        let mut errors = FormErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let group_id = match self.group.trim() {
            "" => None,
            _ => match self.selected_group() {
                Some(group) => Some(group.id),
                None => {
                    errors.add("group", INVALID_CHOICE);
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(PostDraft {
                text: text.to_string(),
                group_id,
            })
        } else {
            self.errors = errors;
            Err(self)
        }
    }
}
