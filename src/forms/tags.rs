use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::{NewTag, UpdateTag};
use crate::forms::sanitize_inline_text;

/// Tags are short labels; longer names are rejected before sanitizing.
const TAG_NAME_MAX_LEN: u64 = 64;

pub type TagFormResult<T> = Result<T, TagFormError>;

#[derive(Debug, Error)]
pub enum TagFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("tag name cannot be empty")]
    EmptyName,
}

/// Body of `POST /tags`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTagForm {
    #[validate(length(min = 1, max = TAG_NAME_MAX_LEN))]
    pub name: String,
}

impl AddTagForm {
    pub fn into_new_tag(self, hub_id: i32) -> TagFormResult<NewTag> {
        self.validate()?;
        Ok(NewTag::new(hub_id, tag_name(&self.name)?))
    }
}

/// Body of `POST /tags/rename`.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameTagForm {
    #[validate(range(min = 1))]
    pub tag_id: i32,
    #[validate(length(min = 1, max = TAG_NAME_MAX_LEN))]
    pub name: String,
}

impl RenameTagForm {
    /// Builds a rename patch stamped with the current time.
    pub fn into_update_tag(self) -> TagFormResult<UpdateTag> {
        self.validate()?;
        Ok(UpdateTag::now(tag_name(&self.name)?))
    }
}

fn tag_name(raw: &str) -> TagFormResult<String> {
    let name = sanitize_inline_text(raw);
    if name.is_empty() {
        Err(TagFormError::EmptyName)
    } else {
        Ok(name)
    }
}
