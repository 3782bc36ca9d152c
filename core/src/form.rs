use bookmarky_store::Bookmark;
use bookmarky_store::BookmarkDraft;
use url::Url;

/// The add/edit form as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkForm {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFieldError {
    Required,
    Invalid,
    NotReachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFieldError {
    Required,
}

/// Field-level errors. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub url: Option<UrlFieldError>,
    pub title: Option<TitleFieldError>,
}

/// A form that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub url: Url,
    /// The URL as entered (trimmed), which is what gets stored.
    pub url_text: String,
    pub title: String,
}

impl BookmarkForm {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidForm, FormErrors> {
        let url_text = self.url.trim();
        let title = self.title.trim();
        let mut errors = FormErrors::default();

        let url = if url_text.is_empty() {
            errors.url = Some(UrlFieldError::Required);
            None
        } else {
            match Url::parse(url_text) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("rejecting url {url_text:?}: {e}");
                    errors.url = Some(UrlFieldError::Invalid);
                    None
                }
            }
        };
        if title.is_empty() {
            errors.title = Some(TitleFieldError::Required);
        }

        match url {
            Some(url) if errors.is_empty() => Ok(ValidForm {
                url,
                url_text: url_text.to_string(),
                title: title.to_string(),
            }),
            _ => Err(errors),
        }
    }

    /// Copy the editable fields of `bookmark` into the form.
    pub fn patch(&mut self, bookmark: &Bookmark) {
        self.url = bookmark.url.clone();
        self.title = bookmark.title.clone();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ValidForm {
    pub fn into_draft(self) -> BookmarkDraft {
        BookmarkDraft::new(self.url_text, self.title)
    }

    pub fn into_bookmark(self, id: String) -> Bookmark {
        Bookmark {
            id,
            url: self.url_text,
            title: self.title,
        }
    }
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none()
    }

    pub fn not_reachable() -> Self {
        Self {
            url: Some(UrlFieldError::NotReachable),
            title: None,
        }
    }
}

impl std::fmt::Display for UrlFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UrlFieldError::Required => "URL is required",
            UrlFieldError::Invalid => "URL must be a valid absolute URL",
            UrlFieldError::NotReachable => "URL not reachable",
        })
    }
}

impl std::fmt::Display for TitleFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleFieldError::Required => f.write_str("title is required"),
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.url, &self.title) {
            (Some(u), Some(t)) => write!(f, "{u}; {t}"),
            (Some(u), None) => write!(f, "{u}"),
            (None, Some(t)) => write!(f, "{t}"),
            (None, None) => f.write_str("no errors"),
        }
    }
}
