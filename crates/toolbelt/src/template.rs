//! Text templates with `%name%` placeholders.
//!
//! A [`Template`] is validated on construction: it must be non-empty and
//! declare at least one placeholder. [`Templates`] stores templates in a
//! [`TypedContainer`] under integer or string indexes.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use toolbelt_collection::{Key, TypedContainer};
use toolbelt_macros::{reflect_methods, Reflect};

use crate::error::{Result, TemplateError};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%(\w+)%").expect("placeholder pattern is valid"));

/// A text template.
///
/// # Example
///
/// ```
/// use toolbelt::Template;
///
/// let template = Template::new("Hello %name%, you have %count% messages").unwrap();
/// assert_eq!(template.placeholders(), vec!["name", "count"]);
///
/// let text = template.fill([("name", "Ann"), ("count", "3")]).unwrap();
/// assert_eq!(text, "Hello Ann, you have 3 messages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(try_from = "String", into = "String")]
#[reflect(methods)]
pub struct Template {
    #[reflect(readonly)]
    content: String,
}

impl Template {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::Empty`] if `content` is empty
    /// - [`TemplateError::NoPlaceholders`] if `content` declares no placeholder
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(TemplateError::Empty);
        }
        if !PLACEHOLDER.is_match(&content) {
            return Err(TemplateError::NoPlaceholders { content });
        }
        Ok(Template { content })
    }

    /// Returns the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for captures in PLACEHOLDER.captures_iter(&self.content) {
            if let Some(name) = captures.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Replaces every placeholder with its value.
    ///
    /// Extra values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholders`] naming every
    /// placeholder without a value.
    pub fn fill<I, K, V>(&self, values: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        let values: HashMap<String, String> = values
            .into_iter()
            .map(|(name, value)| (name.into(), value.to_string()))
            .collect();

        let missing: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| !values.contains_key(*name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            debug!(template = %self.content, ?missing, "template values missing");
            return Err(TemplateError::MissingPlaceholders {
                content: self.content.clone(),
                missing,
            });
        }

        Ok(PLACEHOLDER
            .replace_all(&self.content, |captures: &Captures<'_>| {
                values
                    .get(&captures[1])
                    .cloned()
                    .unwrap_or_else(|| captures[0].to_string())
            })
            .into_owned())
    }
}

#[reflect_methods]
impl Template {
    /// Returns the number of distinct placeholders.
    pub fn get_placeholder_count(&self) -> usize {
        self.placeholders().len()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl TryFrom<String> for Template {
    type Error = TemplateError;

    fn try_from(content: String) -> Result<Self> {
        Template::new(content)
    }
}

impl TryFrom<&str> for Template {
    type Error = TemplateError;

    fn try_from(content: &str) -> Result<Self> {
        Template::new(content)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.content
    }
}

/// Templates stored by index.
///
/// Dereferences to the underlying [`TypedContainer`], so every container
/// operation is available.
///
/// ```
/// use toolbelt::{TemplateError, Templates};
///
/// let templates = Templates::from_entries([
///     ("greeting", "Hello %name%"),
///     ("farewell", "Bye %name%"),
/// ]).unwrap();
///
/// assert_eq!(templates.find_template("greeting").unwrap().content(), "Hello %name%");
/// assert!(matches!(
///     templates.find_template("other"),
///     Err(TemplateError::NotFound { .. })
/// ));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Templates {
    inner: TypedContainer<Template>,
}

impl Templates {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Templates::default()
    }

    /// Builds templates from `(index, content)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the error of the first invalid template.
    pub fn from_entries<I, K, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Key>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(index, content)| Ok((index.into(), Template::new(content)?)))
            .collect::<Result<Vec<(Key, Template)>>>()?;

        Ok(Templates {
            inner: TypedContainer::new(entries),
        })
    }

    /// Returns the template stored under `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] naming the index.
    pub fn find_template(&self, index: impl Into<Key>) -> Result<&Template> {
        let index = index.into();
        match self.inner.get(index.clone()) {
            Some(template) => Ok(template),
            None => {
                debug!(%index, "template not found");
                Err(TemplateError::NotFound { index })
            }
        }
    }

    /// Consumes the wrapper and returns the container.
    pub fn into_inner(self) -> TypedContainer<Template> {
        self.inner
    }
}

impl Deref for Templates {
    type Target = TypedContainer<Template>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Templates {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<TypedContainer<Template>> for Templates {
    fn from(inner: TypedContainer<Template>) -> Self {
        Templates { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_content() {
        assert_eq!(Template::new(""), Err(TemplateError::Empty));
    }

    #[test]
    fn rejects_content_without_placeholders() {
        assert_eq!(
            Template::new("plain text"),
            Err(TemplateError::NoPlaceholders {
                content: "plain text".to_string()
            })
        );
        assert!(Template::new("100% sure").is_err());
    }

    #[test]
    fn placeholders_are_unique_and_ordered() {
        let template = Template::new("%b% %a% %b% %c%").unwrap();
        assert_eq!(template.placeholders(), vec!["b", "a", "c"]);
    }

    #[test]
    fn fill_replaces_repeated_placeholders() {
        let template = Template::new("%x%-%y%-%x%").unwrap();
        assert_eq!(template.fill([("x", 1), ("y", 2)]).unwrap(), "1-2-1");
    }

    #[test]
    fn fill_ignores_extra_values() {
        let template = Template::new("Hi %name%").unwrap();
        assert_eq!(
            template.fill([("name", "Jo"), ("unused", "x")]).unwrap(),
            "Hi Jo"
        );
    }

    #[test]
    fn fill_reports_every_missing_placeholder() {
        let template = Template::new("%first% %middle% %last%").unwrap();
        let err = template.fill([("middle", "J.")]).unwrap_err();

        assert_eq!(
            err,
            TemplateError::MissingPlaceholders {
                content: "%first% %middle% %last%".to_string(),
                missing: vec!["first".to_string(), "last".to_string()],
            }
        );
    }

    #[test]
    fn serde_validates() {
        let template: Template = serde_json::from_str(r#""Dear %name%""#).unwrap();
        assert_eq!(template.content(), "Dear %name%");
        assert_eq!(serde_json::to_string(&template).unwrap(), r#""Dear %name%""#);

        assert!(serde_json::from_str::<Template>(r#""no placeholders""#).is_err());
    }

    #[test]
    fn from_entries_keeps_indexes() {
        let templates = Templates::from_entries([(0, "%a%"), (5, "%b%")]).unwrap();

        assert_eq!(templates.count(), 2);
        assert_eq!(templates.find_template(5).unwrap().content(), "%b%");
        assert_eq!(
            templates.find_template(1),
            Err(TemplateError::NotFound { index: Key::Index(1) })
        );
    }

    #[test]
    fn from_entries_fails_on_first_invalid_template() {
        let result = Templates::from_entries([(0, "%a%"), (1, ""), (2, "plain")]);
        assert_eq!(result, Err(TemplateError::Empty));
    }

    #[test]
    fn container_operations_through_deref() {
        let mut templates = Templates::new();
        templates.append(Template::new("%one%").unwrap());
        templates.append(Template::new("%two%").unwrap());

        assert_eq!(templates.first().map(Template::content), Some("%one%"));
        assert_eq!(templates.find_template(1).unwrap().content(), "%two%");
    }
}
