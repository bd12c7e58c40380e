use serde::{Deserialize, Serialize};

/// A locally-defined user identity; the unit of data isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub login: String,
    pub avatar: Option<String>,
    pub created_at: String,
}

impl Profile {
    /// Creates a fresh profile with a generated id, slug and avatar URL.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let login = slugify(name);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            avatar: Some(default_avatar(name)),
            login,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Partial patch for a profile. At least one field must be set.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub login: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.login.is_none() && self.avatar.is_none()
    }
}

/// Lowercases and collapses runs of non-alphanumerics to a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn default_avatar(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Alex"), "alex");
        assert_eq!(slugify("Jean-Luc  Picard"), "jean-luc-picard");
        assert_eq!(slugify("  trailing!! "), "trailing");
    }

    #[test]
    fn new_profile_gets_distinct_ids() {
        let a = Profile::new("Alex");
        let b = Profile::new("Alex");
        assert_ne!(a.id, b.id);
        assert_eq!(a.login, "alex");
        assert!(a.avatar.as_deref().unwrap().contains("Alex"));
    }
}
