use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Developer profile, one per user.
///
/// `U` is the shape of the owner reference: the bare user id as stored, or a
/// [`ProfileOwner`] once populated with the owner's public details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile<U = Uuid> {
    pub id: Uuid,
    pub user: U,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub social: Social,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Social {
    /// Overwrite only the links present in `other`
    pub fn merge(&mut self, other: &Social) {
        merge_field(&mut self.youtube, &other.youtube);
        merge_field(&mut self.facebook, &other.facebook);
        merge_field(&mut self.twitter, &other.twitter);
        merge_field(&mut self.instagram, &other.instagram);
        merge_field(&mut self.linkedin, &other.linkedin);
    }
}

/// Public details of a profile's owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

impl Profile {
    pub fn populate(self, owner: ProfileOwner) -> Profile<ProfileOwner> {
        Profile {
            id: self.id,
            user: owner,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            skills: self.skills,
            githubusername: self.githubusername,
            social: self.social,
            created_at: self.created_at,
        }
    }
}

/// Partial profile write. `None` means "leave the stored value as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub githubusername: Option<String>,
    pub social: Social,
}

impl ProfileFields {
    pub fn apply_to<U>(&self, profile: &mut Profile<U>) {
        merge_field(&mut profile.company, &self.company);
        merge_field(&mut profile.website, &self.website);
        merge_field(&mut profile.location, &self.location);
        merge_field(&mut profile.bio, &self.bio);
        merge_field(&mut profile.githubusername, &self.githubusername);
        if let Some(status) = &self.status {
            profile.status = status.clone();
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }
        profile.social.merge(&self.social);
    }
}

fn merge_field(target: &mut Option<String>, update: &Option<String>) {
    if let Some(value) = update {
        *target = Some(value.clone());
    }
}

/// Split comma separated skills, trimming each entry and dropping blanks
pub fn parse_skills(raw: &str) -> Vec<String> {
    normalize_skills(raw.split(','))
}

pub fn normalize_skills<'a>(skills: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    skills
        .into_iter()
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user: Uuid::new_v4(),
            company: Some("Acme".to_string()),
            website: None,
            location: Some("Berlin".to_string()),
            bio: None,
            status: "Developer".to_string(),
            skills: vec!["rust".to_string()],
            githubusername: None,
            social: Social {
                twitter: Some("https://twitter.com/acme".to_string()),
                ..Default::default()
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(parse_skills("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_skills("rust,, go ,"), vec!["rust", "go"]);
        assert!(parse_skills(" , ").is_empty());
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let mut profile = sample();
        let fields = ProfileFields {
            status: Some("Senior Developer".to_string()),
            bio: Some("Hello".to_string()),
            social: Social {
                youtube: Some("https://youtube.com/acme".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        fields.apply_to(&mut profile);

        assert_eq!(profile.status, "Senior Developer");
        assert_eq!(profile.bio.as_deref(), Some("Hello"));
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(profile.social.twitter.as_deref(), Some("https://twitter.com/acme"));
        assert_eq!(profile.social.youtube.as_deref(), Some("https://youtube.com/acme"));
    }

    #[test]
    fn populated_profile_serializes_owner_object() {
        let profile = sample();
        let owner = ProfileOwner {
            id: profile.user,
            name: "Jane".to_string(),
            avatar: "https://www.gravatar.com/avatar/x".to_string(),
        };

        let value = serde_json::to_value(profile.populate(owner)).unwrap();
        assert_eq!(value["user"]["name"], "Jane");
        assert!(value.get("website").is_none());
        assert_eq!(value["social"]["twitter"], "https://twitter.com/acme");
    }
}
