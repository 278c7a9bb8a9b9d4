use serde::ser::{Serialize, SerializeMap, Serializer};

/// One extracted profile. A field is set only when something was recovered;
/// unset fields are skipped on serialization.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(rename = "avatarURL", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub work_experience: Vec<ExperienceEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<RecommendationEntry>,
    #[serde(skip_serializing_if = "Accomplishments::is_empty")]
    pub accomplishments: Accomplishments,
    #[serde(skip_serializing_if = "Contacts::is_empty")]
    pub contacts: Contacts,
}

impl ProfileRecord {
    /// Serialized keys present on this record, in output order.
    pub fn keys(&self) -> Vec<&'static str> {
        let present = [
            ("avatarURL", self.avatar_url.is_some()),
            ("bio", self.bio.is_some()),
            ("about", self.about.is_some()),
            ("currentLocation", self.current_location.is_some()),
            ("workExperience", !self.work_experience.is_empty()),
            ("education", !self.education.is_empty()),
            ("skills", !self.skills.is_empty()),
            ("recommendations", !self.recommendations.is_empty()),
            ("accomplishments", !self.accomplishments.is_empty()),
            ("contacts", !self.contacts.is_empty()),
        ];
        present
            .into_iter()
            .filter_map(|(key, set)| set.then_some(key))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company_url: String,
    pub company_logo: String,
    pub title: String,
    pub company_name: String,
    pub duration: String,
    pub location: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn is_blank(&self) -> bool {
        [
            &self.company_url,
            &self.company_logo,
            &self.title,
            &self.company_name,
            &self.duration,
            &self.location,
            &self.description,
        ]
        .iter()
        .all(|f| f.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: String,
    pub school_url: String,
    pub school_logo: String,
    pub degree: String,
    #[serde(rename = "field_of_study")]
    pub field_of_study: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
    pub recommendation_given_by: String,
    pub recommendation_given_by_url: String,
    pub recommendation: String,
}

/// Contact channels; absent channels are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Contacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.linkedin.is_none()
            && self.twitter.is_none()
            && self.website.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_name: String,
    pub course_number: String,
    pub associated_with: String,
}

/// Shared by Honors and every unrecognized category.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Honor {
    pub accomplishment: String,
    pub accomplishment_from: String,
    pub accomplishment_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: String,
    pub date: String,
    pub project_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub certificate_name: String,
    pub certificate_from: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Publication {
    pub topic: String,
    pub publication: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Organization {
    pub name: String,
    pub date: String,
}

/// Items of one accomplishment category, shaped per kind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Category {
    /// Comma-joined language names.
    Languages(String),
    Courses(Vec<Course>),
    Honors(Vec<Honor>),
    Projects(Vec<Project>),
    Certifications(Vec<Certification>),
    Publications(Vec<Publication>),
    Organizations(Vec<Organization>),
    Other(Vec<Honor>),
}

/// Category name → items, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accomplishments {
    categories: Vec<(String, Category)>,
}

impl Accomplishments {
    /// A repeated name replaces the earlier value but keeps its position.
    pub fn insert(&mut self, name: String, category: Category) {
        match self.categories.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = category,
            None => self.categories.push((name, category)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for Accomplishments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, category) in &self.categories {
            map.serialize_entry(name, category)?;
        }
        map.end()
    }
}
