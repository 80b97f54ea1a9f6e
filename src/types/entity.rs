use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: String,
    pub external_id: String,
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewDeveloper {
    pub external_id: String,
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub url: String,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewRepository {
    pub external_id: String,
    pub name: String,
    pub owner: String,
    pub url: Option<String>,
    pub language: Option<String>,
}

impl NewRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn resolved_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.full_name()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Lead,
    Manager,
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "lead" => Ok(Self::Lead),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub developer_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub repository_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_repository_derives_full_name_and_url() {
        let repo = NewRepository {
            external_id: "77".to_string(),
            name: "engine".to_string(),
            owner: "acme".to_string(),
            url: None,
            language: Some("Rust".to_string()),
        };

        assert_eq!(repo.full_name(), "acme/engine");
        assert_eq!(repo.resolved_url(), "https://github.com/acme/engine");
    }

    #[test]
    fn member_role_parses_case_insensitively() {
        assert_eq!("Lead".parse::<MemberRole>(), Ok(MemberRole::Lead));
        assert!("owner".parse::<MemberRole>().is_err());
    }
}
