//! Typed models for the six catalog entity kinds.
//!
//! Each model matches its table in the schema: a mandatory `title` key plus
//! scalar and list-valued string attributes. Construction goes through
//! `new`, which rejects an empty title; every other field defaults to empty
//! and can be filled in directly.
//!
//! The models share no state or base type. Their only common behavior is the
//! [`Representable`] capability: a title key and a projection into the
//! externally visible field mapping.

use serde::{Deserialize, Serialize};

use omnibus_common::{EntityKind, Error, FieldValue, Representable, Representation, Result};

fn require_title<S: Into<String>>(title: S) -> Result<String> {
    let title = title.into();
    if title.trim().is_empty() {
        return Err(Error::missing_field("title"));
    }
    Ok(title)
}

/// A franchise character: identity, alignment, debut, and related names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub title: String,
    pub image: String,
    pub gender: String,
    pub identity: String,
    pub real_name: String,
    pub debut: String,
    pub alignment: String,
    pub universes: Vec<String>,
    pub aliases: Vec<String>,
    pub creators: Vec<String>,
    pub affiliation: Vec<String>,
}

impl Character {
    /// Create a character with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Character {
    fn kind(&self) -> EntityKind {
        EntityKind::Character
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert("gender".to_string(), FieldValue::Text(self.gender.clone()));
        rep.insert(
            "identity".to_string(),
            FieldValue::Text(self.identity.clone()),
        );
        rep.insert(
            "real_name".to_string(),
            FieldValue::Text(self.real_name.clone()),
        );
        rep.insert("debut".to_string(), FieldValue::Text(self.debut.clone()));
        rep.insert(
            "alignment".to_string(),
            FieldValue::Text(self.alignment.clone()),
        );
        rep.insert(
            "universes".to_string(),
            FieldValue::List(self.universes.clone()),
        );
        rep.insert("aliases".to_string(), FieldValue::List(self.aliases.clone()));
        rep.insert(
            "creators".to_string(),
            FieldValue::List(self.creators.clone()),
        );
        rep.insert(
            "affiliation".to_string(),
            FieldValue::List(self.affiliation.clone()),
        );
        rep
    }
}

/// A team of characters and its roster metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub title: String,
    pub image: String,
    pub debut: String,
    pub identity: String,
    pub status: String,
    pub creators: Vec<String>,
    pub universes: Vec<String>,
    pub team_leaders: Vec<String>,
    pub enemies: Vec<String>,
}

impl Team {
    /// Create a team with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Team {
    fn kind(&self) -> EntityKind {
        EntityKind::Team
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert("debut".to_string(), FieldValue::Text(self.debut.clone()));
        rep.insert(
            "identity".to_string(),
            FieldValue::Text(self.identity.clone()),
        );
        rep.insert("status".to_string(), FieldValue::Text(self.status.clone()));
        rep.insert(
            "creators".to_string(),
            FieldValue::List(self.creators.clone()),
        );
        rep.insert(
            "universes".to_string(),
            FieldValue::List(self.universes.clone()),
        );
        rep.insert(
            "team_leaders".to_string(),
            FieldValue::List(self.team_leaders.clone()),
        );
        rep.insert("enemies".to_string(), FieldValue::List(self.enemies.clone()));
        rep
    }
}

/// A comic issue or collected volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    pub title: String,
    pub image: String,
    pub release_date: String,
    pub locations: Vec<String>,
    pub featured_characters: Vec<String>,
    pub creators: Vec<String>,
}

impl Comic {
    /// Create a comic with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Comic {
    fn kind(&self) -> EntityKind {
        EntityKind::Comic
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert(
            "release_date".to_string(),
            FieldValue::Text(self.release_date.clone()),
        );
        rep.insert(
            "locations".to_string(),
            FieldValue::List(self.locations.clone()),
        );
        rep.insert(
            "featured_characters".to_string(),
            FieldValue::List(self.featured_characters.clone()),
        );
        rep.insert(
            "creators".to_string(),
            FieldValue::List(self.creators.clone()),
        );
        rep
    }
}

/// A feature film.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub image: String,
    pub release_date: String,
    pub running_time: String,
    pub budget: String,
    pub creators: Vec<String>,
    pub featured_characters: Vec<String>,
}

impl Movie {
    /// Create a movie with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Movie {
    fn kind(&self) -> EntityKind {
        EntityKind::Movie
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert(
            "release_date".to_string(),
            FieldValue::Text(self.release_date.clone()),
        );
        rep.insert(
            "running_time".to_string(),
            FieldValue::Text(self.running_time.clone()),
        );
        rep.insert("budget".to_string(), FieldValue::Text(self.budget.clone()));
        rep.insert(
            "creators".to_string(),
            FieldValue::List(self.creators.clone()),
        );
        rep.insert(
            "featured_characters".to_string(),
            FieldValue::List(self.featured_characters.clone()),
        );
        rep
    }
}

/// A television show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub title: String,
    pub image: String,
    pub first_air_date: String,
    pub last_air_date: String,
    pub running_time: String,
    pub creators: Vec<String>,
}

impl Show {
    /// Create a show with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Show {
    fn kind(&self) -> EntityKind {
        EntityKind::Show
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert(
            "first_air_date".to_string(),
            FieldValue::Text(self.first_air_date.clone()),
        );
        rep.insert(
            "last_air_date".to_string(),
            FieldValue::Text(self.last_air_date.clone()),
        );
        rep.insert(
            "running_time".to_string(),
            FieldValue::Text(self.running_time.clone()),
        );
        rep.insert(
            "creators".to_string(),
            FieldValue::List(self.creators.clone()),
        );
        rep
    }
}

/// A credited creator: writer, artist, editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub title: String,
    pub image: String,
    pub gender: String,
    pub birth_date: String,
    pub first_publication: String,
    pub job_titles: Vec<String>,
    pub employers: Vec<String>,
}

impl Creator {
    /// Create a creator with the given title and all other fields empty.
    pub fn new<S: Into<String>>(title: S) -> Result<Self> {
        Ok(Self {
            title: require_title(title)?,
            ..Self::default()
        })
    }
}

impl Representable for Creator {
    fn kind(&self) -> EntityKind {
        EntityKind::Creator
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_representation(&self) -> Representation {
        let mut rep = Representation::new();
        rep.insert("title".to_string(), FieldValue::Text(self.title.clone()));
        rep.insert("image".to_string(), FieldValue::Text(self.image.clone()));
        rep.insert("gender".to_string(), FieldValue::Text(self.gender.clone()));
        rep.insert(
            "birth_date".to_string(),
            FieldValue::Text(self.birth_date.clone()),
        );
        rep.insert(
            "first_publication".to_string(),
            FieldValue::Text(self.first_publication.clone()),
        );
        rep.insert(
            "job_titles".to_string(),
            FieldValue::List(self.job_titles.clone()),
        );
        rep.insert(
            "employers".to_string(),
            FieldValue::List(self.employers.clone()),
        );
        rep
    }
}
