use serde::{Deserialize, Serialize};
use std::fmt;

/// The four closed option sets a generation request is built from. Labels are
/// the canonical strings shown to users and sent to the model; serde uses the
/// same labels, so an unknown label is a deserialization error.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Hopeful,
    Inspiring,
    Romantic,
    Funny,
    Serious,
    Reflective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Short Story")]
    ShortStory,
    Poetry,
    Essay,
    #[serde(rename = "Flash Fiction")]
    FlashFiction,
    #[serde(rename = "Dialogue Scene")]
    DialogueScene,
    Quotes,
    Affirmations,
    #[serde(rename = "Expository Writing")]
    ExpositoryWriting,
    #[serde(rename = "Play Script")]
    PlayScript,
    #[serde(rename = "Philosophical Writing")]
    PhilosophicalWriting,
    #[serde(rename = "Social Media Caption")]
    SocialMediaCaption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    Thriller,
    Horror,
    Romance,
    Adventure,
    Comedy,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    #[serde(rename = "Self-Help & Motivational")]
    SelfHelp,
    #[serde(rename = "Philosophy & Psychology")]
    Philosophy,
    Drama,
    Satire,
    Action,
    Tragedy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    #[serde(rename = "Very Short")]
    VeryShort,
    Short,
    Medium,
    Long,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Hopeful,
        Mood::Inspiring,
        Mood::Romantic,
        Mood::Funny,
        Mood::Serious,
        Mood::Reflective,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Hopeful => "Hopeful",
            Mood::Inspiring => "Inspiring",
            Mood::Romantic => "Romantic",
            Mood::Funny => "Funny",
            Mood::Serious => "Serious",
            Mood::Reflective => "Reflective",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == label)
    }
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::ShortStory,
        ContentType::Poetry,
        ContentType::Essay,
        ContentType::FlashFiction,
        ContentType::DialogueScene,
        ContentType::Quotes,
        ContentType::Affirmations,
        ContentType::ExpositoryWriting,
        ContentType::PlayScript,
        ContentType::PhilosophicalWriting,
        ContentType::SocialMediaCaption,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ShortStory => "Short Story",
            ContentType::Poetry => "Poetry",
            ContentType::Essay => "Essay",
            ContentType::FlashFiction => "Flash Fiction",
            ContentType::DialogueScene => "Dialogue Scene",
            ContentType::Quotes => "Quotes",
            ContentType::Affirmations => "Affirmations",
            ContentType::ExpositoryWriting => "Expository Writing",
            ContentType::PlayScript => "Play Script",
            ContentType::PhilosophicalWriting => "Philosophical Writing",
            ContentType::SocialMediaCaption => "Social Media Caption",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == label)
    }
}

impl Genre {
    pub const ALL: [Genre; 15] = [
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Thriller,
        Genre::Horror,
        Genre::Romance,
        Genre::Adventure,
        Genre::Comedy,
        Genre::HistoricalFiction,
        Genre::SelfHelp,
        Genre::Philosophy,
        Genre::Drama,
        Genre::Satire,
        Genre::Action,
        Genre::Tragedy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::SelfHelp => "Self-Help & Motivational",
            Genre::Philosophy => "Philosophy & Psychology",
            Genre::Drama => "Drama",
            Genre::Satire => "Satire",
            Genre::Action => "Action",
            Genre::Tragedy => "Tragedy",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == label)
    }
}

impl Length {
    pub const ALL: [Length; 4] = [
        Length::VeryShort,
        Length::Short,
        Length::Medium,
        Length::Long,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Length::VeryShort => "Very Short",
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == label)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of every selectable option, in canonical order. The client form
/// renders its dropdowns from this.
#[derive(Debug, Serialize)]
pub struct OptionCatalog {
    pub moods: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub genres: Vec<&'static str>,
    pub lengths: Vec<&'static str>,
}

pub fn catalog() -> OptionCatalog {
    OptionCatalog {
        moods: Mood::ALL.iter().map(|m| m.as_str()).collect(),
        types: ContentType::ALL.iter().map(|t| t.as_str()).collect(),
        genres: Genre::ALL.iter().map(|g| g.as_str()).collect(),
        lengths: Length::ALL.iter().map(|l| l.as_str()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_back_to_their_variant() {
        for m in Mood::ALL {
            assert_eq!(Mood::from_label(m.as_str()), Some(m));
        }
        for t in ContentType::ALL {
            assert_eq!(ContentType::from_label(t.as_str()), Some(t));
        }
        for g in Genre::ALL {
            assert_eq!(Genre::from_label(g.as_str()), Some(g));
        }
        for l in Length::ALL {
            assert_eq!(Length::from_label(l.as_str()), Some(l));
        }
    }

    #[test]
    fn unknown_labels_resolve_to_none() {
        assert_eq!(ContentType::from_label("Recipe"), None);
        assert_eq!(Length::from_label("Epic"), None);
        assert_eq!(Mood::from_label("happy"), None); // labels are exact
    }

    #[test]
    fn serde_uses_canonical_labels() {
        let json = serde_json::to_string(&ContentType::ShortStory).unwrap();
        assert_eq!(json, "\"Short Story\"");
        let back: ContentType = serde_json::from_str("\"Flash Fiction\"").unwrap();
        assert_eq!(back, ContentType::FlashFiction);

        let genre: Genre = serde_json::from_str("\"Self-Help & Motivational\"").unwrap();
        assert_eq!(genre, Genre::SelfHelp);

        assert!(serde_json::from_str::<Length>("\"Epic\"").is_err());
    }

    #[test]
    fn catalog_lists_every_option() {
        let cat = catalog();
        assert_eq!(cat.moods.len(), 8);
        assert_eq!(cat.types.len(), 11);
        assert_eq!(cat.genres.len(), 15);
        assert_eq!(cat.lengths.len(), 4);
        assert!(cat.genres.contains(&"Philosophy & Psychology"));
    }
}
