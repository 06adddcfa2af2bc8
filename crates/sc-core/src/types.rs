use serde::{Deserialize, Deserializer, Serialize};

/// A resource reference plus the globals it should expose once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "file")]
    pub locator: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub globals: Vec<String>,
}

impl ResourceEntry {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            globals: Vec::new(),
        }
    }

    pub fn expose(mut self, name: impl Into<String>) -> Self {
        self.globals.push(name.into());
        self
    }
}

/// One ordered step of a script context: inline source or a resource load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Inline { inline: String },
    Resource(ResourceEntry),
}

impl ScriptStep {
    pub fn inline(source: impl Into<String>) -> Self {
        Self::Inline {
            inline: source.into(),
        }
    }
}

impl From<ResourceEntry> for ScriptStep {
    fn from(entry: ResourceEntry) -> Self {
        Self::Resource(entry)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

// Serialized manifests may list a single global as a bare string.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
    })
}
