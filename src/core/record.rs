//! Pokémon record as displayed by the viewer.
//!
//! `Record` is built only from a decoded PokéAPI payload. The wire structs
//! below mirror the subset of `/api/v2/pokemon/{id}` we actually read;
//! everything else in the response is ignored.
//!
//! Sprite lookup is null-safe: a missing `sprites` object, `sprites: null`,
//! `sprites: {}` and `front_default: null` all produce `sprite = None`.

use serde::{Deserialize, Serialize};

/// Fetched Pokémon entity (immutable, replaced wholesale on each fetch)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Front sprite URL, if the API has one
    pub sprite: Option<String>,
    /// Type names ordered by slot
    #[serde(default)]
    pub types: Vec<String>,
}

impl Record {
    /// Decode a PokéAPI JSON body.
    ///
    /// Returns a human-readable message on failure; the fetcher wraps it
    /// into `FetchError::Decode` together with the requested id.
    pub fn from_json(body: &str) -> Result<Self, String> {
        let payload: PokemonPayload = serde_json::from_str(body).map_err(|e| e.to_string())?;
        Self::from_payload(payload)
    }

    fn from_payload(payload: PokemonPayload) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("field `name` is empty".to_string());
        }

        let sprite = payload.sprites.and_then(|s| s.front_default);

        let mut slots = payload.types;
        slots.sort_by_key(|t| t.slot);
        let types = slots.into_iter().map(|t| t.kind.name).collect();

        Ok(Self {
            id: payload.id,
            name: payload.name,
            height: payload.height,
            weight: payload.weight,
            sprite,
            types,
        })
    }

    /// Name with the first letter capitalized ("bulbasaur" -> "Bulbasaur")
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Height in metres
    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    /// Weight in kilograms
    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:04} {}", self.id, self.display_name())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct PokemonPayload {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    sprites: Option<SpritesPayload>,
    #[serde(default)]
    types: Vec<TypeSlotPayload>,
}

#[derive(Debug, Deserialize)]
struct SpritesPayload {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotPayload {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}
