//! Card domain model.
//!
//! # Responsibility
//! - Define the band card record and its optional featured song.
//! - Validate required attributes and the embed URL pattern.
//! - Keep the JSON field names compatible with existing collection slots.
//!
//! # Invariants
//! - `id` is never reassigned once a card is accepted into a collection.
//! - Required text attributes are non-empty after trimming.
//! - `song` is all-or-nothing: title, artist and embed URL are set together.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMBED_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://([a-z0-9-]+\.)*spotify\.com/embed(/\S*)?$")
        .expect("valid embed url regex")
});

/// Opaque card identity.
///
/// New ids are UUID v4 strings; ids read from an existing slot are kept as-is
/// (older collections used millisecond timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validated field names, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    BandName,
    Style,
    InfluentialAlbum,
    CountryOfOrigin,
    YearsActive,
    ImageUrl,
    SongTitle,
    SongArtist,
    SongEmbedUrl,
}

impl CardField {
    /// Name used in the persisted JSON shape.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::BandName => "bandName",
            Self::Style => "style",
            Self::InfluentialAlbum => "influentialAlbum",
            Self::CountryOfOrigin => "countryOfOrigin",
            Self::YearsActive => "yearsActive",
            Self::ImageUrl => "imageUrl",
            Self::SongTitle => "song.title",
            Self::SongArtist => "song.artist",
            Self::SongEmbedUrl => "song.spotifyEmbedUrl",
        }
    }

    /// Lowercase human label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::BandName => "band name",
            Self::Style => "style",
            Self::InfluentialAlbum => "influential album",
            Self::CountryOfOrigin => "country of origin",
            Self::YearsActive => "years active",
            Self::ImageUrl => "image url",
            Self::SongTitle => "song title",
            Self::SongArtist => "song artist",
            Self::SongEmbedUrl => "song embed url",
        }
    }
}

/// Validation failure for card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    EmptyId,
    EmptyField(CardField),
    InvalidEmbedUrl,
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "card id cannot be empty"),
            Self::EmptyField(field) => write!(f, "{} cannot be empty", field.wire_name()),
            Self::InvalidEmbedUrl => write!(
                f,
                "{} must reference a spotify.com/embed URL",
                CardField::SongEmbedUrl.wire_name()
            ),
        }
    }
}

impl Error for CardValidationError {}

/// Featured song attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// Serialized as `spotifyEmbedUrl` to match existing slots.
    #[serde(rename = "spotifyEmbedUrl")]
    pub embed_url: String,
}

impl Song {
    /// Builds a song and validates it as a unit.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        embed_url: impl Into<String>,
    ) -> Result<Self, CardValidationError> {
        let song = Self {
            title: title.into(),
            artist: artist.into(),
            embed_url: embed_url.into(),
        };
        song.validate()?;
        Ok(song)
    }

    /// Checks that all three fields are present and the embed URL matches.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        self.check(is_valid_embed_url)
    }

    /// Check applied to songs read back from a slot.
    ///
    /// Older collections were written under a looser URL rule, so any URL
    /// mentioning `spotify.com/embed` is accepted.
    pub fn validate_stored(&self) -> Result<(), CardValidationError> {
        self.check(is_stored_embed_url)
    }

    fn check(&self, embed_url_ok: fn(&str) -> bool) -> Result<(), CardValidationError> {
        require(&self.title, CardField::SongTitle)?;
        require(&self.artist, CardField::SongArtist)?;
        require(&self.embed_url, CardField::SongEmbedUrl)?;
        if !embed_url_ok(&self.embed_url) {
            return Err(CardValidationError::InvalidEmbedUrl);
        }
        Ok(())
    }
}

/// Returns whether `url` points at the Spotify embed player.
pub fn is_valid_embed_url(url: &str) -> bool {
    EMBED_URL_RE.is_match(url.trim())
}

fn is_stored_embed_url(url: &str) -> bool {
    url.to_ascii_lowercase().contains("spotify.com/embed")
}

/// One collection entry describing a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub band_name: String,
    pub style: String,
    pub influential_album: String,
    pub country_of_origin: String,
    pub years_active: String,
    pub image_url: String,
    #[serde(
        default,
        deserialize_with = "deserialize_song",
        skip_serializing_if = "Option::is_none"
    )]
    pub song: Option<Song>,
}

impl Card {
    /// Validates identity, required attributes and the optional song.
    ///
    /// Reports the first offending field in form order.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        self.validate_attributes()?;
        match &self.song {
            Some(song) => song.validate(),
            None => Ok(()),
        }
    }

    /// Same as [`Card::validate`], with the looser song URL rule used for
    /// cards read back from a slot.
    pub fn validate_stored(&self) -> Result<(), CardValidationError> {
        self.validate_attributes()?;
        match &self.song {
            Some(song) => song.validate_stored(),
            None => Ok(()),
        }
    }

    fn validate_attributes(&self) -> Result<(), CardValidationError> {
        if self.id.is_empty() {
            return Err(CardValidationError::EmptyId);
        }
        require(&self.band_name, CardField::BandName)?;
        require(&self.style, CardField::Style)?;
        require(&self.influential_album, CardField::InfluentialAlbum)?;
        require(&self.country_of_origin, CardField::CountryOfOrigin)?;
        require(&self.years_active, CardField::YearsActive)?;
        require(&self.image_url, CardField::ImageUrl)
    }
}

fn require(value: &str, field: CardField) -> Result<(), CardValidationError> {
    if value.trim().is_empty() {
        return Err(CardValidationError::EmptyField(field));
    }
    Ok(())
}

/// Stored song shape, tolerant of the empty placeholder older slots contain.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSong {
    #[serde(default)]
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    spotify_embed_url: String,
}

impl StoredSong {
    fn into_song(self) -> Option<Song> {
        let filled = [&self.title, &self.artist, &self.spotify_embed_url]
            .iter()
            .filter(|value| !value.trim().is_empty())
            .count();
        if filled == 0 {
            return None;
        }

        let song = Song {
            title: self.title,
            artist: self.artist,
            embed_url: self.spotify_embed_url,
        };
        match song.validate_stored() {
            Ok(()) => Some(song),
            Err(err) => {
                warn!(
                    "event=song_dropped module=model status=invalid filled_fields={} error={}",
                    filled, err
                );
                None
            }
        }
    }
}

fn deserialize_song<'de, D>(deserializer: D) -> Result<Option<Song>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredSong>::deserialize(deserializer)?;
    Ok(stored.and_then(StoredSong::into_song))
}
