//! Create/edit draft and its validation.
//!
//! # Responsibility
//! - Mirror the fields a user fills in, including the optional song block.
//! - Turn a draft into a validated `Card` or a single user-facing error.
//!
//! # Invariants
//! - Required fields are checked in form order; the first failure wins.
//! - An all-blank song block means "no song"; any filled song field makes
//!   all three required.

use crate::model::card::{Card, CardField, CardId, CardValidationError, Song};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError(CardValidationError);

impl FormError {
    /// Underlying validation failure.
    pub fn kind(&self) -> &CardValidationError {
        &self.0
    }

    /// Offending field, when the failure is tied to one.
    pub fn field(&self) -> Option<CardField> {
        match self.0 {
            CardValidationError::EmptyField(field) => Some(field),
            CardValidationError::InvalidEmbedUrl => Some(CardField::SongEmbedUrl),
            CardValidationError::EmptyId => None,
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            CardValidationError::EmptyId => write!(f, "Please pick a card to edit"),
            CardValidationError::EmptyField(field) => {
                write!(f, "Please fill in the {}", field.label())
            }
            CardValidationError::InvalidEmbedUrl => {
                write!(f, "Please provide a valid Spotify embed URL")
            }
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<CardValidationError> for FormError {
    fn from(value: CardValidationError) -> Self {
        Self(value)
    }
}

/// Song block of the form. Blank means no song.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDraft {
    pub title: String,
    pub artist: String,
    pub embed_url: String,
}

impl SongDraft {
    pub fn is_blank(&self) -> bool {
        [&self.title, &self.artist, &self.embed_url]
            .iter()
            .all(|value| value.trim().is_empty())
    }

    fn build(&self) -> Result<Option<Song>, CardValidationError> {
        if self.is_blank() {
            return Ok(None);
        }
        Song::new(
            self.title.trim(),
            self.artist.trim(),
            self.embed_url.trim(),
        )
        .map(Some)
    }
}

/// Draft state of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub band_name: String,
    pub style: String,
    pub influential_album: String,
    pub country_of_origin: String,
    pub years_active: String,
    pub image_url: String,
    pub song: SongDraft,
}

impl CardForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form from an existing card for editing.
    pub fn from_card(card: &Card) -> Self {
        let song = card
            .song
            .as_ref()
            .map(|song| SongDraft {
                title: song.title.clone(),
                artist: song.artist.clone(),
                embed_url: song.embed_url.clone(),
            })
            .unwrap_or_default();

        Self {
            band_name: card.band_name.clone(),
            style: card.style.clone(),
            influential_album: card.influential_album.clone(),
            country_of_origin: card.country_of_origin.clone(),
            years_active: card.years_active.clone(),
            image_url: card.image_url.clone(),
            song,
        }
    }

    /// Resets every field, including the song block.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets one field by name, the way a field change event does.
    pub fn set(&mut self, field: CardField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::BandName => &self.band_name,
            CardField::Style => &self.style,
            CardField::InfluentialAlbum => &self.influential_album,
            CardField::CountryOfOrigin => &self.country_of_origin,
            CardField::YearsActive => &self.years_active,
            CardField::ImageUrl => &self.image_url,
            CardField::SongTitle => &self.song.title,
            CardField::SongArtist => &self.song.artist,
            CardField::SongEmbedUrl => &self.song.embed_url,
        }
    }

    /// Checks the draft without producing a card.
    pub fn validate(&self) -> Result<(), FormError> {
        self.build(CardId::new("draft")).map(|_| ())
    }

    /// Validates the draft and produces a card carrying `id`.
    ///
    /// Text values are trimmed before they are stored.
    pub fn build(&self, id: CardId) -> Result<Card, FormError> {
        let card = Card {
            id,
            band_name: self.band_name.trim().to_string(),
            style: self.style.trim().to_string(),
            influential_album: self.influential_album.trim().to_string(),
            country_of_origin: self.country_of_origin.trim().to_string(),
            years_active: self.years_active.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            song: None,
        };
        card.validate()?;

        let song = self.song.build()?;
        Ok(Card { song, ..card })
    }

    fn field_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::BandName => &mut self.band_name,
            CardField::Style => &mut self.style,
            CardField::InfluentialAlbum => &mut self.influential_album,
            CardField::CountryOfOrigin => &mut self.country_of_origin,
            CardField::YearsActive => &mut self.years_active,
            CardField::ImageUrl => &mut self.image_url,
            CardField::SongTitle => &mut self.song.title,
            CardField::SongArtist => &mut self.song.artist,
            CardField::SongEmbedUrl => &mut self.song.embed_url,
        }
    }
}
