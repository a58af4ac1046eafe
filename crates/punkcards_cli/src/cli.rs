use clap::{Args as ClapArgs, Parser, Subcommand};
use punkcards_core::{CardField, CardForm, ConfigOverrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "punkcards", version, about = "Trading cards of influential punk bands")]
pub struct Args {
    #[command(subcommand)]
    pub action: Action,
    /// SQLite file holding the collection. Falls back to `PUNKCARDS_DB_PATH`,
    /// then `punkcards.sqlite3` in the per-user data directory.
    #[arg(long, value_name = "FILE", global = true)]
    pub db: Option<PathBuf>,
    /// Storage slot name. Falls back to `PUNKCARDS_STORAGE_KEY`, then `paniniCards`.
    #[arg(long, value_name = "KEY", global = true)]
    pub key: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off without one.
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            storage_key: self.key.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Show the collection as a grid.
    List,
    /// Show every field of one card.
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Create a card.
    Add {
        #[command(flatten)]
        fields: CardFields,
    },
    /// Edit a card; only the given fields change.
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: CardFields,
        /// Remove the featured song.
        #[arg(long, conflicts_with_all = ["song_title", "song_artist", "song_embed"])]
        no_song: bool,
    },
    /// Delete a card.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Print the stored JSON slot.
    Export,
}

/// Form fields accepted on the command line.
#[derive(ClapArgs, Debug, Default)]
pub struct CardFields {
    #[arg(long = "band", value_name = "NAME")]
    pub band_name: Option<String>,
    #[arg(long)]
    pub style: Option<String>,
    #[arg(long = "album", value_name = "TITLE")]
    pub influential_album: Option<String>,
    #[arg(long = "country")]
    pub country_of_origin: Option<String>,
    /// e.g. "1990-1997, 2017-present"
    #[arg(long = "years")]
    pub years_active: Option<String>,
    #[arg(long = "image", value_name = "URL")]
    pub image_url: Option<String>,
    #[arg(long)]
    pub song_title: Option<String>,
    #[arg(long)]
    pub song_artist: Option<String>,
    /// https://open.spotify.com/embed/track/...
    #[arg(long, value_name = "URL")]
    pub song_embed: Option<String>,
}

impl CardFields {
    /// Writes every provided value into `form`, leaving the rest untouched.
    pub fn apply_to(self, form: &mut CardForm) {
        let values = [
            (CardField::BandName, self.band_name),
            (CardField::Style, self.style),
            (CardField::InfluentialAlbum, self.influential_album),
            (CardField::CountryOfOrigin, self.country_of_origin),
            (CardField::YearsActive, self.years_active),
            (CardField::ImageUrl, self.image_url),
            (CardField::SongTitle, self.song_title),
            (CardField::SongArtist, self.song_artist),
            (CardField::SongEmbedUrl, self.song_embed),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}
