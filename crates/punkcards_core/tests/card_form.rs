use punkcards_core::{Card, CardField, CardForm, CardId, SongDraft};

fn filled_form() -> CardForm {
    CardForm {
        band_name: " Bikini Kill ".to_string(),
        style: "Riot Grrrl".to_string(),
        influential_album: "Pussy Whipped".to_string(),
        country_of_origin: "USA".to_string(),
        years_active: "1990-1997".to_string(),
        image_url: "https://example.com/bikini-kill.jpg".to_string(),
        song: SongDraft::default(),
    }
}

#[test]
fn build_trims_values_and_skips_blank_song() {
    let card = filled_form().build(CardId::new("1")).unwrap();

    assert_eq!(card.id.as_str(), "1");
    assert_eq!(card.band_name, "Bikini Kill");
    assert_eq!(card.song, None);
}

#[test]
fn missing_required_field_names_the_first_one() {
    let mut form = filled_form();
    form.set(CardField::CountryOfOrigin, "");
    form.set(CardField::ImageUrl, "   ");

    let err = form.build(CardId::new("1")).unwrap_err();
    assert_eq!(err.field(), Some(CardField::CountryOfOrigin));
    assert_eq!(err.to_string(), "Please fill in the country of origin");
}

#[test]
fn partially_filled_song_requires_remaining_fields() {
    let mut form = filled_form();
    form.set(CardField::SongTitle, "Rebel Girl");

    let err = form.validate().unwrap_err();
    assert_eq!(err.to_string(), "Please fill in the song artist");
}

#[test]
fn song_with_wrong_embed_url_is_rejected() {
    let mut form = filled_form();
    form.song = SongDraft {
        title: "Rebel Girl".to_string(),
        artist: "Bikini Kill".to_string(),
        embed_url: "https://open.spotify.com/track/5S6lDzD0XxL0ZMcXqfPr8x".to_string(),
    };

    let err = form.validate().unwrap_err();
    assert_eq!(err.to_string(), "Please provide a valid Spotify embed URL");
    assert_eq!(err.field(), Some(CardField::SongEmbedUrl));
}

#[test]
fn complete_song_is_attached() {
    let mut form = filled_form();
    form.song = SongDraft {
        title: "Rebel Girl".to_string(),
        artist: "Bikini Kill".to_string(),
        embed_url: "https://open.spotify.com/embed/track/5S6lDzD0XxL0ZMcXqfPr8x".to_string(),
    };

    let card = form.build(CardId::new("1")).unwrap();
    let song = card.song.expect("song should be attached");
    assert_eq!(song.title, "Rebel Girl");
}

#[test]
fn required_fields_are_checked_before_song() {
    let mut form = filled_form();
    form.band_name.clear();
    form.song.embed_url = "not a url".to_string();

    let err = form.validate().unwrap_err();
    assert_eq!(err.to_string(), "Please fill in the band name");
}

#[test]
fn from_card_round_trips_through_build() {
    let mut form = filled_form();
    form.song = SongDraft {
        title: "Rebel Girl".to_string(),
        artist: "Bikini Kill".to_string(),
        embed_url: "https://open.spotify.com/embed/track/5S6lDzD0XxL0ZMcXqfPr8x".to_string(),
    };
    let card: Card = form.build(CardId::new("9")).unwrap();

    let prefilled = CardForm::from_card(&card);
    assert_eq!(prefilled.band_name, "Bikini Kill");
    assert_eq!(prefilled.build(card.id.clone()).unwrap(), card);
}

#[test]
fn clear_resets_everything() {
    let mut form = filled_form();
    form.song.title = "Rebel Girl".to_string();
    form.clear();
    assert_eq!(form, CardForm::default());
}
