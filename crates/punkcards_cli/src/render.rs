//! Plain-text views of the collection.

use punkcards_core::Card;

const HEADERS: [&str; 7] = ["ID", "BAND", "STYLE", "ALBUM", "COUNTRY", "YEARS", "SONG"];

/// Renders the collection as an aligned grid, one card per row.
pub fn card_grid(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "No cards yet. Add one with `punkcards add`.\n".to_string();
    }

    let rows: Vec<[String; 7]> = cards.iter().map(grid_row).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// Renders every field of one card.
pub fn card_detail(card: &Card) -> String {
    let mut out = format!(
        "id:                {}\n\
         band name:         {}\n\
         style:             {}\n\
         influential album: {}\n\
         country of origin: {}\n\
         years active:      {}\n\
         image url:         {}\n",
        card.id,
        card.band_name,
        card.style,
        card.influential_album,
        card.country_of_origin,
        card.years_active,
        card.image_url,
    );
    if let Some(song) = &card.song {
        out.push_str(&format!(
            "song:              {} by {}\n\
             embed url:         {}\n",
            song.title, song.artist, song.embed_url
        ));
    }
    out
}

fn grid_row(card: &Card) -> [String; 7] {
    let song = card
        .song
        .as_ref()
        .map(|song| song.title.clone())
        .unwrap_or_else(|| "-".to_string());
    [
        card.id.to_string(),
        card.band_name.clone(),
        card.style.clone(),
        card.influential_album.clone(),
        card.country_of_origin.clone(),
        card.years_active.clone(),
        song,
    ]
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{card_detail, card_grid};
    use punkcards_core::{Card, CardId, Song};

    fn card(id: &str, band_name: &str) -> Card {
        Card {
            id: CardId::new(id),
            band_name: band_name.to_string(),
            style: "Riot Grrrl".to_string(),
            influential_album: "Pussy Whipped".to_string(),
            country_of_origin: "USA".to_string(),
            years_active: "1990-1997".to_string(),
            image_url: "https://example.com/band.jpg".to_string(),
            song: None,
        }
    }

    #[test]
    fn empty_collection_has_hint() {
        assert!(card_grid(&[]).contains("punkcards add"));
    }

    #[test]
    fn grid_keeps_collection_order_and_aligns_columns() {
        let grid = card_grid(&[card("1", "Bikini Kill"), card("2", "X-Ray Spex")]);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("1 "));
        assert!(lines[2].starts_with("2 "));
        assert_eq!(lines[1].find("Riot"), lines[2].find("Riot"));
    }

    #[test]
    fn detail_shows_song_when_present() {
        let mut with_song = card("1", "Bikini Kill");
        with_song.song = Some(
            Song::new(
                "Rebel Girl",
                "Bikini Kill",
                "https://open.spotify.com/embed/track/5S6lDzD0XxL0ZMcXqfPr8x",
            )
            .unwrap(),
        );

        assert!(card_detail(&with_song).contains("Rebel Girl by Bikini Kill"));
        assert!(!card_detail(&card("2", "Bratmobile")).contains("embed url"));
    }
}
