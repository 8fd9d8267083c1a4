//! Path templates of the catalog endpoints. Query values are escaped with
//! `application/x-www-form-urlencoded` rules (space becomes `+`, `/` becomes `%2F`).

use url::form_urlencoded;

use crate::models::id::Id;

pub const YEARS: &str = "/facets/album_published/years";
pub const LANGUAGES: &str = "/languages";
pub const GAME_STATUS: &str = "/HVHE/status";
pub const QUESTION_ANSWERS: &str = "/question/answers";
pub const GAME_NOTIFICATIONS: &str = "/HVHE/notifications";
pub const GAME_NIGHT: &str = "/HVHE/gamenight";
pub const GAME_NIGHT_SIMPLE: &str = "/HVHE/gamenight3";

pub fn albums(year: u32) -> String {
    format!("/album/published/{}/", year)
}

pub fn album(album_id: Id) -> String {
    format!("/album/{}", album_id)
}

pub fn podcast_tracks(tag: &str, size: u32) -> String {
    format!(
        "/track?tags={}&size={}&unpublished=show",
        query_escape(tag),
        size
    )
}

pub fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
