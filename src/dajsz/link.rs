/// The public site where created Dajsz games are played.
///
/// A game lives at the fragment of the site's root, so a game id of `g123` is played at
/// `https://dajsz.hu/#g123`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DajszGameLinks {
    base_url: String,
}

impl DajszGameLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Returns the link to the game with the specified id.
    ///
    /// The API hands out ids in the shape of a location (`/g123` or `/#g123`), so any leading
    /// slashes and hashes are dropped before the id is placed in the fragment.
    pub fn game_url(&self, game_id: &str) -> String {
        format!(
            "{}/#{}",
            self.base_url.trim_end_matches('/'),
            game_id.trim_start_matches(|c| c == '/' || c == '#')
        )
    }
}
