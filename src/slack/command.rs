use strum_macros::EnumString;

/// The slack slash commands that this tool responds to.
#[derive(Debug, PartialEq, Eq, EnumString, Clone, Copy)]
pub enum DajszSlackCommand {
    #[strum(serialize = "/dajsz")]
    CreateGame,
}

/// The interaction callback ids that get special treatment.
///
/// Interactions with any other callback id (including modal submissions, which carry none) fall
/// back to creating a game.
#[derive(Debug, PartialEq, Eq, EnumString, Clone, Copy)]
pub enum DajszInteractionCallback {
    /// The shortcut that opens the dialog for picking where the game link is shared.
    #[strum(serialize = "yahtzee")]
    ShowShareModal,
}
