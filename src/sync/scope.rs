use crate::types::Device;

/// Which slice of the device collection a list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Home screen: every associated device.
    All,
    /// Favorites screen: only devices flagged as favorite.
    Favorites,
    /// Measurement history screen: every associated device.
    History,
    /// Search results over title and location.
    Search(String),
}

impl ListScope {
    pub fn includes(&self, device: &Device) -> bool {
        match self {
            ListScope::All | ListScope::History => true,
            ListScope::Favorites => device.favorite,
            ListScope::Search(query) => device.matches(query),
        }
    }

    /// Rollback discipline used by default for this scope.
    pub fn default_discipline(&self) -> FavoriteDiscipline {
        match self {
            ListScope::Favorites => FavoriteDiscipline::RemoveOptimistically,
            _ => FavoriteDiscipline::FlipAndRevert,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ListScope::All => "all",
            ListScope::Favorites => "favorites",
            ListScope::History => "history",
            ListScope::Search(_) => "search",
        }
    }
}

/// How a list reacts to a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteDiscipline {
    /// Drop the item at once and never reinsert it, even when the call fails. The next
    /// focus-triggered load corrects the list.
    RemoveOptimistically,
    /// Flip the flag at once and restore the captured value when the call fails.
    FlipAndRevert,
}
