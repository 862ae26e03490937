//! Item rarity shared by every entity kind.

string_enum! {
    /// Declaration order is the display rank: `Common < Greed < Epic < Legendary < Relic`.
    pub enum Rarity {
        Common,
        Greed,
        Epic,
        Legendary,
        Relic,
    }
}

impl Rarity {
    pub fn rank(self) -> u8 {
        self as u8
    }
}
