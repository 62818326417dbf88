//! Filling and sponge catalog

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filling {
    #[default]
    Raspberry,
    Chocolate,
    Cherry,
    Blueberry,
    Pistachio,
    Walnut,
    Apricot,
    MangoPassion,
    Vanilla,
}

impl Filling {
    pub const ALL: [Filling; 9] = [
        Filling::Raspberry,
        Filling::Chocolate,
        Filling::Cherry,
        Filling::Blueberry,
        Filling::Pistachio,
        Filling::Walnut,
        Filling::Apricot,
        Filling::MangoPassion,
        Filling::Vanilla,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Filling::Raspberry => "Malinová",
            Filling::Chocolate => "Čokoládová",
            Filling::Cherry => "Višňová",
            Filling::Blueberry => "Borůvková",
            Filling::Pistachio => "Pistáciová",
            Filling::Walnut => "Ořechová",
            Filling::Apricot => "Meruňková",
            Filling::MangoPassion => "Mango-maracuja",
            Filling::Vanilla => "Vanilková",
        }
    }
}

impl fmt::Display for Filling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sponge {
    Chocolate,
    #[default]
    Vanilla,
    Walnut,
    Moss,
    RedVelvet,
}

impl Sponge {
    pub const ALL: [Sponge; 5] = [
        Sponge::Chocolate,
        Sponge::Vanilla,
        Sponge::Walnut,
        Sponge::Moss,
        Sponge::RedVelvet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sponge::Chocolate => "Čokoládový",
            Sponge::Vanilla => "Vanilkový",
            Sponge::Walnut => "Ořechový",
            Sponge::Moss => "Mechový",
            Sponge::RedVelvet => "Red-Velvet",
        }
    }
}

impl fmt::Display for Sponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults() {
        assert_eq!(Filling::default(), Filling::Raspberry);
        assert_eq!(Sponge::default(), Sponge::Vanilla);
    }

    #[test]
    fn test_labels_are_unique() {
        let fillings: HashSet<_> = Filling::ALL.iter().map(Filling::label).collect();
        let sponges: HashSet<_> = Sponge::ALL.iter().map(Sponge::label).collect();
        assert_eq!(fillings.len(), Filling::ALL.len());
        assert_eq!(sponges.len(), Sponge::ALL.len());
    }
}
