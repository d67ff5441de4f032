//! The five elements (ohaeng) and their generation/overcoming cycles.

/// The five elements in generation-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements, for index iteration (0 = Wood .. 4 = Water).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Index in [`ALL_ELEMENTS`].
    pub const fn index(self) -> usize {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element for an index, wrapping modulo 5.
    pub const fn from_index(idx: usize) -> Self {
        ALL_ELEMENTS[idx % 5]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// The element this one generates (saeng cycle).
    pub const fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element this one overcomes (geuk cycle).
    pub const fn overcomes(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that overcomes this one.
    pub const fn overcome_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}
