//! Biome labels and the static per-biome attribute table.

/// Discrete terrain category assigned to one grid cell.
///
/// Discriminants double as the label index written by
/// [`BiomeGenerator::grid_array`](crate::BiomeGenerator::grid_array).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BiomeLabel {
    Ocean = 0,
    Mountain = 1,
    Forest = 2,
    Grassland = 3,
    Desert = 4,
    Savanna = 5,
}

/// Fixed properties shared by every cell of a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeAttributes {
    /// Whether simulated agents may occupy cells of this biome.
    pub traversable: bool,
    /// Food yield multiplier, `>= 0`.
    pub food_multiplier: f64,
    /// Relative elevation hint for renderers that displace terrain.
    pub elevation_bias: f64,
    /// Opaque `0xRRGGBB` color identifier. Interpreted only by renderers.
    pub visual_tag: u32,
}

/// Attribute row per [`BiomeLabel`], indexed by discriminant.
pub static BIOME_TABLE: [BiomeAttributes; BiomeLabel::COUNT] = [
    // Ocean
    BiomeAttributes {
        traversable: false,
        food_multiplier: 0.0,
        elevation_bias: -1.0,
        visual_tag: 0x1E5AA8,
    },
    // Mountain
    BiomeAttributes {
        traversable: false,
        food_multiplier: 0.2,
        elevation_bias: 1.0,
        visual_tag: 0x8B7D6B,
    },
    // Forest
    BiomeAttributes {
        traversable: true,
        food_multiplier: 1.5,
        elevation_bias: 0.3,
        visual_tag: 0x2E7D32,
    },
    // Grassland
    BiomeAttributes {
        traversable: true,
        food_multiplier: 1.0,
        elevation_bias: 0.1,
        visual_tag: 0x7CB342,
    },
    // Desert
    BiomeAttributes {
        traversable: true,
        food_multiplier: 0.3,
        elevation_bias: 0.05,
        visual_tag: 0xE0C068,
    },
    // Savanna
    BiomeAttributes {
        traversable: true,
        food_multiplier: 0.8,
        elevation_bias: 0.15,
        visual_tag: 0xC0B040,
    },
];

// The table is indexed by discriminant, so the last variant must close the range.
static_assertions::const_assert_eq!(BiomeLabel::Savanna as usize + 1, BiomeLabel::COUNT);

impl BiomeLabel {
    /// Number of variants.
    pub const COUNT: usize = 6;

    /// Every label in discriminant order.
    pub const ALL: [BiomeLabel; Self::COUNT] = [
        BiomeLabel::Ocean,
        BiomeLabel::Mountain,
        BiomeLabel::Forest,
        BiomeLabel::Grassland,
        BiomeLabel::Desert,
        BiomeLabel::Savanna,
    ];

    /// Label index as stored in flat label arrays.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`index`](Self::index). `None` for unknown indices.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(BiomeLabel::Ocean),
            1 => Some(BiomeLabel::Mountain),
            2 => Some(BiomeLabel::Forest),
            3 => Some(BiomeLabel::Grassland),
            4 => Some(BiomeLabel::Desert),
            5 => Some(BiomeLabel::Savanna),
            _ => None,
        }
    }

    /// The attribute row for this label.
    #[inline]
    pub fn attributes(self) -> &'static BiomeAttributes {
        &BIOME_TABLE[self as usize]
    }

    #[inline]
    pub fn is_traversable(self) -> bool {
        self.attributes().traversable
    }

    #[inline]
    pub fn food_multiplier(self) -> f64 {
        self.attributes().food_multiplier
    }

    /// Lowercase name, stable for logs and config files.
    pub const fn name(self) -> &'static str {
        match self {
            BiomeLabel::Ocean => "ocean",
            BiomeLabel::Mountain => "mountain",
            BiomeLabel::Forest => "forest",
            BiomeLabel::Grassland => "grassland",
            BiomeLabel::Desert => "desert",
            BiomeLabel::Savanna => "savanna",
        }
    }
}

impl std::fmt::Display for BiomeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
